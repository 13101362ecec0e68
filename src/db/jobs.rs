use sqlx::PgPool;
use uuid::Uuid;

use crate::models::JobPost;

const COLUMNS: &str = "id, company_id, title, description, salary_min, salary_max, \
     experience_min_years, experience_max_years, work_mode, location, created_at, updated_at";

pub struct NewJob<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub salary_min: f64,
    pub salary_max: f64,
    pub experience_min_years: i32,
    pub experience_max_years: i32,
    pub work_mode: &'a str,
    pub location: &'a str,
}

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    job: &NewJob<'_>,
) -> Result<JobPost, sqlx::Error> {
    sqlx::query_as::<_, JobPost>(&format!(
        "INSERT INTO job_posts (id, company_id, title, description, salary_min, salary_max,
             experience_min_years, experience_max_years, work_mode, location)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(company_id)
    .bind(job.title)
    .bind(job.description)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(job.experience_min_years)
    .bind(job.experience_max_years)
    .bind(job.work_mode)
    .bind(job.location)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<JobPost>, sqlx::Error> {
    sqlx::query_as::<_, JobPost>(&format!(
        "SELECT {COLUMNS} FROM job_posts WHERE id = $1 AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}
