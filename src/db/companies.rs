use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CompanyProfile, CompanyRating};

pub struct NewCompany<'a> {
    pub company_name: &'a str,
    pub description: &'a str,
    pub website: &'a str,
    pub location: &'a str,
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    company: &NewCompany<'_>,
) -> Result<CompanyProfile, sqlx::Error> {
    sqlx::query_as::<_, CompanyProfile>(
        "INSERT INTO company_profiles (id, user_id, company_name, description, website, location)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, user_id, company_name, description, website, location, created_at, updated_at",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(company.company_name)
    .bind(company.description)
    .bind(company.website)
    .bind(company.location)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<CompanyProfile>, sqlx::Error> {
    sqlx::query_as::<_, CompanyProfile>(
        "SELECT id, user_id, company_name, description, website, location, created_at, updated_at
         FROM company_profiles WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<CompanyProfile>, sqlx::Error> {
    sqlx::query_as::<_, CompanyProfile>(
        "SELECT id, user_id, company_name, description, website, location, created_at, updated_at
         FROM company_profiles WHERE user_id = $1 AND deleted_at IS NULL",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

#[derive(sqlx::FromRow)]
struct UpsertedRating {
    #[sqlx(flatten)]
    rating: CompanyRating,
    inserted: bool,
}

/// Insert or replace the caller's rating. The flag is true when a new row was inserted.
pub async fn upsert_rating(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Uuid,
    rating: i32,
) -> Result<(CompanyRating, bool), sqlx::Error> {
    let row = sqlx::query_as::<_, UpsertedRating>(
        "INSERT INTO company_ratings (id, company_id, user_id, rating)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (company_id, user_id)
         DO UPDATE SET rating = EXCLUDED.rating, updated_at = now()
         RETURNING id, company_id, user_id, rating, created_at, updated_at, (xmax = 0) AS inserted",
    )
    .bind(Uuid::now_v7())
    .bind(company_id)
    .bind(user_id)
    .bind(rating)
    .fetch_one(pool)
    .await?;

    Ok((row.rating, row.inserted))
}
