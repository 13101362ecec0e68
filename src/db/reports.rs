use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Report, ReportStatus};
use crate::response::PageParams;

pub async fn create(
    pool: &PgPool,
    reporter_id: Uuid,
    reported_id: Uuid,
    report_type: &str,
    description: &str,
) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "INSERT INTO user_reports (id, reporter_id, reported_id, report_type, description, status)
         VALUES ($1, $2, $3, $4, $5, 'pending') RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(reporter_id)
    .bind(reported_id)
    .bind(report_type)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>("SELECT * FROM user_reports WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Persist the review fields of a report produced by `moderation::review_report`.
pub async fn save_review(pool: &PgPool, report: &Report) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "UPDATE user_reports
         SET status = $2, reviewed_by = $3, reviewed_at = $4, updated_at = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(report.id)
    .bind(report.status)
    .bind(report.reviewed_by)
    .bind(report.reviewed_at)
    .bind(report.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    status: Option<ReportStatus>,
    report_type: Option<&str>,
    page: PageParams,
) -> Result<(Vec<Report>, i64), sqlx::Error> {
    let filter = "($1::report_status IS NULL OR status = $1)
         AND ($2::text IS NULL OR report_type = $2)";

    let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM user_reports WHERE {filter}"))
        .bind(status)
        .bind(report_type)
        .fetch_one(pool)
        .await?;

    let reports = sqlx::query_as::<_, Report>(&format!(
        "SELECT * FROM user_reports WHERE {filter}
         ORDER BY created_at DESC LIMIT $3 OFFSET $4"
    ))
    .bind(status)
    .bind(report_type)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok((reports, total.0))
}
