use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_developers: i64,
    pub total_companies: i64,
    pub total_admins: i64,
    pub total_company_profiles: i64,
    pub total_job_posts: i64,
    pub pending_reviews: i64,
    pub pending_review_comments: i64,
    pub pending_job_comments: i64,
    pub pending_reports: i64,
}

pub async fn platform(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
    sqlx::query_as::<_, PlatformStats>(
        "SELECT
            (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL) AS total_users,
            (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND role = 'developer') AS total_developers,
            (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND role = 'company') AS total_companies,
            (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND role = 'admin') AS total_admins,
            (SELECT COUNT(*) FROM company_profiles WHERE deleted_at IS NULL) AS total_company_profiles,
            (SELECT COUNT(*) FROM job_posts WHERE deleted_at IS NULL) AS total_job_posts,
            (SELECT COUNT(*) FROM company_reviews WHERE deleted_at IS NULL AND NOT is_approved) AS pending_reviews,
            (SELECT COUNT(*) FROM review_comments WHERE deleted_at IS NULL AND NOT is_approved) AS pending_review_comments,
            (SELECT COUNT(*) FROM job_comments WHERE deleted_at IS NULL AND NOT is_approved) AS pending_job_comments,
            (SELECT COUNT(*) FROM user_reports WHERE status = 'pending') AS pending_reports",
    )
    .fetch_one(pool)
    .await
}
