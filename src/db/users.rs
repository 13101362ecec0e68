use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Role, User};
use crate::response::PageParams;

pub async fn create(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    full_name: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, full_name, role)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// Exact, case-sensitive match against live users.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin' AND deleted_at IS NULL)",
    )
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn list(
    pool: &PgPool,
    role: Option<Role>,
    page: PageParams,
) -> Result<(Vec<User>, i64), sqlx::Error> {
    let total: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users
         WHERE deleted_at IS NULL AND ($1::user_role IS NULL OR role = $1)",
    )
    .bind(role)
    .fetch_one(pool)
    .await?;

    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users
         WHERE deleted_at IS NULL AND ($1::user_role IS NULL OR role = $1)
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(role)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok((users, total.0))
}

/// Soft delete. Returns false when no live user had this id.
pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET deleted_at = now(), updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
