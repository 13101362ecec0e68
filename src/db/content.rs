//! Reviews and comments share one shape across three tables; `ContentKind`
//! supplies the (static) table and target column names.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ModeratedContent;
use crate::moderation::ContentKind;
use crate::response::PageParams;

fn columns(kind: ContentKind) -> String {
    format!(
        "id, user_id AS author_id, {} AS target_id, content, is_approved, created_at, updated_at",
        kind.target_column()
    )
}

/// New content always starts unapproved.
pub async fn create(
    pool: &PgPool,
    kind: ContentKind,
    author_id: Uuid,
    target_id: Uuid,
    content: &str,
) -> Result<ModeratedContent, sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (id, user_id, {}, content, is_approved)
         VALUES ($1, $2, $3, $4, FALSE)
         RETURNING {}",
        kind.table(),
        kind.target_column(),
        columns(kind)
    );
    sqlx::query_as::<_, ModeratedContent>(&sql)
        .bind(Uuid::now_v7())
        .bind(author_id)
        .bind(target_id)
        .bind(content)
        .fetch_one(pool)
        .await
}

/// Any row that has not been soft-deleted, approved or not.
pub async fn find_live(
    pool: &PgPool,
    kind: ContentKind,
    id: Uuid,
) -> Result<Option<ModeratedContent>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
        columns(kind),
        kind.table()
    );
    sqlx::query_as::<_, ModeratedContent>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn approve(
    pool: &PgPool,
    kind: ContentKind,
    id: Uuid,
) -> Result<Option<ModeratedContent>, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET is_approved = TRUE, updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL
         RETURNING {}",
        kind.table(),
        columns(kind)
    );
    sqlx::query_as::<_, ModeratedContent>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Soft delete of a still-pending row. Returns false when nothing matched.
pub async fn remove_pending(pool: &PgPool, kind: ContentKind, id: Uuid) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET deleted_at = now(), updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL AND is_approved = FALSE",
        kind.table()
    );
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_approved(
    pool: &PgPool,
    kind: ContentKind,
    target_id: Uuid,
    page: PageParams,
) -> Result<(Vec<ModeratedContent>, i64), sqlx::Error> {
    let filter = format!(
        "{} = $1 AND is_approved = TRUE AND deleted_at IS NULL",
        kind.target_column()
    );

    let total: (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {} WHERE {filter}", kind.table()))
            .bind(target_id)
            .fetch_one(pool)
            .await?;

    let sql = format!(
        "SELECT {} FROM {} WHERE {filter}
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        columns(kind),
        kind.table()
    );
    let rows = sqlx::query_as::<_, ModeratedContent>(&sql)
        .bind(target_id)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((rows, total.0))
}

/// Oldest first, so the moderation queue is worked in arrival order.
pub async fn list_pending(
    pool: &PgPool,
    kind: ContentKind,
    page: PageParams,
) -> Result<(Vec<ModeratedContent>, i64), sqlx::Error> {
    let filter = "is_approved = FALSE AND deleted_at IS NULL";

    let total: (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {} WHERE {filter}", kind.table()))
            .fetch_one(pool)
            .await?;

    let sql = format!(
        "SELECT {} FROM {} WHERE {filter}
         ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        columns(kind),
        kind.table()
    );
    let rows = sqlx::query_as::<_, ModeratedContent>(&sql)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((rows, total.0))
}
