//! Public side of moderated content: anyone authenticated may post, only
//! approved items are listed.

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::models::ModeratedContent;
use crate::moderation::ContentKind;
use crate::response::{ApiResponse, PageParams, PageQuery, Paginated};
use crate::state::{AppState, SharedState};

#[derive(Debug, Deserialize, Validate)]
pub struct ContentRequest {
    #[validate(length(min = 1, max = 5000, message = "Content is required"))]
    pub content: String,
}

/// The thing a piece of content hangs off must itself still be live.
/// A review only takes comments once it is approved.
async fn ensure_target(state: &AppState, kind: ContentKind, target_id: Uuid) -> Result<(), AppError> {
    let found = match kind {
        ContentKind::Review => db::companies::find_by_id(&state.pool, target_id)
            .await?
            .is_some(),
        ContentKind::ReviewComment => db::content::find_live(&state.pool, ContentKind::Review, target_id)
            .await?
            .is_some_and(|review| review.is_approved),
        ContentKind::JobComment => db::jobs::find_by_id(&state.pool, target_id).await?.is_some(),
    };

    if found {
        Ok(())
    } else {
        let what = match kind {
            ContentKind::Review => "Company",
            ContentKind::ReviewComment => "Review",
            ContentKind::JobComment => "Job",
        };
        Err(AppError::NotFound(format!("{what} not found")))
    }
}

async fn post(
    state: &AppState,
    auth: &AuthUser,
    kind: ContentKind,
    target_id: Uuid,
    content: &str,
) -> Result<ModeratedContent, AppError> {
    ensure_target(state, kind, target_id).await?;
    let item = db::content::create(&state.pool, kind, auth.user_id, target_id, content).await?;
    tracing::info!(
        id = %item.id,
        kind = kind.resource_type(),
        author_id = %auth.user_id,
        "Content submitted for moderation"
    );
    Ok(item)
}

async fn approved(
    state: &AppState,
    kind: ContentKind,
    target_id: Uuid,
    query: PageQuery,
) -> Result<Paginated<ModeratedContent>, AppError> {
    ensure_target(state, kind, target_id).await?;
    let params = PageParams::from(query);
    let (items, total) = db::content::list_approved(&state.pool, kind, target_id, params).await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn create_review(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(company_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ContentRequest>,
) -> Result<ApiResponse<ModeratedContent>, AppError> {
    let review = post(&state, &auth, ContentKind::Review, company_id, &req.content).await?;
    Ok(ApiResponse::created(
        "Review created successfully (pending approval)",
        review,
    ))
}

pub async fn list_reviews(
    State(state): State<SharedState>,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Paginated<ModeratedContent>>, AppError> {
    let page = approved(&state, ContentKind::Review, company_id, query).await?;
    Ok(ApiResponse::ok("Reviews retrieved successfully", page))
}

pub async fn create_review_comment(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(review_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ContentRequest>,
) -> Result<ApiResponse<ModeratedContent>, AppError> {
    let comment = post(&state, &auth, ContentKind::ReviewComment, review_id, &req.content).await?;
    Ok(ApiResponse::created("Comment created successfully", comment))
}

pub async fn list_review_comments(
    State(state): State<SharedState>,
    ApiPath(review_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Paginated<ModeratedContent>>, AppError> {
    let page = approved(&state, ContentKind::ReviewComment, review_id, query).await?;
    Ok(ApiResponse::ok("Comments retrieved successfully", page))
}

pub async fn create_job_comment(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(job_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ContentRequest>,
) -> Result<ApiResponse<ModeratedContent>, AppError> {
    let comment = post(&state, &auth, ContentKind::JobComment, job_id, &req.content).await?;
    Ok(ApiResponse::created("Comment created successfully", comment))
}

pub async fn list_job_comments(
    State(state): State<SharedState>,
    ApiPath(job_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Paginated<ModeratedContent>>, AppError> {
    let page = approved(&state, ContentKind::JobComment, job_id, query).await?;
    Ok(ApiResponse::ok("Comments retrieved successfully", page))
}
