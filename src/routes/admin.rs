use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::stats::PlatformStats;
use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::audit;
use crate::moderation::{self, ContentAction, ContentKind, ContentState, ModerationError};
use crate::models::{AuditEvent, ModeratedContent, Report, ReportStatus, Role, User};
use crate::response::{ApiResponse, PageParams, PageQuery, Paginated};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReportStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Blank filter values mean "no filter".
fn filter_value(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn stats(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ApiResponse<PlatformStats>, AppError> {
    auth.require_admin()?;
    let stats = db::stats::platform(&state.pool).await?;
    Ok(ApiResponse::ok("Statistics retrieved successfully", stats))
}

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<ApiResponse<Paginated<User>>, AppError> {
    auth.require_admin()?;

    let role = filter_value(query.role)
        .map(|r| r.parse::<Role>())
        .transpose()
        .map_err(AppError::BadRequest)?;
    let params = PageParams::from(query.page);

    let (users, total) = db::users::list(&state.pool, role, params).await?;
    Ok(ApiResponse::ok(
        "Users retrieved successfully",
        Paginated::new(users, total, params),
    ))
}

pub async fn delete_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    auth.require_admin()?;

    if id == auth.user_id {
        return Err(AppError::BadRequest(
            "Admins cannot delete their own account".to_string(),
        ));
    }

    if !db::users::soft_delete(&state.pool, id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = %id, admin_id = %auth.user_id, "User soft-deleted");
    audit::log_event(&state.pool, Some(auth.user_id), "user.deleted", "user", Some(id), None).await;

    Ok(ApiResponse::message("User deleted successfully"))
}

pub async fn list_pending(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(kind): ApiPath<ContentKind>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Paginated<ModeratedContent>>, AppError> {
    auth.require_admin()?;

    let params = PageParams::from(query);
    let (items, total) = db::content::list_pending(&state.pool, kind, params).await?;
    Ok(ApiResponse::ok(
        format!("Pending {}s retrieved successfully", kind.label().to_lowercase()),
        Paginated::new(items, total, params),
    ))
}

pub async fn approve_content(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath((kind, id)): ApiPath<(ContentKind, Uuid)>,
) -> Result<ApiResponse<ModeratedContent>, AppError> {
    auth.require_admin()?;

    let current = db::content::find_live(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label())))?;

    let next = moderation::transition(kind, ContentState::of(&current), ContentAction::Approve)?;
    let approved = match next {
        None => current,
        Some(_) => {
            let approved = db::content::approve(&state.pool, kind, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label())))?;

            tracing::info!(
                id = %id,
                kind = kind.resource_type(),
                admin_id = %auth.user_id,
                "Content approved"
            );
            audit::log_event(
                &state.pool,
                Some(auth.user_id),
                "content.approved",
                kind.resource_type(),
                Some(id),
                None,
            )
            .await;
            approved
        }
    };

    Ok(ApiResponse::ok(
        format!("{} approved successfully", kind.label()),
        approved,
    ))
}

pub async fn remove_content(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath((kind, id)): ApiPath<(ContentKind, Uuid)>,
) -> Result<ApiResponse<()>, AppError> {
    auth.require_admin()?;

    let current = db::content::find_live(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label())))?;

    moderation::transition(kind, ContentState::of(&current), ContentAction::Remove)?;

    // An approval may land between the load and the update.
    if !db::content::remove_pending(&state.pool, kind, id).await? {
        return Err(ModerationError::AlreadyApproved(kind.label()).into());
    }

    tracing::info!(
        id = %id,
        kind = kind.resource_type(),
        admin_id = %auth.user_id,
        "Content removed"
    );
    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "content.removed",
        kind.resource_type(),
        Some(id),
        None,
    )
    .await;

    Ok(ApiResponse::message(format!(
        "{} rejected successfully",
        kind.label()
    )))
}

pub async fn list_reports(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<ReportListQuery>,
) -> Result<ApiResponse<Paginated<Report>>, AppError> {
    auth.require_admin()?;

    let status = filter_value(query.status)
        .map(|s| s.parse::<ReportStatus>())
        .transpose()
        .map_err(AppError::BadRequest)?;
    let report_type = filter_value(query.report_type);
    let params = PageParams::from(query.page);

    let (reports, total) =
        db::reports::list(&state.pool, status, report_type.as_deref(), params).await?;
    Ok(ApiResponse::ok(
        "Reports retrieved successfully",
        Paginated::new(reports, total, params),
    ))
}

pub async fn get_report(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiResponse<Report>, AppError> {
    auth.require_admin()?;

    let report = db::reports::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
    Ok(ApiResponse::ok("Report retrieved successfully", report))
}

pub async fn update_report_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateReportStatusRequest>,
) -> Result<ApiResponse<Report>, AppError> {
    auth.require_admin()?;

    let status: ReportStatus = req.status.parse().map_err(|_| {
        AppError::Validation(
            [(
                "status".to_string(),
                "Status must be one of: reviewed resolved dismissed".to_string(),
            )]
            .into(),
        )
    })?;

    let report = db::reports::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    let reviewed = moderation::review_report(&report, status, auth.user_id, Utc::now())?;
    let saved = db::reports::save_review(&state.pool, &reviewed).await?;

    tracing::info!(
        report_id = %id,
        from = report.status.as_str(),
        to = saved.status.as_str(),
        admin_id = %auth.user_id,
        "Report status updated"
    );
    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "report.status_updated",
        "report",
        Some(id),
        Some(serde_json::json!({ "from": report.status, "to": saved.status })),
    )
    .await;

    Ok(ApiResponse::ok("Report status updated successfully", saved))
}

pub async fn list_audit(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Paginated<AuditEvent>>, AppError> {
    auth.require_admin()?;

    let params = PageParams::from(query);
    let (events, total) = db::audit::list(&state.pool, params).await?;
    Ok(ApiResponse::ok(
        "Audit events retrieved successfully",
        Paginated::new(events, total, params),
    ))
}
