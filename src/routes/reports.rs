use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::Report;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub reported_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Report type is required"))]
    pub report_type: String,
    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<CreateReportRequest>,
) -> Result<ApiResponse<Report>, AppError> {
    if req.reported_id == auth.user_id {
        return Err(AppError::BadRequest("You cannot report yourself".to_string()));
    }

    db::users::find_by_id(&state.pool, req.reported_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reported user not found".to_string()))?;

    let report = db::reports::create(
        &state.pool,
        auth.user_id,
        req.reported_id,
        &req.report_type,
        &req.description,
    )
    .await?;

    tracing::info!(report_id = %report.id, reporter_id = %auth.user_id, "Report filed");

    Ok(ApiResponse::created("Report submitted successfully", report))
}
