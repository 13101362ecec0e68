use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::companies::NewCompany;
use crate::error::{AppError, conflict_on_unique};
use crate::extract::{ApiPath, ValidatedJson};
use crate::models::{CompanyProfile, CompanyRating, Role};
use crate::response::ApiResponse;
use crate::state::SharedState;

const DUPLICATE_PROFILE: &str = "User already has a company profile";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Website is too long"))]
    pub website: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RateCompanyRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<CreateCompanyRequest>,
) -> Result<ApiResponse<CompanyProfile>, AppError> {
    auth.require_any(&[Role::Company, Role::Admin])?;

    if db::companies::find_by_user(&state.pool, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(DUPLICATE_PROFILE.to_string()));
    }

    let company = db::companies::create(
        &state.pool,
        auth.user_id,
        &NewCompany {
            company_name: &req.company_name,
            description: &req.description,
            website: &req.website,
            location: &req.location,
        },
    )
    .await
    .map_err(conflict_on_unique(DUPLICATE_PROFILE))?;

    tracing::info!(company_id = %company.id, user_id = %auth.user_id, "Company profile created");

    Ok(ApiResponse::created("Company created successfully", company))
}

pub async fn rate(
    auth: AuthUser,
    State(state): State<SharedState>,
    ApiPath(company_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<RateCompanyRequest>,
) -> Result<ApiResponse<CompanyRating>, AppError> {
    db::companies::find_by_id(&state.pool, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let (rating, inserted) =
        db::companies::upsert_rating(&state.pool, company_id, auth.user_id, req.rating).await?;

    if inserted {
        Ok(ApiResponse::created("Rating created successfully", rating))
    } else {
        Ok(ApiResponse::ok("Rating updated successfully", rating))
    }
}
