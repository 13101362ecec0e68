use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::jobs::NewJob;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::{JobPost, Role};
use crate::response::ApiResponse;
use crate::state::SharedState;

const WORK_MODES: [&str; 4] = ["office", "onsite", "hybrid", "remote"];

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "ranges_are_ordered", skip_on_field_errors = true))]
pub struct CreateJobRequest {
    /// Required for admins, ignored for company users.
    pub company_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary_min: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary_max: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience_min_years: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience_max_years: i32,
    #[serde(default)]
    #[validate(custom(function = "known_work_mode"))]
    pub work_mode: String,
    #[serde(default)]
    pub location: String,
}

fn known_work_mode(mode: &str) -> Result<(), ValidationError> {
    if mode.is_empty() || WORK_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(ValidationError::new("work_mode")
            .with_message("Work mode must be one of: office onsite hybrid remote".into()))
    }
}

fn ranges_are_ordered(req: &CreateJobRequest) -> Result<(), ValidationError> {
    if req.salary_min > req.salary_max {
        return Err(ValidationError::new("salary_range")
            .with_message("salary_min cannot exceed salary_max".into()));
    }
    if req.experience_min_years > req.experience_max_years {
        return Err(ValidationError::new("experience_range")
            .with_message("experience_min_years cannot exceed experience_max_years".into()));
    }
    Ok(())
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> Result<ApiResponse<JobPost>, AppError> {
    auth.require_any(&[Role::Company, Role::Admin])?;

    let company_id = if auth.is_admin() {
        let id = req.company_id.ok_or_else(|| {
            AppError::BadRequest("company_id is required when posting as admin".to_string())
        })?;
        db::companies::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?
            .id
    } else {
        db::companies::find_by_user(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("User must have a company profile to post jobs".to_string())
            })?
            .id
    };

    let job = db::jobs::create(
        &state.pool,
        company_id,
        &NewJob {
            title: &req.title,
            description: &req.description,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            experience_min_years: req.experience_min_years,
            experience_max_years: req.experience_max_years,
            work_mode: &req.work_mode,
            location: &req.location,
        },
    )
    .await?;

    tracing::info!(job_id = %job.id, %company_id, "Job post created");

    Ok(ApiResponse::created("Job created successfully", job))
}
