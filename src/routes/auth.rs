use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::auth::cookie::{clear_session_cookies, set_auth_cookie};
use crate::auth::extractor::AuthUser;
use crate::auth::session::{self, AuthResponse};
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::{Role, User};
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "known_role"))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn known_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        ValidationError::new("role")
            .with_message("Role must be one of: developer company admin".into())
    })
}

pub async fn register(
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, ApiResponse<AuthResponse>), AppError> {
    let role: Role = req.role.parse().map_err(AppError::BadRequest)?;

    let auth = session::register(&state, &req.email, &req.password, &req.full_name, role).await?;
    let jar = set_auth_cookie(
        &auth.token,
        state.config.jwt_expiry,
        state.config.secure_cookies(),
    );

    Ok((jar, ApiResponse::created("User registered successfully", auth)))
}

pub async fn login(
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<AuthResponse>), AppError> {
    let auth = session::login(&state, &req.email, &req.password).await?;
    let jar = set_auth_cookie(
        &auth.token,
        state.config.jwt_expiry,
        state.config.secure_cookies(),
    );

    Ok((jar, ApiResponse::ok("Login successful", auth)))
}

pub async fn logout() -> (CookieJar, ApiResponse<()>) {
    (clear_session_cookies(), ApiResponse::message("Logged out successfully"))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ApiResponse<User>, AppError> {
    let user = session::current_user(&state, auth.user_id).await?;
    Ok(ApiResponse::ok("User retrieved successfully", user))
}
