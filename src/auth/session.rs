//! Registration, login and identity lookup. Stateless: every call stands alone
//! and the token is the only session artifact.

use serde::Serialize;
use uuid::Uuid;

use crate::auth::{jwt, password};
use crate::db;
use crate::error::{AppError, conflict_on_unique};
use crate::models::{Role, User};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "invalid email or password";
const DUPLICATE_EMAIL: &str = "user with this email already exists";

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

pub async fn register(
    state: &AppState,
    email: &str,
    plaintext: &str,
    full_name: &str,
    role: Role,
) -> Result<AuthResponse, AppError> {
    if db::users::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
    }

    let pw_hash = password::hash(plaintext).map_err(AppError::Internal)?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = db::users::create(&state.pool, email, &pw_hash, full_name, role)
        .await
        .map_err(conflict_on_unique(DUPLICATE_EMAIL))?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    let token = issue_for(state, &user)?;
    Ok(AuthResponse { token, user })
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(state: &AppState, email: &str, plaintext: &str) -> Result<AuthResponse, AppError> {
    if state.login_limiter.check(email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = match db::users::find_by_email(&state.pool, email).await? {
        Some(user) if password::verify(plaintext, &user.password_hash) => user,
        _ => {
            state.login_limiter.record_failure(email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    let token = issue_for(state, &user)?;
    Ok(AuthResponse { token, user })
}

pub async fn current_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn issue_for(state: &AppState, user: &User) -> Result<String, AppError> {
    jwt::issue(
        user.id,
        &user.email,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry,
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}
