pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod moderation;
pub mod rate_limit;
pub mod response;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::password;
use crate::config::{AdminSeed, Config};
use crate::middleware::recover::handle_panic;
use crate::models::Role;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        login_limiter: LoginRateLimiter::new(),
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

/// Create the configured admin account unless an admin already exists.
/// Returns whether an account was created.
pub async fn seed_admin(pool: &PgPool, seed: &AdminSeed) -> Result<bool, error::AppError> {
    if db::users::admin_exists(pool).await? {
        return Ok(false);
    }

    let pw_hash = password::hash(&seed.password).map_err(error::AppError::Internal)?;
    let user = db::users::create(pool, &seed.email, &pw_hash, "Administrator", Role::Admin)
        .await
        .map_err(error::conflict_on_unique("admin email is already registered"))?;

    tracing::info!(user_id = %user.id, "Seeded admin account");
    Ok(true)
}

async fn health() -> &'static str {
    "ok"
}
