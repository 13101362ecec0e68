use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

/// Everything a handler may touch, built once in `build_app`.
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub login_limiter: LoginRateLimiter,
}
