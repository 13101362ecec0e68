pub mod admin;
pub mod auth;
pub mod companies;
pub mod content;
pub mod jobs;
pub mod reports;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        // Companies
        .route("/api/v1/companies", post(companies::create))
        .route("/api/v1/companies/{id}/ratings", post(companies::rate))
        .route(
            "/api/v1/companies/{id}/reviews",
            get(content::list_reviews).post(content::create_review),
        )
        .route(
            "/api/v1/reviews/{id}/comments",
            get(content::list_review_comments).post(content::create_review_comment),
        )
        // Jobs
        .route("/api/v1/jobs", post(jobs::create))
        .route(
            "/api/v1/jobs/{id}/comments",
            get(content::list_job_comments).post(content::create_job_comment),
        )
        // Reports
        .route("/api/v1/reports", post(reports::create))
        // Admin
        .route("/api/v1/admin/stats", get(admin::stats))
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/{id}", delete(admin::delete_user))
        .route(
            "/api/v1/admin/moderation/{kind}/pending",
            get(admin::list_pending),
        )
        .route(
            "/api/v1/admin/moderation/{kind}/{id}/approve",
            put(admin::approve_content),
        )
        .route(
            "/api/v1/admin/moderation/{kind}/{id}",
            delete(admin::remove_content),
        )
        .route("/api/v1/admin/reports", get(admin::list_reports))
        .route("/api/v1/admin/reports/{id}", get(admin::get_report))
        .route(
            "/api/v1/admin/reports/{id}/status",
            put(admin::update_report_status),
        )
        .route("/api/v1/admin/audit", get(admin::list_audit))
}
