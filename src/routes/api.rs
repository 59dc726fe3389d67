use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// API Router Module
///
/// JSON endpoints used by the dashboard. Each handler takes an `AuthEmployee`,
/// so a request without a recognized role is rejected with 401 before any
/// work is done. Per-role restrictions (e.g. who may create employees) live in
/// the handlers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /api/employees?role=Csr
        // POST /api/employees
        // Staff directory and onboarding of new employee records.
        .route(
            "/api/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        // GET /api/employees/{id}
        // Extended profile, loaded on demand by the profile page.
        .route("/api/employees/{id}", get(handlers::get_employee_profile))
        // GET /api/me
        .route("/api/me", get(handlers::get_me))
        // POST /api/me/avatar
        // Presigned upload URL for a new profile photo.
        .route("/api/me/avatar", post(handlers::get_avatar_upload_url))
}
