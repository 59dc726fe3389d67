use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable with or without a session and never redirected.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for the load balancer.
        .route("/health", get(|| async { "ok" }))
        // GET /api/auth/signout?callbackUrl=/login
        // Clears the session cookie. Admin sessions found in the customer
        // area are redirected here.
        .route("/api/auth/signout", get(handlers::sign_out))
}
