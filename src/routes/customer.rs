use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Customer Router Module
///
/// The storefront paths the access middleware watches. Anonymous visitors
/// and customers pass; administrative sessions are signed out.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::customer_page))
        .route("/rooms", get(handlers::customer_page))
        .route("/rooms/{*rest}", get(handlers::customer_page))
        .route("/bookings", get(handlers::customer_page))
        .route("/bookings/{*rest}", get(handlers::customer_page))
}
