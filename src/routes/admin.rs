use crate::{AppState, access::LOGIN_PATH, handlers};
use axum::{Router, http::StatusCode, response::Redirect, routing::get};

/// Admin Router Module
///
/// The dashboard pages. Every route here is wrapped by the access middleware,
/// so a handler only runs once the session's role owns the requested area.
///
/// The middleware is a `route_layer` and never sees unmatched paths, so the
/// router claims the whole `/admin/...` tree. Paths with no page behind them
/// answer 404 once the access decision has let them through.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        // Bare prefix. The middleware always redirects before this runs.
        .route("/admin", get(|| async { Redirect::temporary(LOGIN_PATH) }))
        .route("/admin/", get(|| async { Redirect::temporary(LOGIN_PATH) }))
        // GET /admin/login
        // Sign-in form for anonymous visitors.
        .route("/admin/login", get(handlers::login_page))
        // GET /admin/{area}
        // Role landing page (owners, csr, cleaners, partners).
        .route("/admin/{area}", get(handlers::admin_home))
        .route("/admin/{area}/", get(handlers::admin_home))
        // GET /admin/{area}/{panel}
        // Sidebar sections plus the notifications and messages feeds.
        .route("/admin/{area}/{panel}", get(handlers::admin_panel))
        .route("/admin/{area}/{panel}/", get(handlers::admin_panel))
        // Anything deeper has no page.
        .route(
            "/admin/{area}/{panel}/{*rest}",
            get(|| async { StatusCode::NOT_FOUND }),
        )
}
