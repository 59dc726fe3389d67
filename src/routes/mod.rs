/// Router Module Index
///
/// Routes are grouped by how access is enforced. Page routers sit behind the
/// access middleware, which redirects; the API router answers 401/403 instead.

/// Health check and the sign-out endpoint. No session required.
pub mod public;

/// Admin dashboard pages under `/admin`, confined per role by the access middleware.
pub mod admin;

/// Customer-facing pages. Open to anonymous visitors, closed to admin sessions.
pub mod customer;

/// JSON API for employee records and the signed-in profile.
pub mod api;
