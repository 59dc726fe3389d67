use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, HeaderValue, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Access policy: the role table and the shared decision function.
pub mod access;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod repository;
pub mod storage;

pub mod routes;
use access::Decision;
use auth::Session;
use routes::{admin, api, customer, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// OpenAPI document for the JSON API, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_employee, handlers::list_employees, handlers::get_employee_profile,
        handlers::get_me, handlers::get_avatar_upload_url
    ),
    components(
        schemas(
            models::Employee, models::CreateEmployeeRequest, models::EmployeeProfile,
            models::PresignedUrlRequest, models::PresignedUrlResponse, access::Role,
        )
    ),
    tags(
        (name = "csr-portal", description = "Staycation Haven admin portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub storage: StorageState,
    pub config: AppConfig,
}

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// access_middleware
///
/// Runs `access::decide` for every page navigation before the handler.
/// A redirect decision short-circuits with a 307; an allowed page is served
/// with caching disabled so a back-button never shows another role's page.
async fn access_middleware(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    tracing::debug!(path = %path, role = ?session.role, "Access check");

    match access::decide(&path, session.role) {
        Decision::RedirectTo(target) => {
            tracing::info!(path = %path, role = ?session.role, "Redirecting to {}", target);
            Redirect::temporary(&target).into_response()
        }
        Decision::Allow => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
            );
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
            response
        }
    }
}

/// create_router
///
/// Assembles the routers, the access middleware, and the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // Pages: every navigation passes through the access decision first.
    let pages = admin::admin_routes()
        .merge(customer::customer_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ));

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(pages)
        .merge(api::api_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Span for `TraceLayer`, tagged with the request id so log lines correlate.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
