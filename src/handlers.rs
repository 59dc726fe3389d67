use crate::{
    AppState,
    access::Role,
    auth::{AuthEmployee, Session, clear_session_cookie},
    dashboard::{self, CustomerPage, DashboardShell, LoginPage, Panel},
    models::{
        ApiResponse, CreateEmployeeRequest, Employee, EmployeeProfile, PresignedUrlRequest,
        PresignedUrlResponse,
    },
    storage::AVATAR_CONTENT_TYPES,
};
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

// --- Query Structs ---

/// EmployeeFilter
///
/// Query parameters for `GET /api/employees`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EmployeeFilter {
    /// Restricts the listing to one role.
    #[param(value_type = Option<String>, example = "Csr")]
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct SignOutParams {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

// --- Page Handlers (behind the access middleware) ---

/// [Page] The admin sign-in form. Signed-in roles never reach it.
pub async fn login_page() -> Json<LoginPage> {
    Json(dashboard::login_page())
}

/// [Page] A role's landing page: the dashboard shell on the bookings panel.
pub async fn admin_home(
    session: Session,
    Path(area): Path<String>,
) -> Result<Json<DashboardShell>, StatusCode> {
    let role = Role::from_area(&area).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(dashboard::dashboard_shell(role, Panel::Bookings, &session)))
}

/// [Page] One sidebar section of a role's dashboard.
pub async fn admin_panel(
    session: Session,
    Path((area, panel)): Path<(String, String)>,
) -> Response {
    let Some(role) = Role::from_area(&area) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match panel.as_str() {
        "notifications" => Json(dashboard::notification_feed(role, &session)).into_response(),
        "messages" => Json(dashboard::message_feed(role, &session)).into_response(),
        slug => match Panel::from_slug(slug) {
            Some(panel) => Json(dashboard::panel_view(role, panel, &session)).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
    }
}

/// [Page] Customer-facing pages. Placeholders; the storefront lives elsewhere.
pub async fn customer_page(OriginalUri(uri): OriginalUri) -> Json<CustomerPage> {
    let path = uri.path();
    let page = path
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("home");
    Json(dashboard::customer_page(page, path))
}

// --- Session Handlers ---

/// Accepts only local absolute paths as post-logout destinations.
///
/// Browsers treat `\` like `/`, so `/\host` is rejected along with `//host`.
fn safe_callback(callback: Option<&str>) -> &str {
    match callback {
        Some(path) if is_local_path(path) => path,
        _ => "/login",
    }
}

fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") {
        return false;
    }
    if path.chars().any(|c| c == '\\' || c.is_control()) {
        return false;
    }
    match path.parse::<Uri>() {
        Ok(uri) => uri.scheme().is_none() && uri.authority().is_none(),
        Err(_) => false,
    }
}

/// sign_out
///
/// [Public Route] Forced sign-out target. Expires the session cookie and
/// sends the browser on to `callbackUrl`.
pub async fn sign_out(Query(params): Query<SignOutParams>) -> Response {
    let destination = safe_callback(params.callback_url.as_deref());
    tracing::info!("Signing out session, continuing to {}", destination);

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to(destination),
    )
        .into_response()
}

// --- Employee API ---

/// create_employee
///
/// [Authenticated Route] Inserts a new employee record. Owners and CSRs only.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<Employee>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Role may not create employees"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_employee(
    AuthEmployee { role, .. }: AuthEmployee,
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> (StatusCode, Json<ApiResponse<Employee>>) {
    if !matches!(role, Role::Owner | Role::Csr) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::failure("Not allowed to create employees")),
        );
    }

    if let Err(reason) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(reason)));
    }

    match state.repo.create_employee(payload).await {
        Ok(employee) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(employee, "Employee created successfully")),
        ),
        Err(e) => {
            tracing::error!("Error creating employee: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(format!("Failed to create employee: {}", e))),
            )
        }
    }
}

/// list_employees
///
/// [Authenticated Route] Lists employees, optionally filtered by role.
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilter),
    responses((status = 200, description = "Employees", body = [Employee]))
)]
pub async fn list_employees(
    _employee: AuthEmployee,
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Json<Vec<Employee>> {
    Json(state.repo.list_employees(filter.role).await)
}

/// get_employee_profile
///
/// [Authenticated Route] The extended profile the dashboard loads on demand.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Profile", body = EmployeeProfile),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_employee_profile(
    _employee: AuthEmployee,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeProfile>, StatusCode> {
    match state.repo.get_employee(id).await {
        Some(employee) => Ok(Json(employee.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_me
///
/// [Authenticated Route] The signed-in employee's profile. Falls back to the
/// token's own claims when the subject has no stored record.
#[utoipa::path(
    get,
    path = "/api/me",
    responses((status = 200, description = "Profile", body = EmployeeProfile))
)]
pub async fn get_me(
    employee: AuthEmployee,
    State(state): State<AppState>,
) -> Json<EmployeeProfile> {
    if let Some(id) = employee.employee_id {
        if let Some(stored) = state.repo.get_employee(id).await {
            return Json(stored.into());
        }
    }

    Json(EmployeeProfile {
        id: employee.employee_id,
        name: employee.name.unwrap_or_else(|| "Not specified".to_string()),
        email: employee.email.unwrap_or_else(|| "Not specified".to_string()),
        role: employee.role,
        employment_id: None,
        department: None,
        picture: None,
    })
}

/// get_avatar_upload_url
///
/// [Authenticated Route] Presigned upload URL for a new profile photo.
#[utoipa::path(
    post,
    path = "/api/me/avatar",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "URL", body = PresignedUrlResponse),
        (status = 400, description = "Unsupported image type")
    )
)]
pub async fn get_avatar_upload_url(
    employee: AuthEmployee,
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Response {
    if !AVATAR_CONTENT_TYPES.contains(&payload.file_type.as_str()) {
        return (StatusCode::BAD_REQUEST, "Unsupported image type").into_response();
    }

    let extension = std::path::Path::new(&payload.filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("bin");
    let owner = employee
        .employee_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unassigned".to_string());
    let object_key = format!("avatars/{}/{}.{}", owner, Uuid::new_v4(), extension);

    match state
        .storage
        .presign_avatar_upload(&object_key, &payload.file_type)
        .await
    {
        Ok(url) => (
            StatusCode::OK,
            Json(PresignedUrlResponse {
                upload_url: url,
                resource_key: object_key,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Storage error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed").into_response()
        }
    }
}
