mod common;

use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use common::{MemoryRepo, app_state, employee, token};
use csr_portal::{
    access::Role,
    auth::{AuthEmployee, LOCAL_BYPASS_HEADER, SESSION_COOKIE, Session, candidate_tokens, extract_token},
    config::Env,
    storage::MockStorageService,
};

fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn bearer(parts: &mut Parts, token: &str) {
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
}

// --- Session (never rejects) ---

#[tokio::test]
async fn test_session_from_valid_bearer_token() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/admin/csr".parse().unwrap());
    bearer(&mut parts, &token("12", Some("Csr"), 3600));

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, Some(Role::Csr));
    assert_eq!(session.employee_id, Some(12));
    assert_eq!(session.email.as_deref(), Some("test@staycation.com"));
}

#[tokio::test]
async fn test_session_from_cookie_takes_precedence() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::COOKIE,
        header::HeaderValue::from_str(&format!(
            "theme=dark; {}={}",
            SESSION_COOKIE,
            token("4", Some("Owner"), 3600)
        ))
        .unwrap(),
    );
    bearer(&mut parts, &token("5", Some("Cleaner"), 3600));

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, Some(Role::Owner));
    assert_eq!(session.employee_id, Some(4));
}

#[tokio::test]
async fn test_session_falls_back_to_bearer_when_cookie_is_stale() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());

    for stale in ["not-a-jwt".to_string(), token("4", Some("Owner"), -3600)] {
        let mut parts = get_request_parts(Method::GET, "/admin/csr".parse().unwrap());
        parts.headers.insert(
            header::COOKIE,
            header::HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, stale)).unwrap(),
        );
        bearer(&mut parts, &token("12", Some("Csr"), 3600));

        let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(session.role, Some(Role::Csr));
        assert_eq!(session.employee_id, Some(12));
    }
}

#[tokio::test]
async fn test_session_without_token_is_anonymous() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/admin/owners".parse().unwrap());

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session, Session::anonymous());
}

#[tokio::test]
async fn test_session_with_unknown_role_claim_has_no_role() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    bearer(&mut parts, &token("9", Some("SuperAdmin"), 3600));

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, None);
    assert_eq!(session.employee_id, Some(9));
}

#[tokio::test]
async fn test_session_with_expired_token_is_anonymous() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    // Well beyond the default validation leeway.
    bearer(&mut parts, &token("1", Some("Owner"), -3600));

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, None);
}

#[tokio::test]
async fn test_session_with_wrong_signature_is_anonymous() {
    let mut state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    state.config.jwt_secret = "a-different-secret".to_string();
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    bearer(&mut parts, &token("1", Some("Owner"), 3600));

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, None);
}

#[tokio::test]
async fn test_session_with_garbage_token_is_anonymous() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    bearer(&mut parts, "not-a-jwt");

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session, Session::anonymous());
}

// --- Local Bypass ---

#[tokio::test]
async fn test_local_bypass_resolves_stored_role() {
    let repo = MemoryRepo::with(vec![employee(21, "Paolo", Role::Partner)]);
    let state = app_state(Env::Local, repo, MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/admin/partners".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static(LOCAL_BYPASS_HEADER),
        header::HeaderValue::from_static("21"),
    );

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, Some(Role::Partner));
    assert_eq!(session.employee_id, Some(21));
    assert_eq!(session.name.as_deref(), Some("Paolo Reyes"));
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let repo = MemoryRepo::with(vec![employee(21, "Paolo", Role::Partner)]);
    let state = app_state(Env::Production, repo, MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/admin/partners".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static(LOCAL_BYPASS_HEADER),
        header::HeaderValue::from_static("21"),
    );

    let session = Session::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(session.role, None);
}

// --- AuthEmployee (rejects) ---

#[tokio::test]
async fn test_auth_employee_requires_a_role() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());

    let mut anonymous = get_request_parts(Method::GET, "/api/me".parse().unwrap());
    let rejected = AuthEmployee::from_request_parts(&mut anonymous, &state).await;
    assert_eq!(rejected.unwrap_err(), StatusCode::UNAUTHORIZED);

    let mut roleless = get_request_parts(Method::GET, "/api/me".parse().unwrap());
    bearer(&mut roleless, &token("3", None, 3600));
    let rejected = AuthEmployee::from_request_parts(&mut roleless, &state).await;
    assert_eq!(rejected.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_employee_success() {
    let state = app_state(Env::Production, MemoryRepo::default(), MockStorageService::new());
    let mut parts = get_request_parts(Method::GET, "/api/me".parse().unwrap());
    bearer(&mut parts, &token("3", Some("Cleaner"), 3600));

    let employee = AuthEmployee::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    assert_eq!(employee.role, Role::Cleaner);
    assert_eq!(employee.employee_id, Some(3));
}

#[test]
fn test_extract_token_ignores_empty_cookie() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(header::COOKIE, "session=".parse().unwrap());
    headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());

    assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
}

#[test]
fn test_candidate_tokens_lists_cookie_before_bearer() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(header::COOKIE, "theme=dark; session=from-cookie".parse().unwrap());
    headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());

    assert_eq!(candidate_tokens(&headers), vec!["from-cookie", "from-header"]);
}
