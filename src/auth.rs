use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, StatusCode, header, request::Parts},
};
use cookie::Cookie;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    access::Role,
    config::{AppConfig, Env},
    repository::RepositoryState,
};

/// Name of the cookie the sign-in service stores the session token in.
pub const SESSION_COOKIE: &str = "session";

/// Header accepted in `Env::Local` to impersonate a stored employee.
pub const LOCAL_BYPASS_HEADER: &str = "x-employee-id";

/// Claims
///
/// Payload of the HS256 session token issued by the sign-in service.
/// Only `role` drives routing; it is read and never rewritten.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the employee id, as a string.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Session
///
/// What the access layer knows about the caller. Resolving it never fails:
/// a missing, expired, or malformed token simply yields an anonymous session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub employee_id: Option<i32>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Every session token the request carries, in priority order: the `session`
/// cookie first, then a Bearer header.
pub fn candidate_tokens(headers: &HeaderMap) -> Vec<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    extract_cookie(headers, SESSION_COOKIE)
        .into_iter()
        .chain(bearer)
        .collect()
}

/// Pulls the session token from the `session` cookie, falling back to a Bearer header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    candidate_tokens(headers).into_iter().next()
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(cookie_str) = header_value.to_str() else {
            continue;
        };
        for piece in cookie_str.split(';') {
            if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                if c.name() == name && !c.value().is_empty() {
                    return Some(c.value().to_string());
                }
            }
        }
    }
    None
}

/// Set-Cookie value that expires the session cookie immediately.
pub fn clear_session_cookie() -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build()
        .to_string()
}

/// Validates `token` against `secret` and returns its claims.
pub fn decode_claims(token: &str, secret: &str) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!("Rejected session token: {:?}", e.kind());
            None
        }
    }
}

/// Session Extractor Implementation
///
/// Resolution steps:
/// 1. Dependency Resolution: reads `AppConfig` (and the repository, for the bypass) from state.
/// 2. Local Bypass: in `Env::Local`, an `x-employee-id` header naming a stored
///    employee yields that employee's role.
/// 3. Token Collection: the `session` cookie, then the Bearer header.
/// 4. Token Validation: the first candidate that verifies wins, so a stale
///    cookie does not hide a valid Bearer token.
/// 5. Role Mapping: the `role` claim goes through `Role::from_claim`; unknown
///    values leave the session without a role.
///
/// Rejection: none. Any failure resolves to `Session::anonymous()`.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let config = AppConfig::from_ref(state);

        // 2. Local Development Bypass Check
        if config.env == Env::Local {
            let bypass_id = parts
                .headers
                .get(LOCAL_BYPASS_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<i32>().ok());

            if let Some(id) = bypass_id {
                let repo = RepositoryState::from_ref(state);
                if let Some(employee) = repo.get_employee(id).await {
                    return Ok(Session {
                        employee_id: Some(employee.id),
                        role: Some(employee.role),
                        name: Some(employee.full_name()),
                        email: Some(employee.email),
                    });
                }
            }
        }

        // 3. & 4. Token Collection and Validation
        let claims = candidate_tokens(&parts.headers)
            .iter()
            .find_map(|token| decode_claims(token, &config.jwt_secret));

        let Some(claims) = claims else {
            return Ok(Session::anonymous());
        };

        // 5. Role Mapping
        Ok(Session {
            employee_id: claims.sub.parse().ok(),
            role: Role::from_claim(claims.role.as_deref()),
            name: claims.name,
            email: claims.email,
        })
    }
}

/// AuthEmployee
///
/// A session that carries a recognized administrative role. Used by the JSON
/// API, where an anonymous caller gets a 401 instead of a redirect.
#[derive(Debug, Clone)]
pub struct AuthEmployee {
    pub employee_id: Option<i32>,
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// AuthEmployee Extractor Implementation
///
/// 1. Session Resolution: delegates to the `Session` extractor, so cookies,
///    Bearer tokens and the local bypass behave identically here.
/// 2. Role Check: a session without a recognized role is rejected.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) when no role resolves.
impl<S> FromRequestParts<S> for AuthEmployee
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Session Resolution
        let session = Session::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        // 2. Role Check
        let role = session.role.ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthEmployee {
            employee_id: session.employee_id,
            role,
            name: session.name,
            email: session.email,
        })
    }
}
