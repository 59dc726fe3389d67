use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Static Routing Table ---

/// The administrative sign-in page. Always reachable without a session.
pub const LOGIN_PATH: &str = "/admin/login";

/// Every path under this prefix requires an administrative role.
pub const ADMIN_PREFIX: &str = "/admin";

/// Where an administrative session is sent when it wanders into the customer area.
/// The sign-out endpoint clears the session and then lands on the customer login page.
pub const SIGN_OUT_PATH: &str = "/api/auth/signout?callbackUrl=/login";

/// Role
///
/// The closed set of administrative roles a session can carry.
/// An absent or unrecognized claim is represented as `Option::<Role>::None`
/// at the boundary, so there is no "unknown role" case past parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema,
)]
#[ts(export)]
pub enum Role {
    Owner,
    Csr,
    Cleaner,
    Partner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Csr, Role::Cleaner, Role::Partner];

    /// The single canonical landing path for this role.
    pub const fn home(self) -> &'static str {
        match self {
            Role::Owner => "/admin/owners",
            Role::Csr => "/admin/csr",
            Role::Cleaner => "/admin/cleaners",
            Role::Partner => "/admin/partners",
        }
    }

    /// The path segment after `/admin/` owned by this role.
    pub fn area(self) -> &'static str {
        self.home().trim_start_matches("/admin/")
    }

    /// Resolves an `/admin/{area}` segment back to its role.
    pub fn from_area(area: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.area() == area)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Csr => "Csr",
            Role::Cleaner => "Cleaner",
            Role::Partner => "Partner",
        }
    }

    /// Human label used by the dashboard shell header.
    pub const fn portal_name(self) -> &'static str {
        match self {
            Role::Owner => "Owner Portal",
            Role::Csr => "CSR Portal",
            Role::Cleaner => "Cleaner Portal",
            Role::Partner => "Partner Portal",
        }
    }

    /// Parses a raw role claim. Missing, empty, or legacy values all map to `None`.
    pub fn from_claim(claim: Option<&str>) -> Option<Role> {
        claim.and_then(|value| value.parse().ok())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UnknownRole
///
/// Returned when a string does not name one of the four administrative roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(Role::Owner),
            "Csr" => Ok(Role::Csr),
            "Cleaner" => Ok(Role::Cleaner),
            "Partner" => Ok(Role::Partner),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// Used by sqlx to decode the TEXT `role` column.
impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Decision
///
/// The outcome of a single access check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

impl Decision {
    fn redirect(path: &str) -> Self {
        Decision::RedirectTo(path.to_string())
    }
}

/// decide
///
/// The access policy for every page navigation. Pure and total: the same
/// `(path, role)` always yields the same decision, and no input fails.
///
/// 1. The login page bounces a signed-in role to its home, otherwise renders.
/// 2. The admin area requires a role and confines it to paths starting with
///    its home. The match is a raw string prefix, not a segment match.
/// 3. The customer area is closed to administrative sessions, which are
///    sent to the forced sign-out endpoint.
pub fn decide(path: &str, role: Option<Role>) -> Decision {
    if path == LOGIN_PATH {
        return match role {
            Some(role) => Decision::redirect(role.home()),
            None => Decision::Allow,
        };
    }

    if path.starts_with(ADMIN_PREFIX) {
        let Some(role) = role else {
            return Decision::redirect(LOGIN_PATH);
        };
        let home = role.home();
        if !path.starts_with(home) {
            return Decision::redirect(home);
        }
        return Decision::Allow;
    }

    match role {
        Some(_) => Decision::redirect(SIGN_OUT_PATH),
        None => Decision::Allow,
    }
}

/// StoredSession
///
/// The admin user record the UI shell keeps in browser storage after login.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoredSession {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// guard_page
///
/// The UI shell's check before it renders the page owned by `required`.
/// `stored` is the raw stored session, passed in rather than read from ambient storage.
/// Delegates to [`decide`] on the page's home path so both layers share one policy.
pub fn guard_page(stored: Option<&str>, required: Role) -> Decision {
    let role = stored
        .and_then(|raw| serde_json::from_str::<StoredSession>(raw).ok())
        .and_then(|session| Role::from_claim(session.role.as_deref()));

    decide(required.home(), role)
}
