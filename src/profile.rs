//! Client-side profile loading for the dashboard's profile page.
//!
//! The viewed profile can change while a fetch is in flight; starting a new
//! load aborts the previous one so a stale response never replaces a newer one.

use reqwest::StatusCode;
use tokio::task::{AbortHandle, JoinHandle};

use crate::models::EmployeeProfile;

/// ProfileView
///
/// What the profile page shows once a fetch settles.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    Loaded(EmployeeProfile),
    /// Inline, user-facing error text.
    Failed(String),
}

/// ProfileLoader
///
/// Fetches `GET {base_url}/api/employees/{id}` with the caller's session token.
pub struct ProfileLoader {
    client: reqwest::Client,
    base_url: String,
    token: String,
    in_flight: Option<AbortHandle>,
}

impl ProfileLoader {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            in_flight: None,
        }
    }

    /// load
    ///
    /// Starts fetching profile `id`, aborting any fetch still running.
    /// Awaiting an aborted handle yields a cancelled `JoinError`.
    pub fn load(&mut self, id: i32) -> JoinHandle<ProfileView> {
        self.cancel();

        let client = self.client.clone();
        let url = format!("{}/api/employees/{}", self.base_url, id);
        let token = self.token.clone();

        let handle = tokio::spawn(async move { fetch_profile(client, url, token).await });
        self.in_flight = Some(handle.abort_handle());
        handle
    }

    /// Aborts the in-flight fetch, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Aborting stale profile fetch");
                previous.abort();
            }
        }
    }
}

async fn fetch_profile(client: reqwest::Client, url: String, token: String) -> ProfileView {
    let response = match client.get(&url).bearer_auth(token).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Profile fetch failed: {}", e);
            return ProfileView::Failed("Unable to reach the server. Please try again.".to_string());
        }
    };

    match response.status() {
        StatusCode::OK => match response.json::<EmployeeProfile>().await {
            Ok(profile) => ProfileView::Loaded(profile),
            Err(e) => {
                tracing::warn!("Profile response could not be decoded: {}", e);
                ProfileView::Failed("Received an unexpected profile response.".to_string())
            }
        },
        StatusCode::UNAUTHORIZED => {
            ProfileView::Failed("Your session has expired. Please sign in again.".to_string())
        }
        StatusCode::NOT_FOUND => ProfileView::Failed("Profile not found.".to_string()),
        status => {
            tracing::warn!("Profile fetch returned {}", status);
            ProfileView::Failed(format!("Failed to load profile ({}).", status.as_u16()))
        }
    }
}
