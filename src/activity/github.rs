use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::activity::{ActivityEvent, ActivitySource, RawEvent};
use crate::error::{truncate_body, PulseError};

const USER_AGENT: &str = concat!("readme-pulse/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Public-events client for the GitHub REST API.
pub struct GitHubSource {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    login: String,
}

impl GitHubSource {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PulseError> {
        let url = format!("{}{}", self.api_base, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| PulseError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::Fetch(format!(
                "GET {} returned {}: {}",
                url,
                status,
                truncate_body(&body)
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| PulseError::Fetch(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl ActivitySource for GitHubSource {
    async fn resolve_login(&self, username: &str) -> Result<String, PulseError> {
        let profile: UserProfile = self.get_json(&format!("/users/{}", username), &[]).await?;
        Ok(profile.login)
    }

    async fn public_events(
        &self,
        login: &str,
        limit: u32,
    ) -> Result<Vec<ActivityEvent>, PulseError> {
        let raw: Vec<RawEvent> = self
            .get_json(
                &format!("/users/{}/events/public", login),
                &[("per_page", limit.to_string())],
            )
            .await?;
        Ok(raw.into_iter().map(ActivityEvent::from).collect())
    }
}
