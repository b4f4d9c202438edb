pub mod github;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;

use crate::config::TimeWindow;
use crate::error::PulseError;

/// One public action by a user, reduced to what reporting needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub kind: EventKind,
    /// Full `owner/name` of the repository.
    pub repo: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push { commits: usize },
    Create { ref_type: String },
    Issues { action: String },
    PullRequest { action: String },
    Watch,
    Fork,
    Release,
    Other { name: String },
}

impl EventKind {
    /// Payload fields that are missing or of the wrong shape fall back to
    /// empty values instead of failing the run.
    pub fn from_payload(event_type: &str, payload: &serde_json::Value) -> Self {
        let text = |key: &str| {
            payload
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        match event_type {
            "PushEvent" => EventKind::Push {
                commits: payload
                    .get("commits")
                    .and_then(|v| v.as_array())
                    .map_or(0, Vec::len),
            },
            "CreateEvent" => EventKind::Create {
                ref_type: text("ref_type"),
            },
            "IssuesEvent" => EventKind::Issues {
                action: text("action"),
            },
            "PullRequestEvent" => EventKind::PullRequest {
                action: text("action"),
            },
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            "ReleaseEvent" => EventKind::Release,
            other => EventKind::Other {
                name: other.to_string(),
            },
        }
    }
}

/// Wire shape of an entry from the events API.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: RawRepo,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RawRepo {
    pub name: String,
}

impl From<RawEvent> for ActivityEvent {
    fn from(raw: RawEvent) -> Self {
        Self {
            kind: EventKind::from_payload(&raw.event_type, &raw.payload),
            repo: raw.repo.name,
            created_at: raw.created_at,
        }
    }
}

impl ActivityEvent {
    pub fn owner(&self) -> &str {
        self.repo
            .split_once('/')
            .map_or(self.repo.as_str(), |(owner, _)| owner)
    }
}

#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Canonical login for `username`.
    async fn resolve_login(&self, username: &str) -> Result<String, PulseError>;

    /// Most recent public events for `login`, newest first.
    async fn public_events(&self, login: &str, limit: u32)
        -> Result<Vec<ActivityEvent>, PulseError>;
}

/// Keep events in the user's own repositories that fall inside `window`.
/// API order is preserved.
pub fn filter_personal(
    events: Vec<ActivityEvent>,
    login: &str,
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> Vec<ActivityEvent> {
    events
        .into_iter()
        .filter(|e| e.owner() == login)
        .filter(|e| window.contains(e.created_at, now))
        .collect()
}

/// Resolve the user, pull their events and filter them.
/// Returns the resolved login alongside the events.
pub async fn collect(
    source: &dyn ActivitySource,
    username: &str,
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> Result<(String, Vec<ActivityEvent>), PulseError> {
    let login = source.resolve_login(username).await?;
    info!("Resolved {} to login {}", username, login);

    let events = source.public_events(&login, window.fetch_limit()).await?;
    let fetched = events.len();
    let events = filter_personal(events, &login, window, now);
    info!(
        "Kept {} of {} events for {} after filtering",
        events.len(),
        fetched,
        login
    );
    Ok((login, events))
}
