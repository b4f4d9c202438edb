use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, FixedOffset, Local, Offset, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::PulseError;

/// Token in a message template that receives the formatted activity log.
pub const INPUT_PLACEHOLDER: &str = "{{input}}";

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_PROMPT_FILE: &str = "activity-summary.prompt.yml";
pub const DEFAULT_README: &str = "README.md";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_MODELS_API: &str = "https://models.github.ai/inference";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    pub name: String,
    pub description: String,
    pub model: String,
    pub model_parameters: ModelParameters,
    pub messages: Vec<MessageTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParameters {
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub role: String,
    pub content: String,
}

impl PromptConfig {
    pub fn load(path: &Path) -> Result<Self, PulseError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PulseError::Config(format!("Cannot read prompt file {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, PulseError> {
        let config: PromptConfig = serde_yaml::from_str(contents)?;
        for (i, message) in config.messages.iter().enumerate() {
            if !message.content.contains(INPUT_PLACEHOLDER) {
                warn!(
                    "Message {} ({}) in prompt '{}' has no {} placeholder",
                    i, message.role, config.name, INPUT_PLACEHOLDER
                );
            }
        }
        Ok(config)
    }
}

/// Ten years; longer windows gain nothing over `all`.
const MAX_WINDOW_HOURS: u32 = 24 * 366 * 10;

/// Which events count as "recent" and how their timestamps are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Everything the API returns, timestamps in local time.
    All,
    /// Only the trailing `hours`, measured in a fixed UTC offset.
    Rolling { hours: u32, offset: FixedOffset },
}

impl TimeWindow {
    pub fn parse(window: &str, offset: &str) -> Result<Self, PulseError> {
        let window = window.trim();
        if window.eq_ignore_ascii_case("all") {
            return Ok(TimeWindow::All);
        }
        let hours = window
            .strip_suffix('h')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| (1..=MAX_WINDOW_HOURS).contains(n))
            .ok_or_else(|| {
                PulseError::Config(format!(
                    "Invalid window '{}', expected 'all' or '<hours>h' up to {}h",
                    window, MAX_WINDOW_HOURS
                ))
            })?;
        Ok(TimeWindow::Rolling {
            hours,
            offset: parse_utc_offset(offset)?,
        })
    }

    /// Page size requested from the events API.
    pub fn fetch_limit(&self) -> u32 {
        match self {
            TimeWindow::All => 50,
            TimeWindow::Rolling { .. } => 100,
        }
    }

    /// Maximum number of events written into the activity log.
    pub fn format_limit(&self) -> Option<usize> {
        match self {
            TimeWindow::All => Some(20),
            TimeWindow::Rolling { .. } => None,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Rolling { hours, offset } => {
                let now = now.with_timezone(offset);
                let at = timestamp.with_timezone(offset);
                let start = now.checked_sub_signed(Duration::hours(i64::from(*hours)));
                start.map_or(true, |start| at >= start) && at <= now
            }
        }
    }

    pub fn render(&self, timestamp: DateTime<Utc>, fmt: &str) -> String {
        match self {
            TimeWindow::All => timestamp.with_timezone(&Local).format(fmt).to_string(),
            TimeWindow::Rolling { offset, .. } => {
                timestamp.with_timezone(offset).format(fmt).to_string()
            }
        }
    }
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset, PulseError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("utc") || raw == "Z" {
        return Ok(Utc.fix());
    }
    raw.parse::<FixedOffset>().map_err(|e| {
        PulseError::Config(format!("Invalid UTC offset '{}', expected ±HH:MM: {}", raw, e))
    })
}

/// Everything the run needs from the environment, resolved up front.
#[derive(Clone)]
pub struct Settings {
    pub token: String,
    pub username: String,
    pub prompt_path: PathBuf,
    pub readme_path: PathBuf,
    pub window: TimeWindow,
    pub github_api: String,
    pub models_api: String,
    pub dry_run: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("prompt_path", &self.prompt_path)
            .field("readme_path", &self.readme_path)
            .field("window", &self.window)
            .field("github_api", &self.github_api)
            .field("models_api", &self.models_api)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, PulseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PulseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values behave like unset ones.
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get("GITHUB_TOKEN")
            .ok_or_else(|| PulseError::Config("Missing env var: GITHUB_TOKEN".into()))?;
        let window = TimeWindow::parse(
            &get("PULSE_WINDOW").unwrap_or_else(|| "24h".to_string()),
            &get("PULSE_UTC_OFFSET").unwrap_or_else(|| "+00:00".to_string()),
        )?;
        let dry_run = get("PULSE_DRY_RUN")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            token,
            username: get("GITHUB_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            prompt_path: PathBuf::from(
                get("PULSE_PROMPT_FILE").unwrap_or_else(|| DEFAULT_PROMPT_FILE.to_string()),
            ),
            readme_path: PathBuf::from(
                get("PULSE_README").unwrap_or_else(|| DEFAULT_README.to_string()),
            ),
            window,
            github_api: trim_base(get("PULSE_GITHUB_API"), DEFAULT_GITHUB_API),
            models_api: trim_base(get("PULSE_MODELS_API"), DEFAULT_MODELS_API),
            dry_run,
        })
    }
}

fn trim_base(value: Option<String>, default: &str) -> String {
    value
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}
