pub mod activity;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod readme;
pub mod report;
pub mod summarizer;

use log::info;

use crate::activity::github::GitHubSource;
use crate::config::{PromptConfig, Settings};
use crate::error::PulseError;
use crate::summarizer::provider::ChatCompletionProvider;

/// One full run against the live APIs, configured from the environment.
pub async fn run() -> Result<pipeline::RunOutcome, PulseError> {
    let settings = Settings::from_env()?;
    let prompt = PromptConfig::load(&settings.prompt_path)?;
    info!(
        "Loaded prompt '{}' from {} (model {})",
        prompt.name,
        settings.prompt_path.display(),
        prompt.model
    );

    let source = GitHubSource::new(settings.github_api.clone(), settings.token.clone());
    let provider = ChatCompletionProvider::new(settings.models_api.clone(), settings.token.clone());

    pipeline::execute(&settings, &prompt, &source, &provider, chrono::Utc::now()).await
}
