pub mod provider;

use log::{info, warn};

use crate::config::{PromptConfig, INPUT_PLACEHOLDER};
use crate::error::PulseError;
use provider::{CompletionRequest, LlmProvider, Message};

/// Returned when the model produces no usable text.
pub const FALLBACK_SUMMARY: &str = "Summary unavailable.";

const DEFAULT_TOP_P: f32 = 1.0;
const DEFAULT_MAX_TOKENS: u32 = 200;

/// Fill each message template with the activity log. Only the first
/// placeholder in a template is replaced.
pub fn build_request(config: &PromptConfig, activity: &str) -> CompletionRequest {
    let messages = config
        .messages
        .iter()
        .map(|m| Message::new(m.role.clone(), m.content.replacen(INPUT_PLACEHOLDER, activity, 1)))
        .collect();

    CompletionRequest {
        model: config.model.clone(),
        messages,
        temperature: config.model_parameters.temperature,
        top_p: config.model_parameters.top_p.unwrap_or(DEFAULT_TOP_P),
        max_tokens: config.model_parameters.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    }
}

pub async fn summarize(
    provider: &dyn LlmProvider,
    config: &PromptConfig,
    activity: &str,
) -> Result<String, PulseError> {
    let request = build_request(config, activity);
    info!(
        "Requesting summary from {} ({} messages)",
        request.model,
        request.messages.len()
    );

    let summary = provider
        .complete(&request)
        .await?
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    match summary {
        Some(text) => {
            info!("Received summary ({} chars)", text.chars().count());
            Ok(text)
        }
        None => {
            warn!("Completion returned no content, using fallback summary");
            Ok(FALLBACK_SUMMARY.to_string())
        }
    }
}
