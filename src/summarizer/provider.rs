use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{truncate_body, PulseError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Text of the first choice, or `None` when the model returned nothing.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, PulseError>;
}

/// Client for any OpenAI-style `/chat/completions` endpoint.
pub struct ChatCompletionProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionProvider {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, PulseError> {
        let url = format!("{}/chat/completions", self.api_base);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| PulseError::Summary(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::Summary(format!(
                "Completion API returned {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| PulseError::Summary(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}
