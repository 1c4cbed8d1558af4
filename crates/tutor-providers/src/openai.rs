//! OpenAI chat completions provider.
//!
//! Sends the tutoring prompt as a user message under a fixed system message
//! to `{api_base}/chat/completions`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use tutor_core::config::{GenerationConfig, ProviderConfig};
use tutor_core::prompt::SYSTEM_PROMPT;
use tutor_core::types::Generation;

use crate::error::ProviderError;
use crate::registry::{ProviderSpec, OPENAI};
use crate::traits::TutorProvider;

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────
// OpenAiProvider
// ─────────────────────────────────────────────

/// Provider backed by the OpenAI chat completions API.
pub struct OpenAiProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication. Empty means unconfigured.
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a provider from its config section and the shared generation settings.
    pub fn new(
        config: &ProviderConfig,
        generation: &GenerationConfig,
        client: reqwest::Client,
    ) -> Self {
        OpenAiProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| OPENAI.default_api_base.to_string()),
            api_key: config.api_key.trim().to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| OPENAI.default_model.to_string()),
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn fail(&self, message: String, raw: String) -> ProviderError {
        let err = ProviderError::classified(&OPENAI, message, raw);
        error!(
            provider = OPENAI.display_name,
            class = ?err.class,
            error = %err.message,
            "OpenAI API call failed"
        );
        err
    }
}

#[async_trait]
impl TutorProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if !self.is_configured() {
            debug!(provider = OPENAI.display_name, "no API key configured, skipping call");
            return Ok(Generation::Unconfigured);
        }

        info!(
            provider = OPENAI.display_name,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Making OpenAI API call"
        );

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = match self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            // The URL stays out of the message so a port number cannot match a signature.
            Err(e) if e.is_timeout() => {
                let raw = e.to_string();
                return Err(self.fail(format!("Request timed out: {}", e.without_url()), raw));
            }
            Err(e) => {
                let raw = e.to_string();
                return Err(self.fail(format!("Connection error: {}", e.without_url()), raw));
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.fail(format!("Failed to read response body: {e}"), e.to_string()))?;

        if !status.is_success() {
            return Err(self.fail(format!("Error code: {} - {}", status.as_u16(), text), text));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| self.fail(format!("Invalid response from OpenAI: {e}"), text.clone()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                self.fail(
                    "OpenAI response contained no message content".to_string(),
                    text.clone(),
                )
            })?;

        info!(provider = OPENAI.display_name, "OpenAI API response received successfully");
        Ok(Generation::answer(content))
    }

    fn spec(&self) -> &'static ProviderSpec {
        &OPENAI
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
