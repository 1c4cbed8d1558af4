//! Google Gemini `generateContent` provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use tutor_core::config::{GenerationConfig, ProviderConfig};
use tutor_core::types::Generation;

use crate::error::ProviderError;
use crate::registry::{ProviderSpec, GEMINI};
use crate::traits::TutorProvider;

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams {
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<u16>,
    message: String,
}

// ─────────────────────────────────────────────
// GeminiProvider
// ─────────────────────────────────────────────

/// Provider backed by the Gemini REST API.
///
/// `max_tokens` and `temperature` travel as `generationConfig`.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(
        config: &ProviderConfig,
        generation: &GenerationConfig,
        client: reqwest::Client,
    ) -> Self {
        GeminiProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| GEMINI.default_api_base.to_string()),
            api_key: config.api_key.trim().to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| GEMINI.default_model.to_string()),
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }

    /// `{api_base}/models/{model}:generateContent`
    fn generate_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        let model = self.model.trim_start_matches("models/");
        format!("{base}/models/{model}:generateContent")
    }

    fn fail(&self, message: String, raw: String) -> ProviderError {
        let err = ProviderError::classified(&GEMINI, message, raw);
        error!(
            provider = GEMINI.display_name,
            class = ?err.class,
            error = %err.message,
            "Gemini API call failed"
        );
        err
    }
}

/// Render a non-2xx body as `"{code} {message}"`, like Google's client libraries do.
fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => format!("{} {}", env.error.code.unwrap_or(status.as_u16()), env.error.message),
        Err(_) => format!("{} {}", status.as_u16(), body.trim()),
    }
}

/// Join the text parts of the first candidate.
fn extract_text(resp: GenerateContentResponse) -> Result<String, String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(format!("Gemini returned no candidates (block reason: {reason})"));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(format!("Gemini returned an empty answer (finish reason: {reason})"));
    }
    Ok(text)
}

#[async_trait]
impl TutorProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if !self.is_configured() {
            debug!(provider = GEMINI.display_name, "no API key configured, skipping call");
            return Ok(Generation::Unconfigured);
        }

        info!(
            provider = GEMINI.display_name,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Making Gemini API call"
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationParams {
                max_output_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        };

        let response = match self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
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
            return Err(self.fail(describe_error(status, &text), text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| self.fail(format!("Invalid response from Gemini: {e}"), text.clone()))?;

        let answer = extract_text(parsed).map_err(|msg| self.fail(msg, text.clone()))?;

        info!(provider = GEMINI.display_name, "Gemini API response received successfully");
        Ok(Generation::answer(answer))
    }

    fn spec(&self) -> &'static ProviderSpec {
        &GEMINI
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::factory::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(api_key: &str, api_base: Option<&str>) -> GeminiProvider {
        let config = ProviderConfig {
            api_key: api_key.to_string(),
            api_base: api_base.map(String::from),
            model: None,
        };
        GeminiProvider::new(&config, &GenerationConfig::default(), reqwest::Client::new())
    }

    const GENERATE_PATH: &str = "/models/gemini-2.5-pro:generateContent";

    #[test]
    fn test_generate_url() {
        let provider = make_provider("k", Some("https://example.test/v1beta/"));
        assert_eq!(
            provider.generate_url(),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_generate_url_strips_models_prefix() {
        let config = ProviderConfig {
            api_key: "k".to_string(),
            api_base: None,
            model: Some("models/gemini-1.5-flash".to_string()),
        };
        let provider =
            GeminiProvider::new(&config, &GenerationConfig::default(), reqwest::Client::new());
        assert!(provider
            .generate_url()
            .ends_with("/v1beta/models/gemini-1.5-flash:generateContent"));
    }

    #[test]
    fn test_describe_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            describe_error(reqwest::StatusCode::BAD_REQUEST, body),
            "400 API key not valid. Please pass a valid API key."
        );
        assert_eq!(
            describe_error(reqwest::StatusCode::BAD_GATEWAY, "<html>bad gateway</html>\n"),
            "502 <html>bad gateway</html>"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_skips_network() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = make_provider("  ", Some(&mock_server.uri()));
        assert_eq!(provider.generate("hi").await.unwrap(), Generation::Unconfigured);
    }

    #[tokio::test]
    async fn test_generate_success_joins_parts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "the prompt" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "## Binary search\n" }, { "text": "Halve the range.\n\n" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("g-key", Some(&mock_server.uri()));
        let result = provider.generate("the prompt").await.unwrap();
        assert_eq!(
            result,
            Generation::Answer("## Binary search\nHalve the range.".to_string())
        );
    }

    #[tokio::test]
    async fn test_generation_config_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "maxOutputTokens": 512, "temperature": 0.2 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig {
            api_key: "g-key".to_string(),
            api_base: Some(mock_server.uri()),
            model: None,
        };
        let generation = GenerationConfig {
            max_tokens: 512,
            temperature: 0.2,
            timeout_secs: None,
        };
        let provider = GeminiProvider::new(&config, &generation, reqwest::Client::new());

        let result = provider.generate("hi").await.unwrap();
        assert_eq!(result, Generation::Answer("ok".to_string()));
    }

    #[tokio::test]
    async fn test_timeout_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(serde_json::json!({
                        "candidates": [{ "content": { "parts": [{ "text": "too late" }] } }]
                    })),
            )
            .mount(&mock_server)
            .await;

        let config = ProviderConfig {
            api_key: "g-key".to_string(),
            api_base: Some(mock_server.uri()),
            model: None,
        };
        let client = build_http_client(Some(1)).unwrap();
        let provider = GeminiProvider::new(&config, &GenerationConfig::default(), client);

        let err = provider.generate("hi").await.unwrap_err();
        assert!(err.message.starts_with("Request timed out"), "{}", err.message);
        assert_eq!(err.class, ErrorClass::Other);
    }

    #[tokio::test]
    async fn test_invalid_key_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("bad", Some(&mock_server.uri()));
        let err = provider.generate("hi").await.unwrap_err();
        assert_eq!(err.class, ErrorClass::InvalidKey);
        assert_eq!(err.message, "400 API key not valid. Please pass a valid API key.");
        assert!(err.raw.contains("INVALID_ARGUMENT"));
    }

    #[tokio::test]
    async fn test_quota_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "code": 429,
                    "message": "Resource has been exhausted (e.g. check quota).",
                    "status": "RESOURCE_EXHAUSTED"
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", Some(&mock_server.uri()));
        let err = provider.generate("hi").await.unwrap_err();
        assert_eq!(err.class, ErrorClass::QuotaOrBilling);
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", Some(&mock_server.uri()));
        let err = provider.generate("hi").await.unwrap_err();
        assert_eq!(err.class, ErrorClass::Other);
        assert!(err.message.contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_empty_candidate_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", Some(&mock_server.uri()));
        let err = provider.generate("hi").await.unwrap_err();
        assert_eq!(err.class, ErrorClass::Other);
        assert!(err.message.contains("MAX_TOKENS"));
    }
}
