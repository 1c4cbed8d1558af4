//! Tutor request handler.
//!
//! Every request ends in one of three ways:
//! 1. no key configured → the provider's "please configure" text (success)
//! 2. provider answered → that text (success)
//! 3. provider failed → remediation text for quota/billing or key errors
//!    (success), otherwise a [`TutorError`]

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use tutor_core::prompt::build_prompt;
use tutor_core::types::{Generation, TutorRequest, TutorResponse};
use tutor_core::utils::truncate_string;
use tutor_providers::{ErrorClass, ProviderError, ProviderSpec, TutorProvider};

/// A provider failure that could not be turned into an answer.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("Error generating answer: {0}")]
    Generation(String),
}

/// Handles tutoring requests against one provider.
///
/// Built once at startup and shared read-only between requests.
pub struct Tutor {
    provider: Arc<dyn TutorProvider>,
}

impl Tutor {
    pub fn new(provider: Arc<dyn TutorProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn TutorProvider {
        self.provider.as_ref()
    }

    /// Answer `request`. The echoed fields of the response always match the request.
    pub async fn answer(&self, request: &TutorRequest) -> Result<TutorResponse, TutorError> {
        let spec = self.provider.spec();

        info!(
            provider = spec.display_name,
            question = %truncate_string(&request.question, 120),
            "Generating answer"
        );

        let prompt = build_prompt(request);

        match self.provider.generate(&prompt).await {
            Ok(Generation::Unconfigured) => {
                Ok(TutorResponse::for_request(request, spec.unconfigured_answer))
            }
            Ok(Generation::Answer(text)) => Ok(TutorResponse::for_request(request, text)),
            Err(err) => self.degrade(request, err),
        }
    }

    fn degrade(
        &self,
        request: &TutorRequest,
        err: ProviderError,
    ) -> Result<TutorResponse, TutorError> {
        let spec = self.provider.spec();
        match err.class {
            ErrorClass::QuotaOrBilling => {
                warn!(
                    provider = spec.display_name,
                    error = %err,
                    "quota or billing failure, returning guidance"
                );
                Ok(TutorResponse::for_request(request, quota_answer(spec, &err, request)))
            }
            ErrorClass::InvalidKey => {
                warn!(
                    provider = spec.display_name,
                    error = %err,
                    "API key rejected, returning guidance"
                );
                Ok(TutorResponse::for_request(request, key_answer(spec, &err)))
            }
            ErrorClass::Other => {
                error!(
                    provider = spec.display_name,
                    error = %err,
                    raw = %err.raw,
                    "provider call failed"
                );
                Err(TutorError::Generation(err.message))
            }
        }
    }
}

// ─────────────────────────────────────────────
// Degraded answers
// ─────────────────────────────────────────────

/// Explanation for quota, billing, or rate-limit failures.
pub fn quota_answer(spec: &ProviderSpec, err: &ProviderError, request: &TutorRequest) -> String {
    let name = spec.display_name;
    let mut answer = format!(
        "I apologize, but there's an issue with the {name} API quota or billing.\n\
         \n\
         **The issue:** {issue}\n\
         \n\
         **To fix this:**\n\
         {help}",
        issue = err.message,
        help = spec.quota_help,
    );

    if spec.demo_on_quota {
        answer.push_str(&format!(
            "\n\n\
             **Demo Response for your question about {subject}:**\n\
             This is a sample response showing how the AI tutor would work. \
             The system is configured to provide {level}-level explanations using a {style} approach in {language}.\n\
             \n\
             Your question: \"{question}\"\n\
             \n\
             Once the {name} API billing is resolved, you'll receive personalized, detailed responses tailored to your learning preferences.",
            subject = request.subject,
            level = request.level,
            style = request.learning_style,
            language = request.language,
            question = request.question,
        ));
    }

    answer
}

/// Explanation for a missing or rejected API key.
pub fn key_answer(spec: &ProviderSpec, err: &ProviderError) -> String {
    format!(
        "I apologize, but there's an issue with the {name} API key.\n\
         \n\
         **The issue:** {issue}\n\
         \n\
         **To fix this:**\n\
         {help}",
        name = spec.display_name,
        issue = err.message,
        help = spec.key_help,
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{request, StubProvider};
    use tutor_providers::registry::{GEMINI, OPENAI};

    fn assert_echoes(resp: &TutorResponse, req: &TutorRequest) {
        assert_eq!(resp.subject, req.subject);
        assert_eq!(resp.level, req.level);
        assert_eq!(resp.learning_style, req.learning_style);
        assert_eq!(resp.language, req.language);
    }

    #[tokio::test]
    async fn test_unconfigured_returns_configure_hint() {
        let stub = StubProvider::unconfigured(&OPENAI);
        let tutor = Tutor::new(stub.clone());
        let req = request();

        let resp = tutor.answer(&req).await.unwrap();
        assert!(resp.answer.starts_with("Please configure"));
        assert_eq!(resp.answer, OPENAI.unconfigured_answer);
        assert_echoes(&resp, &req);
    }

    #[tokio::test]
    async fn test_success_passes_text_through() {
        let stub = StubProvider::answering(&GEMINI, "  ## Four\n\n2 + 2 = 4\n");
        let tutor = Tutor::new(stub.clone());
        let req = request();

        let resp = tutor.answer(&req).await.unwrap();
        assert_eq!(resp.answer, "## Four\n\n2 + 2 = 4");
        assert_echoes(&resp, &req);
    }

    #[tokio::test]
    async fn test_provider_receives_built_prompt() {
        let stub = StubProvider::answering(&GEMINI, "ok");
        let tutor = Tutor::new(stub.clone());
        let req = request();

        tutor.answer(&req).await.unwrap();
        assert_eq!(stub.last_prompt().as_deref(), Some(build_prompt(&req).as_str()));
    }

    #[tokio::test]
    async fn test_openai_quota_error_degrades_with_demo() {
        let stub = StubProvider::failing(
            &OPENAI,
            "Error code: 429 - {'error': {'message': 'You exceeded your current quota'}}",
        );
        let tutor = Tutor::new(stub.clone());
        let req = request();

        let resp = tutor.answer(&req).await.unwrap();
        assert!(resp.answer.contains("billing"));
        assert!(resp.answer.contains("**The issue:** Error code: 429"));
        assert!(resp.answer.contains("https://platform.openai.com/account/billing"));
        assert!(resp.answer.contains("**Demo Response for your question about Math:**"));
        assert!(resp
            .answer
            .contains("Beginner-level explanations using a Visual approach in English"));
        assert!(resp.answer.contains("Your question: \"What is 2+2?\""));
        assert_echoes(&resp, &req);
    }

    #[tokio::test]
    async fn test_quota_match_is_case_insensitive() {
        for spec in [&OPENAI, &GEMINI] {
            let tutor = Tutor::new(StubProvider::failing(spec, "QuOtA exhausted"));
            let resp = tutor.answer(&request()).await.unwrap();
            assert!(resp.answer.contains("billing"), "{}", spec.name);
        }
    }

    #[tokio::test]
    async fn test_gemini_quota_error_has_no_demo() {
        let tutor = Tutor::new(StubProvider::failing(&GEMINI, "429 Resource has been exhausted"));
        let resp = tutor.answer(&request()).await.unwrap();
        assert!(resp.answer.contains("Gemini API quota or billing"));
        assert!(!resp.answer.contains("Demo Response"));
    }

    #[tokio::test]
    async fn test_gemini_billing_error_degrades() {
        let tutor = Tutor::new(StubProvider::failing(
            &GEMINI,
            "403 Billing account not enabled for this project",
        ));
        let req = request();

        let resp = tutor.answer(&req).await.unwrap();
        assert!(resp.answer.contains("Gemini API quota or billing"));
        assert!(resp.answer.contains("**The issue:** 403 Billing account not enabled"));
        assert_echoes(&resp, &req);
    }

    #[tokio::test]
    async fn test_gemini_invalid_key_degrades() {
        let tutor = Tutor::new(StubProvider::failing(
            &GEMINI,
            "400 API key not valid. Please pass a valid API key.",
        ));
        let req = request();

        let resp = tutor.answer(&req).await.unwrap();
        assert!(resp
            .answer
            .starts_with("I apologize, but there's an issue with the Gemini API key."));
        assert!(resp.answer.contains("**The issue:** 400 API key not valid."));
        assert!(resp.answer.contains("GEMINI_API_KEY=your_key_here"));
        assert_echoes(&resp, &req);
    }

    #[tokio::test]
    async fn test_unclassified_error_is_fatal() {
        let tutor = Tutor::new(StubProvider::failing(
            &OPENAI,
            "Error code: 500 - upstream exploded",
        ));

        let err = tutor.answer(&request()).await.unwrap_err();
        let TutorError::Generation(message) = &err;
        assert_eq!(message, "Error code: 500 - upstream exploded");
        assert_eq!(
            err.to_string(),
            "Error generating answer: Error code: 500 - upstream exploded"
        );
    }

    #[tokio::test]
    async fn test_openai_key_error_is_fatal() {
        // OpenAI has no key signature; a rejected key is a hard failure.
        let tutor = Tutor::new(StubProvider::failing(
            &OPENAI,
            "Error code: 401 - Incorrect API key provided",
        ));
        assert!(tutor.answer(&request()).await.is_err());
    }
}
