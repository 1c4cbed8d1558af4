//! Provider error types.

use thiserror::Error;

use crate::registry::ProviderSpec;

/// How a provider failure should be treated by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Quota, billing, or rate-limit failure. Recoverable.
    QuotaOrBilling,
    /// Missing or rejected API key. Recoverable.
    InvalidKey,
    /// Anything else. Fatal for the request.
    Other,
}

/// A failed provider call.
///
/// `message` is the text users and logs see; `raw` keeps the unparsed
/// response body or transport error.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub class: ErrorClass,
    pub message: String,
    pub raw: String,
}

impl ProviderError {
    /// Build an error, classifying `message` with the provider's signatures.
    pub fn classified(
        spec: &ProviderSpec,
        message: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        let message = message.into();
        ProviderError {
            class: spec.classify(&message),
            message,
            raw: raw.into(),
        }
    }
}

/// Errors raised while constructing a provider from config.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    #[error("unknown provider '{0}' (expected one of: gemini, openai)")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
