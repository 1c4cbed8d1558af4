//! The provider trait between the tutor handler and an LLM backend.
//!
//! `OpenAiProvider` and `GeminiProvider` implement it; tests plug in stubs.

use async_trait::async_trait;
use tutor_core::types::Generation;

use crate::error::ProviderError;
use crate::registry::ProviderSpec;

/// Trait that all text-generation providers implement.
#[async_trait]
pub trait TutorProvider: Send + Sync {
    /// Generate an answer for `prompt`.
    ///
    /// Returns `Generation::Unconfigured` without touching the network when no
    /// key is set. Provider failures are returned as classified errors; there
    /// are no retries.
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError>;

    /// Static spec (messages, signatures) for this provider.
    fn spec(&self) -> &'static ProviderSpec;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Whether an API key is configured.
    fn is_configured(&self) -> bool;

    /// Display name for logging.
    fn display_name(&self) -> &str {
        self.spec().display_name
    }
}
