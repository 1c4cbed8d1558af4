//! Build the configured provider from a loaded [`Config`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use tutor_core::config::Config;

use crate::error::ProviderBuildError;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::registry::select_provider;
use crate::traits::TutorProvider;

/// Build the HTTP client shared by a provider. No timeout unless one is configured.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, ProviderBuildError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Select and construct the provider described by `config`.
///
/// A provider without a key is still returned; it answers as unconfigured.
pub fn create_provider(config: &Config) -> Result<Arc<dyn TutorProvider>, ProviderBuildError> {
    let spec = select_provider(config)?;
    let client = build_http_client(config.generation.timeout_secs)?;

    let provider: Arc<dyn TutorProvider> = match spec.name {
        "openai" => Arc::new(OpenAiProvider::new(
            &config.providers.openai,
            &config.generation,
            client,
        )),
        _ => Arc::new(GeminiProvider::new(
            &config.providers.gemini,
            &config.generation,
            client,
        )),
    };

    if provider.is_configured() {
        debug!(
            provider = provider.display_name(),
            model = provider.model(),
            "Created LLM provider"
        );
    } else {
        warn!(
            provider = provider.display_name(),
            env_key = spec.env_key,
            "No API key configured; answers will ask the operator to configure one"
        );
    }

    Ok(provider)
}
