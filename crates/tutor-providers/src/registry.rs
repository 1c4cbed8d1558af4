//! Provider registry — static specs for the supported LLM providers.
//!
//! Each `ProviderSpec` describes how to reach a provider and how to read its
//! failures: the env var holding the key, defaults, the error signatures that
//! mark a failure as recoverable, and the remediation text shown to users.

use tutor_core::config::Config;

use crate::error::{ErrorClass, ProviderBuildError};

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one LLM provider.
#[derive(Debug)]
pub struct ProviderSpec {
    /// Internal name (e.g. `"gemini"`), also the config key.
    pub name: &'static str,
    /// Human-readable name for logs and messages. E.g. `"OpenAI"`.
    pub display_name: &'static str,
    /// Environment variable for the API key. E.g. `"OPENAI_API_KEY"`.
    pub env_key: &'static str,
    /// Model used when none is configured.
    pub default_model: &'static str,
    /// API base URL used when none is configured.
    pub default_api_base: &'static str,
    /// Answer returned when no key is configured.
    pub unconfigured_answer: &'static str,
    /// Markers checked against error text, in priority order.
    pub signatures: &'static [ErrorSignature],
    /// Numbered steps for quota/billing failures.
    pub quota_help: &'static str,
    /// Numbered steps for invalid-key failures.
    pub key_help: &'static str,
    /// Whether quota failures also carry a sample answer echoing the request.
    pub demo_on_quota: bool,
}

/// A substring marker that classifies provider error text.
#[derive(Debug)]
pub struct ErrorSignature {
    /// Lowercase substring to look for.
    pub marker: &'static str,
    pub class: ErrorClass,
}

impl ProviderSpec {
    /// Classify error text by the first matching signature (case-insensitive).
    pub fn classify(&self, message: &str) -> ErrorClass {
        let lower = message.to_lowercase();
        self.signatures
            .iter()
            .find(|sig| lower.contains(sig.marker))
            .map(|sig| sig.class)
            .unwrap_or(ErrorClass::Other)
    }
}

// ─────────────────────────────────────────────
// Supported providers (in auto-selection order)
// ─────────────────────────────────────────────

pub static GEMINI: ProviderSpec = ProviderSpec {
    name: "gemini",
    display_name: "Gemini",
    env_key: "GEMINI_API_KEY",
    default_model: "gemini-2.5-pro",
    default_api_base: "https://generativelanguage.googleapis.com/v1beta",
    unconfigured_answer:
        "Please configure your GEMINI_API_KEY in the .env file to use the AI tutor functionality.",
    signatures: &[
        ErrorSignature {
            marker: "quota",
            class: ErrorClass::QuotaOrBilling,
        },
        ErrorSignature {
            marker: "429",
            class: ErrorClass::QuotaOrBilling,
        },
        ErrorSignature {
            marker: "billing",
            class: ErrorClass::QuotaOrBilling,
        },
        ErrorSignature {
            marker: "api key",
            class: ErrorClass::InvalidKey,
        },
        ErrorSignature {
            marker: "400",
            class: ErrorClass::InvalidKey,
        },
    ],
    quota_help: "1. Check your usage limits and billing in Google AI Studio (https://aistudio.google.com/)\n\
                 2. Wait for the rate limit window to reset, or enable billing on your Google Cloud project\n\
                 3. Restart the backend server",
    key_help: "1. Get a valid API key from Google AI Studio (https://aistudio.google.com/)\n\
               2. Update your .env file with GEMINI_API_KEY=your_key_here\n\
               3. Restart the backend server",
    demo_on_quota: false,
};

pub static OPENAI: ProviderSpec = ProviderSpec {
    name: "openai",
    display_name: "OpenAI",
    env_key: "OPENAI_API_KEY",
    default_model: "gpt-3.5-turbo",
    default_api_base: "https://api.openai.com/v1",
    unconfigured_answer:
        "Please configure your OpenAI API key in the .env file to use the AI tutor functionality.",
    signatures: &[
        ErrorSignature {
            marker: "quota",
            class: ErrorClass::QuotaOrBilling,
        },
        ErrorSignature {
            marker: "billing",
            class: ErrorClass::QuotaOrBilling,
        },
        ErrorSignature {
            marker: "429",
            class: ErrorClass::QuotaOrBilling,
        },
    ],
    quota_help: "1. Check your OpenAI account billing at https://platform.openai.com/account/billing\n\
                 2. Ensure you have sufficient credits or an active payment method\n\
                 3. Your API key might need a paid plan to access GPT models",
    key_help: "1. Create a new API key at https://platform.openai.com/api-keys\n\
               2. Update your .env file with OPENAI_API_KEY=your_key_here\n\
               3. Restart the backend server",
    demo_on_quota: true,
};

/// All supported providers. When no provider is named in config, the first
/// one with a key wins, and the first entry is the fallback.
pub static PROVIDERS: &[&ProviderSpec] = &[&GEMINI, &OPENAI];

/// Find a provider spec by its internal name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().copied().find(|spec| spec.name == name)
}

/// Pick the provider spec to use for `config`.
///
/// 1. An explicit `provider` name must exist in the registry.
/// 2. Otherwise the first provider with a configured key.
/// 3. Otherwise the first provider (it will answer as unconfigured).
pub fn select_provider(config: &Config) -> Result<&'static ProviderSpec, ProviderBuildError> {
    if let Some(name) = config.provider.as_deref() {
        return find_by_name(name)
            .ok_or_else(|| ProviderBuildError::UnknownProvider(name.to_string()));
    }

    let configured = PROVIDERS.iter().copied().find(|spec| {
        config
            .providers
            .get_by_name(spec.name)
            .is_some_and(|p| p.is_configured())
    });

    Ok(configured.unwrap_or(PROVIDERS[0]))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
