//! LLM provider layer for Tutor.
//!
//! # Architecture
//!
//! - [`traits::TutorProvider`] — trait that all providers implement
//! - [`registry`] — static specs for the supported providers + selection logic
//! - [`openai::OpenAiProvider`] — OpenAI chat completions client
//! - [`gemini::GeminiProvider`] — Gemini `generateContent` client
//! - [`factory::create_provider`] — build the configured provider from `Config`

pub mod error;
pub mod factory;
pub mod gemini;
pub mod openai;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use error::{ErrorClass, ProviderBuildError, ProviderError};
pub use factory::create_provider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use registry::{ProviderSpec, PROVIDERS};
pub use traits::TutorProvider;
