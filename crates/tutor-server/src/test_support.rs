//! Scripted provider for handler and router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tutor_core::types::{Generation, TutorRequest};
use tutor_providers::{ProviderError, ProviderSpec, TutorProvider};

enum Script {
    Unconfigured,
    Answer(String),
    Fail(String),
}

pub struct StubProvider {
    spec: &'static ProviderSpec,
    script: Script,
    delay: Option<Duration>,
    last_prompt: Mutex<Option<String>>,
}

impl StubProvider {
    fn with(spec: &'static ProviderSpec, script: Script) -> Arc<Self> {
        Arc::new(Self {
            spec,
            script,
            delay: None,
            last_prompt: Mutex::new(None),
        })
    }

    pub fn unconfigured(spec: &'static ProviderSpec) -> Arc<Self> {
        Self::with(spec, Script::Unconfigured)
    }

    pub fn answering(spec: &'static ProviderSpec, text: &str) -> Arc<Self> {
        Self::with(spec, Script::Answer(text.to_string()))
    }

    /// Answers `text` after sleeping for `delay`.
    pub fn slow(spec: &'static ProviderSpec, text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            spec,
            script: Script::Answer(text.to_string()),
            delay: Some(delay),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn failing(spec: &'static ProviderSpec, message: &str) -> Arc<Self> {
        Self::with(spec, Script::Fail(message.to_string()))
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TutorProvider for StubProvider {
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.script {
            Script::Unconfigured => Ok(Generation::Unconfigured),
            Script::Answer(text) => Ok(Generation::answer(text)),
            Script::Fail(message) => Err(ProviderError::classified(
                self.spec,
                message.as_str(),
                message.as_str(),
            )),
        }
    }

    fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    fn is_configured(&self) -> bool {
        !matches!(self.script, Script::Unconfigured)
    }
}

pub fn request() -> TutorRequest {
    TutorRequest::new("Math", "Beginner", "Visual", "English", "What is 2+2?")
}
