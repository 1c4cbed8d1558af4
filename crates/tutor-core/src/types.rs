//! Core types for Tutor: the request a client sends, the response it gets back,
//! and the result a provider hands to the handler.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Request / Response
// ─────────────────────────────────────────────

/// A tutoring request as posted by a client.
///
/// All fields are free text; nothing beyond presence and type is checked.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorRequest {
    pub subject: String,
    pub level: String,
    pub learning_style: String,
    pub language: String,
    pub question: String,
}

impl TutorRequest {
    pub fn new(
        subject: impl Into<String>,
        level: impl Into<String>,
        learning_style: impl Into<String>,
        language: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        TutorRequest {
            subject: subject.into(),
            level: level.into(),
            learning_style: learning_style.into(),
            language: language.into(),
            question: question.into(),
        }
    }
}

/// The answer returned for a [`TutorRequest`].
///
/// `subject`, `level`, `learning_style` and `language` always echo the request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorResponse {
    pub answer: String,
    pub subject: String,
    pub level: String,
    pub learning_style: String,
    pub language: String,
}

impl TutorResponse {
    /// Build a response for `request` carrying `answer`.
    pub fn for_request(request: &TutorRequest, answer: impl Into<String>) -> Self {
        TutorResponse {
            answer: answer.into(),
            subject: request.subject.clone(),
            level: request.level.clone(),
            learning_style: request.learning_style.clone(),
            language: request.language.clone(),
        }
    }
}

// ─────────────────────────────────────────────
// Provider result
// ─────────────────────────────────────────────

/// Successful outcome of a provider call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generation {
    /// Generated text, whitespace-trimmed.
    Answer(String),
    /// No credential is configured; no call was made.
    Unconfigured,
}

impl Generation {
    /// Wrap provider output, trimming surrounding whitespace.
    pub fn answer(text: impl AsRef<str>) -> Self {
        Generation::Answer(text.as_ref().trim().to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
