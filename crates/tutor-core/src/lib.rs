//! Core building blocks for Tutor.
//!
//! - [`types`] — request/response payloads and the provider result type
//! - [`catalog`] — fixed subject/level/style/language lists
//! - [`prompt`] — prompt templating for tutoring requests
//! - [`config`] — config schema, file loading, env var overrides
//! - [`utils`] — path and string helpers

pub mod catalog;
pub mod config;
pub mod prompt;
pub mod types;
pub mod utils;

pub use types::{Generation, TutorRequest, TutorResponse};
