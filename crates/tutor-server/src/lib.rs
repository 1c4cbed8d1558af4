//! HTTP API for Tutor.
//!
//! - [`tutor::Tutor`] — request handler: prompt, provider call, outcome mapping
//! - [`routes`] — axum router, CORS, and `serve`
//! - [`error::ApiError`] — JSON fault responses

pub mod error;
pub mod routes;
pub mod tutor;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use routes::{build_router, serve, AppState};
pub use tutor::{Tutor, TutorError};
