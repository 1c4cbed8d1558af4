//! HTTP routes: the answer endpoint, catalog lists, and liveness checks.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tutor_core::catalog::{LANGUAGES, LEARNING_STYLES, LEVELS, SUBJECTS};
use tutor_core::config::ServerConfig;
use tutor_core::types::{TutorRequest, TutorResponse};

use crate::error::ApiError;
use crate::tutor::Tutor;

const SERVICE_NAME: &str = "AI Tutor API";

/// Shared, read-only state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<Tutor>,
}

impl AppState {
    pub fn new(tutor: Tutor) -> Self {
        Self {
            tutor: Arc::new(tutor),
        }
    }
}

// ─────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────

pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/generate-answer", post(generate_answer))
        .route("/subjects", get(subjects))
        .route("/levels", get(levels))
        .route("/learning-styles", get(learning_styles))
        .route("/languages", get(languages))
        .fallback(not_found)
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins; any method and header, credentials allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Bind `server.host:server.port` and serve until Ctrl+C.
pub async fn serve(state: AppState, server: &ServerConfig) -> std::io::Result<()> {
    let app = build_router(state, server);
    let listener = tokio::net::TcpListener::bind(server.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Tutor API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

async fn root(State(state): State<AppState>) -> Json<Value> {
    let provider = state.tutor.provider().display_name().to_string();
    Json(json!({ "message": format!("AI Tutor API is running with {provider}!") }))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    model: String,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let provider = state.tutor.provider();
    let status = if provider.is_configured() {
        "healthy"
    } else {
        "configured_without_key"
    };
    Json(Health {
        status,
        service: SERVICE_NAME,
        model: provider.model().to_string(),
    })
}

async fn generate_answer(
    State(state): State<AppState>,
    payload: Result<Json<TutorRequest>, JsonRejection>,
) -> Result<Json<TutorResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.tutor.answer(&request).await?;
    Ok(Json(response))
}

async fn subjects() -> Json<Value> {
    Json(json!({ "subjects": SUBJECTS }))
}

async fn levels() -> Json<Value> {
    Json(json!({ "levels": LEVELS }))
}

async fn learning_styles() -> Json<Value> {
    Json(json!({ "learning_styles": LEARNING_STYLES }))
}

async fn languages() -> Json<Value> {
    Json(json!({ "languages": LANGUAGES }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
