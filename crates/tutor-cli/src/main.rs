//! Tutor CLI — entry point.
//!
//! # Commands
//!
//! - `tutor serve [--logs]` — run the HTTP API
//! - `tutor status` — show configuration and provider status
//! - `tutor ask -q QUESTION [...]` — answer one question from the terminal

mod helpers;
mod status;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use tutor_core::config::{load_config, Config};
use tutor_core::types::TutorRequest;
use tutor_providers::create_provider;
use tutor_server::{serve, AppState, Tutor};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// AI tutor backend for Gemini and OpenAI
#[derive(Parser)]
#[command(name = "tutor", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Answer a single question and print the result
    Ask {
        /// The question to answer
        #[arg(short, long)]
        question: String,

        #[arg(long, default_value = "Mathematics")]
        subject: String,

        #[arg(long, default_value = "Beginner")]
        level: String,

        /// Learning style
        #[arg(long, default_value = "Visual (diagrams, charts, images)")]
        style: String,

        #[arg(long, default_value = "English")]
        language: String,

        /// Print the full response as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { logs } => {
            init_logging(logs, "info");
            if let Ok(path) = dotenv {
                debug!(path = %path.display(), "loaded .env");
            }
            run_server().await
        }
        Commands::Status => status::run(),
        Commands::Ask {
            question,
            subject,
            level,
            style,
            language,
            json,
            logs,
        } => {
            init_logging(logs, "warn");
            let request = TutorRequest::new(subject, level, style, language, question);
            run_ask(request, json).await
        }
    }
}

// ─────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────

async fn run_server() -> Result<()> {
    let config = load_config(None);
    let tutor = build_tutor(&config)?;

    info!(
        provider = tutor.provider().display_name(),
        model = tutor.provider().model(),
        configured = tutor.provider().is_configured(),
        "Starting Tutor API"
    );

    serve(AppState::new(tutor), &config.server)
        .await
        .with_context(|| format!("server failed on {}", config.server.bind_addr()))
}

async fn run_ask(request: TutorRequest, as_json: bool) -> Result<()> {
    let config = load_config(None);
    let tutor = build_tutor(&config)?;

    helpers::print_thinking();
    let result = tutor.answer(&request).await;
    helpers::clear_thinking();

    let response = result.context("tutor request failed")?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        helpers::print_answer(tutor.provider().display_name(), &response.answer);
    }
    Ok(())
}

/// Build the request handler from the loaded configuration.
fn build_tutor(config: &Config) -> Result<Tutor> {
    let provider = create_provider(config).context("failed to create LLM provider")?;
    Ok(Tutor::new(provider))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool, default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("tutor=debug,tutor_core=debug,tutor_providers=debug,tutor_server=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
