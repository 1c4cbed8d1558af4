//! `tutor status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use tutor_core::config::{get_config_path, load_config};
use tutor_providers::registry::{select_provider, PROVIDERS};

use crate::helpers::{key_status, mask_key};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Tutor Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using env + defaults)".dimmed().to_string()
        }
    );

    // Active provider
    let active = select_provider(&config)?;
    let active_config = config.providers.get_by_name(active.name);
    let model = active_config
        .and_then(|p| p.model.clone())
        .unwrap_or_else(|| active.default_model.to_string());
    println!("  {:<18} {}", "Provider:".bold(), active.display_name);
    println!("  {:<18} {}", "Model:".bold(), model);

    // Parameters
    let timeout = config
        .generation
        .timeout_secs
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "none".to_string());
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "temp: {} | max_tokens: {} | timeout: {}",
            config.generation.temperature, config.generation.max_tokens, timeout
        )
        .dimmed(),
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for spec in PROVIDERS {
        let provider = config.providers.get_by_name(spec.name);
        let configured = provider.is_some_and(|p| p.is_configured());
        let key = provider
            .filter(|p| p.is_configured())
            .map(|p| format!(" {}", mask_key(p.api_key.trim()).dimmed()))
            .unwrap_or_default();
        println!(
            "    {:<12} {:<18} {}{}",
            spec.display_name,
            spec.env_key.dimmed(),
            key_status(configured),
            key
        );
    }

    // Server
    println!();
    println!("  {:<18} {}", "Listen:".bold(), config.server.bind_addr());
    println!(
        "  {:<18} {}",
        "CORS origins:".bold(),
        config.server.allowed_origins.join(", ")
    );
    println!();

    Ok(())
}
