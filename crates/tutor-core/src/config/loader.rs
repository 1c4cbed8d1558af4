//! Config loader — reads `~/.tutor/config.json`, then merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.tutor/config.json`
//! 3. Environment variables (override JSON)
//!
//! A `.env` file is not read here; the binary loads it into the process
//! environment before calling [`load_config`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path (or `path`) + process env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup` instead of the
/// process environment.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = read_config_file(&config_path);
    apply_env_overrides(config, &lookup)
}

/// Read and parse a config file, or return defaults.
fn read_config_file(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `OPENAI_API_KEY`, `GEMINI_API_KEY` → `providers.<name>.api_key`
/// - `OPENAI_MODEL`, `GEMINI_MODEL` → `providers.<name>.model`
/// - `TUTOR_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `TUTOR_PROVIDER` → `provider`
/// - `TUTOR_GENERATION__MAX_TOKENS`, `__TEMPERATURE`, `__TIMEOUT_SECS`
/// - `PORT`, then `TUTOR_SERVER__PORT` → `server.port`
/// - `TUTOR_SERVER__HOST` → `server.host`
/// - `TUTOR_SERVER__ALLOWED_ORIGINS` (comma separated) → `server.allowed_origins`
///
/// Empty values are ignored. Unparseable numbers are logged and skipped.
fn apply_env_overrides<F>(mut config: Config, lookup: &F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    // Providers
    apply_provider_env(&mut config.providers.openai, "OPENAI", &get);
    apply_provider_env(&mut config.providers.gemini, "GEMINI", &get);

    if let Some(val) = get("TUTOR_PROVIDER") {
        config.provider = Some(val.trim().to_lowercase());
    }

    // Generation
    if let Some(n) = parse_var(&get, "TUTOR_GENERATION__MAX_TOKENS") {
        config.generation.max_tokens = n;
    }
    if let Some(t) = parse_var(&get, "TUTOR_GENERATION__TEMPERATURE") {
        config.generation.temperature = t;
    }
    if let Some(secs) = parse_var(&get, "TUTOR_GENERATION__TIMEOUT_SECS") {
        config.generation.timeout_secs = Some(secs);
    }

    // Server
    if let Some(val) = get("TUTOR_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(p) = parse_var(&get, "PORT") {
        config.server.port = p;
    }
    if let Some(p) = parse_var(&get, "TUTOR_SERVER__PORT") {
        config.server.port = p;
    }
    if let Some(val) = get("TUTOR_SERVER__ALLOWED_ORIGINS") {
        config.server.allowed_origins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env<G>(provider: &mut ProviderConfig, name: &str, get: &G)
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(val) = get(&format!("{name}_API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = get(&format!("{name}_MODEL")) {
        provider.model = Some(val);
    }
    if let Some(val) = get(&format!("TUTOR_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

fn parse_var<G, T>(get: &G, key: &str) -> Option<T>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = get(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = key, value = %raw, "ignoring unparseable env var");
            None
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
