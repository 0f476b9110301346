//! # Configuration Loading
//!
//! Layered flow configuration: built-in defaults, then an optional
//! `config/flow.toml`, then environment-variable overrides. Environment
//! values that fail to parse fall back silently, file parse errors are
//! surfaced.

use payauth_core::{FlowConfig, FlowError, FlowResult};

/// Load the flow configuration for this process.
///
/// Env overrides:
/// - `PAYAUTH_BASE_URL`
/// - `PAYAUTH_TOKEN_TTL_SECS`
/// - `PAYAUTH_PAYMENT_TTL_SECS`
/// - `PAYAUTH_REQUEST_TIMEOUT_SECS`
pub fn load_config() -> FlowResult<FlowConfig> {
    dotenvy::dotenv().ok();

    let mut config = load_config_file()?.unwrap_or_default();

    if let Ok(base_url) = std::env::var("PAYAUTH_BASE_URL") {
        config.api_base_url = base_url;
    }
    if let Some(ttl) = env_i64("PAYAUTH_TOKEN_TTL_SECS") {
        config.token_ttl_secs = ttl;
    }
    if let Some(ttl) = env_i64("PAYAUTH_PAYMENT_TTL_SECS") {
        config.payment_ttl_secs = ttl;
    }
    if let Some(timeout) = env_u64("PAYAUTH_REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = timeout;
    }

    Ok(config)
}

/// Try the usual config file locations
fn load_config_file() -> FlowResult<Option<FlowConfig>> {
    let config_paths = [
        "config/flow.toml",
        "../config/flow.toml",
        "../../config/flow.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let config = FlowConfig::from_toml_str(&content)
                .map_err(|e| FlowError::Configuration(format!("{}: {}", path, e)))?;
            tracing::info!("Loaded flow config from {}", path);
            return Ok(Some(config));
        }
    }

    tracing::debug!("No flow config file found, using defaults");
    Ok(None)
}

fn env_i64(name: &str) -> Option<i64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
