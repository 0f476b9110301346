//! # Flow Configuration
//!
//! One parameterized configuration for both pages: API base URL, cookie
//! TTLs, request timeout, and the page element bindings. The legacy
//! pages carried these inline in per-page script variants; here they are
//! data.

use crate::error::{FlowError, FlowResult};
use crate::page::PageBindings;
use serde::Deserialize;

/// Configuration for the correlation flow
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Base URL of the remote payment API (no trailing slash)
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Lifetime of the auth token cookie, in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Lifetime of the payment correlation cookie, in seconds
    #[serde(default = "default_payment_ttl_secs")]
    pub payment_ttl_secs: i64,

    /// HTTP client timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Page element identifiers
    #[serde(default)]
    pub bindings: PageBindings,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

// The legacy page variants disagreed on the TTL unit (1 day / 5 seconds /
// 5 minutes). Standardized on seconds, defaulting to the five-minute
// reading of the latest variant.
fn default_token_ttl_secs() -> i64 {
    300
}

fn default_payment_ttl_secs() -> i64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl FlowConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> FlowResult<Self> {
        toml::from_str(text)
            .map_err(|e| FlowError::Configuration(format!("Invalid flow config: {}", e)))
    }

    /// Builder: set the API base URL (for tests and mock servers)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            token_ttl_secs: default_token_ttl_secs(),
            payment_ttl_secs: default_payment_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            bindings: PageBindings::default(),
        }
    }
}
