//! # payauth-http
//!
//! `reqwest`-backed implementation of the payment API gateway, plus
//! layered configuration loading (defaults → `config/flow.toml` → env).
//!
//! ## Example
//!
//! ```rust,ignore
//! use payauth_http::{load_config, HttpGateway};
//!
//! let config = load_config()?;
//! let gateway = HttpGateway::new(&config);
//! let status = gateway.check_connection().await?;
//! ```

pub mod config;
pub mod gateway;

// Re-exports for convenience
pub use config::load_config;
pub use gateway::HttpGateway;
