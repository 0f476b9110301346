//! # Flow Error Types
//!
//! Typed error handling for the payment-authorization flow.
//! All fallible flow operations return `Result<T, FlowError>`.

use thiserror::Error;

/// Core error type for all flow operations
#[derive(Debug, Error)]
pub enum FlowError {
    /// Configuration errors (missing env vars, bad config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/transport error talking to the payment API
    #[error("Network error: {0}")]
    Network(String),

    /// Response body is not valid JSON or lacks an expected field
    #[error("Parse error: {0}")]
    Parse(String),

    /// The payment API rejected the request with a non-success status
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    /// A correlation cookie was missing at the moment it was needed
    #[error("Missing cookie: {name}")]
    MissingCookie { name: String },
}

impl FlowError {
    /// Returns true if retrying the same action could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::Network(_) | FlowError::Api { status: 500..=599, .. }
        )
    }

    /// Returns true for client-side (4xx) API rejections
    pub fn is_client_error(&self) -> bool {
        matches!(self, FlowError::Api { status: 400..=499, .. })
    }
}

/// Result type alias for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

/// Injectable sink for failures the flow swallows from the user's view.
///
/// The baseline policy logs and does nothing else; tests inject a
/// recording sink to assert on failure occurrences.
pub type ErrorSink = std::sync::Arc<dyn Fn(&FlowError) + Send + Sync>;

/// Default sink: route to the diagnostic log only
pub fn logging_sink() -> ErrorSink {
    std::sync::Arc::new(|err| tracing::warn!("flow error: {}", err))
}
