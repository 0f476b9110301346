//! # Payment Gateway Trait
//!
//! The seam between the page controllers and the remote payment API.
//! Controllers only ever see this trait, which keeps the correlation
//! logic testable without a transport; `payauth-http` provides the
//! `reqwest`-backed implementation.

use crate::error::FlowResult;
use crate::page::Credentials;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote payment API operations consumed by the flow
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `POST /user/login` with the credentials as a JSON body.
    ///
    /// Returns the issued auth token from the `message.auth_token` field
    /// of the response.
    async fn login(&self, credentials: &Credentials) -> FlowResult<String>;

    /// `POST /payments/{payment_id}/authorize/response` with the token
    /// carried raw in the `Authorization` header (no bearer scheme; the
    /// API expects the bare value).
    async fn authorize(&self, payment_id: &str, token: &str) -> FlowResult<AuthorizeReceipt>;

    /// `GET /account/connection` — diagnostic reachability probe.
    /// Returns the `message.status` field.
    async fn check_connection(&self) -> FlowResult<String>;

    /// `GET /user/check/{token}` — diagnostic token probe. Returns the
    /// raw response text.
    async fn check_token(&self, token: &str) -> FlowResult<String>;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedGateway = Arc<dyn PaymentGateway>;

/// Outcome of an authorize call.
///
/// The body is decoded but deliberately uninspected JSON; the status code
/// drives the controller's branching.
#[derive(Debug, Clone)]
pub struct AuthorizeReceipt {
    pub status: u16,
    pub body: serde_json::Value,
}

impl AuthorizeReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_status_classes() {
        let receipt = AuthorizeReceipt {
            status: 200,
            body: serde_json::json!({}),
        };
        assert!(receipt.is_success());
        assert!(!receipt.is_client_error());

        let rejected = AuthorizeReceipt {
            status: 401,
            body: serde_json::json!({"message": "bad token"}),
        };
        assert!(rejected.is_client_error());
        assert!(!rejected.is_success());

        let broken = AuthorizeReceipt {
            status: 502,
            body: serde_json::Value::Null,
        };
        assert!(broken.is_server_error());
    }
}
