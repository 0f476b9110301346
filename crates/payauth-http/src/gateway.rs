//! # HTTP Payment Gateway
//!
//! `reqwest` implementation of the `PaymentGateway` seam. One client per
//! gateway with a configured timeout; no retries, at most one outstanding
//! request per page action (the controllers guarantee that).

use async_trait::async_trait;
use payauth_core::{
    authorize_response_url, AuthorizeReceipt, Credentials, FlowConfig, FlowError, FlowResult,
    PaymentGateway,
};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Gateway to the remote payment API
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    /// Create a gateway from flow configuration
    pub fn new(config: &FlowConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.api_base_url.clone(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    #[instrument(skip(self, credentials), fields(user_id = %credentials.user_id))]
    async fn login(&self, credentials: &Credentials) -> FlowResult<String> {
        let url = format!("{}/user/login", self.base_url);
        let body = LoginRequest {
            user_id: &credentials.user_id,
            password: &credentials.password,
        };

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Login rejected: status={}, body={}", status, text);
            return Err(FlowError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let decoded: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| FlowError::Parse(format!("Malformed login response: {}", e)))?;

        debug!("login issued an auth token");
        Ok(decoded.message.auth_token)
    }

    #[instrument(skip(self, token), fields(payment_id = %payment_id))]
    async fn authorize(&self, payment_id: &str, token: &str) -> FlowResult<AuthorizeReceipt> {
        let url = authorize_response_url(&self.base_url, payment_id);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            // Raw token, no bearer scheme: the API reads the bare value.
            .header("Authorization", token)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(FlowError::Parse(format!(
                    "Malformed authorize response: {}",
                    e
                )));
            }
            // Error pages are not required to be JSON; keep the text so
            // the sink can log it.
            Err(_) => Value::String(text),
        };

        info!("authorize call returned status {}", status);
        Ok(AuthorizeReceipt {
            status: status.as_u16(),
            body,
        })
    }

    #[instrument(skip(self))]
    async fn check_connection(&self) -> FlowResult<String> {
        let url = format!("{}/account/connection", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let decoded: ConnectionResponse = response
            .json()
            .await
            .map_err(|e| FlowError::Parse(format!("Malformed connection response: {}", e)))?;

        info!("Status Message: {}", decoded.message.status);
        Ok(decoded.message.status)
    }

    #[instrument(skip(self, token))]
    async fn check_token(&self, token: &str) -> FlowResult<String> {
        let url = format!("{}/user/check/{}", self.base_url, token);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    message: LoginMessage,
}

#[derive(Debug, Deserialize)]
struct LoginMessage {
    auth_token: String,
}

#[derive(Debug, Deserialize)]
struct ConnectionResponse {
    message: ConnectionMessage,
}

#[derive(Debug, Deserialize)]
struct ConnectionMessage {
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use payauth_core::{
        AuthorizeController, AuthorizeOutcome, BoxedGateway, BoxedNavigator, BoxedStore,
        InitOutcome, LoginController, LoginOutcome, MemoryStore, Navigator, SessionStore,
        PAYMENT_COOKIE, TOKEN_COOKIE,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpGateway {
        HttpGateway::new(&FlowConfig::default().with_base_url(server.uri()))
    }

    #[derive(Default)]
    struct RecordingNavigator {
        assigned: Mutex<Vec<String>>,
        replaced: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn assign(&self, url: &str) {
            self.assigned.lock().unwrap().push(url.to_string());
        }

        fn replace(&self, url: &str) {
            self.replaced.lock().unwrap().push(url.to_string());
        }
    }

    #[tokio::test]
    async fn test_login_extracts_token_from_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/login"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"user_id": "u1", "password": "p1"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": {"auth_token": "T1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = gateway_for(&server)
            .login(&Credentials::new("u1", "p1"))
            .await
            .unwrap();
        assert_eq!(token, "T1");
    }

    #[tokio::test]
    async fn test_login_missing_auth_token_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"auth_token": "T1"})))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .login(&Credentials::new("u1", "p1"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Parse(_)));
    }

    #[tokio::test]
    async fn test_login_rejection_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .login(&Credentials::new("u1", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_authorize_sends_raw_authorization_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments/PID123/authorize/response"))
            .and(header("authorization", "T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = gateway_for(&server).authorize("PID123", "T1").await.unwrap();
        assert_eq!(receipt.status, 200);
        assert!(receipt.is_success());
    }

    #[tokio::test]
    async fn test_authorize_keeps_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments/PID123/authorize/response"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
            .mount(&server)
            .await;

        let receipt = gateway_for(&server).authorize("PID123", "T1").await.unwrap();
        assert_eq!(receipt.status, 500);
        assert!(receipt.is_server_error());
        assert_eq!(receipt.body, Value::String("<html>boom</html>".into()));
    }

    #[tokio::test]
    async fn test_authorize_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments/PID123/authorize/response"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).authorize("PID123", "T1").await.unwrap_err();
        assert!(matches!(err, FlowError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_check_reads_status_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/account/connection"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": {"status": "up"}})),
            )
            .mount(&server)
            .await;

        let status = gateway_for(&server).check_connection().await.unwrap();
        assert_eq!(status, "up");
    }

    #[tokio::test]
    async fn test_check_token_returns_body_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/check/T1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("token is valid"))
            .mount(&server)
            .await;

        let text = gateway_for(&server).check_token("T1").await.unwrap();
        assert_eq!(text, "token is valid");
    }

    /// The whole correlation protocol end to end: authorize page load with
    /// no token, login, return to the authorize page, authorize.
    #[tokio::test]
    async fn test_full_correlation_flow() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": {"auth_token": "T1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/payments/PID123/authorize/response"))
            .and(header("authorization", "T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let config = FlowConfig::default().with_base_url(server.uri());
        let store = MemoryStore::shared();
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = Arc::new(HttpGateway::new(&config));

        let page_href = format!("{}/payments/PID123/authorize/request", server.uri());

        // First authorize-page load: anonymous, bounced to login.
        let mut authorize_page = AuthorizeController::new(
            config.clone(),
            Arc::clone(&store) as BoxedStore,
            Arc::clone(&gateway) as BoxedGateway,
            Arc::clone(&navigator) as BoxedNavigator,
        );
        let init = authorize_page.initialize(&page_href);
        assert!(matches!(init, InitOutcome::RedirectedToLogin(_)));
        assert_eq!(store.read(PAYMENT_COOKIE), "PID123");

        // Login page: authenticate and get forwarded back.
        let mut login_page = LoginController::new(
            config.clone(),
            Arc::clone(&store) as BoxedStore,
            Arc::clone(&gateway) as BoxedGateway,
            Arc::clone(&navigator) as BoxedNavigator,
        );
        let outcome = login_page.submit(&Credentials::new("u1", "p1")).await;
        let expected_return = format!("{}/payments/PID123/authorize/request", server.uri());
        assert_eq!(outcome, LoginOutcome::Redirected(expected_return));
        assert_eq!(store.read(TOKEN_COOKIE), "T1");

        // Second authorize-page load: both halves present now.
        let mut authorize_page = AuthorizeController::new(
            config,
            Arc::clone(&store) as BoxedStore,
            Arc::clone(&gateway) as BoxedGateway,
            Arc::clone(&navigator) as BoxedNavigator,
        );
        assert_eq!(authorize_page.initialize(&page_href), InitOutcome::Ready);
        assert_eq!(authorize_page.authorize().await, AuthorizeOutcome::Authorized);
    }
}
