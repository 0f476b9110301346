//! # Login Page Controller
//!
//! Collects credentials, authenticates against the payment API, persists
//! the issued auth token, and forwards the browser to the authorize page
//! with the stored payment correlation re-attached.
//!
//! The state machine is deliberately small: `AwaitingInput` until the
//! login action fires, `Submitting` from then on. There is no error
//! state; a failed attempt is reported to the error sink and the user
//! retries the action, matching the legacy pages.

use crate::config::FlowConfig;
use crate::error::{logging_sink, ErrorSink};
use crate::gateway::{BoxedGateway, PaymentGateway};
use crate::page::{BoxedNavigator, Credentials, Navigator};
use crate::payment::authorize_request_url;
use crate::session::{BoxedStore, SessionStore, PAYMENT_COOKIE, TOKEN_COOKIE};
use tracing::{debug, info, warn};

/// Login page states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for the login action
    AwaitingInput,
    /// At least one login request has been issued
    Submitting,
}

/// Result of driving the login action once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Required input was empty; no request was issued (silent no-op)
    Skipped,
    /// A request is already outstanding; this trigger was ignored
    InFlight,
    /// Token stored and navigation to the authorize page performed
    Redirected(String),
    /// Request or response handling failed; reported to the sink
    Failed,
}

/// Controller for the login page
pub struct LoginController {
    state: LoginState,
    in_flight: bool,
    config: FlowConfig,
    store: BoxedStore,
    gateway: BoxedGateway,
    navigator: BoxedNavigator,
    sink: ErrorSink,
}

impl LoginController {
    pub fn new(
        config: FlowConfig,
        store: BoxedStore,
        gateway: BoxedGateway,
        navigator: BoxedNavigator,
    ) -> Self {
        Self {
            state: LoginState::AwaitingInput,
            in_flight: false,
            config,
            store,
            gateway,
            navigator,
            sink: logging_sink(),
        }
    }

    /// Builder: replace the error sink (tests assert on failures here)
    pub fn with_error_sink(mut self, sink: ErrorSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Drive the login action.
    ///
    /// On success the auth token is written to the store, the previously
    /// stored payment identifier is read back, and the navigator performs
    /// a `replace` to `<base>/payments/<payment_id>/authorize/request` so
    /// the login page does not linger in history.
    ///
    /// On failure the error goes to the sink and the state remains
    /// `Submitting`; the trigger stays live for a retry. Re-triggering
    /// while a request is outstanding is ignored.
    pub async fn submit(&mut self, credentials: &Credentials) -> LoginOutcome {
        if self.in_flight {
            debug!("login request already outstanding, ignoring trigger");
            return LoginOutcome::InFlight;
        }
        if !credentials.is_complete() {
            debug!("login inputs incomplete, suppressing request");
            return LoginOutcome::Skipped;
        }

        self.state = LoginState::Submitting;
        self.in_flight = true;
        let result = self.gateway.login(credentials).await;
        self.in_flight = false;

        match result {
            Ok(token) => {
                self.store
                    .write(TOKEN_COOKIE, &token, self.config.token_ttl_secs);

                let payment_id = self.store.read(PAYMENT_COOKIE);
                if payment_id.is_empty() {
                    warn!("no payment correlation stored before login");
                }

                let url = authorize_request_url(&self.config.api_base_url, &payment_id);
                info!(user_id = %credentials.user_id, "login succeeded, forwarding to authorize page");
                self.navigator.replace(&url);
                LoginOutcome::Redirected(url)
            }
            Err(err) => {
                (self.sink)(&err);
                LoginOutcome::Failed
            }
        }
    }
}
