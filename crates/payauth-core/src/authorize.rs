//! # Authorize Page Controller
//!
//! The terminal page of the flow. On load it captures the payment
//! identifier from its own URL and bounces unauthenticated visitors to
//! the login page; on the authorize action it presents both halves of the
//! correlation (payment id + auth token) to the payment API.
//!
//! Status-code branching on the authorize response is an intentional
//! strengthening over the legacy pages, which treated any JSON reply as
//! success; see DESIGN.md.

use crate::config::FlowConfig;
use crate::error::{logging_sink, ErrorSink, FlowError};
use crate::gateway::{BoxedGateway, PaymentGateway};
use crate::page::{BoxedNavigator, Navigator};
use crate::payment::{login_url, payment_id_from_url};
use crate::session::{BoxedStore, SessionStore, PAYMENT_COOKIE, TOKEN_COOKIE};
use tracing::{debug, info, warn};

/// Authorize page states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeState {
    /// Page-load work not yet done
    Initializing,
    /// Correlation captured, waiting for the authorize action
    AwaitingAuthorization,
    /// Authorize request outstanding
    Authorizing,
    /// Terminal: the payment was authorized
    Authorized,
}

/// Result of the page-load initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No auth token present; the browser was sent to the login page.
    /// The payment cookie carries the correlation forward.
    RedirectedToLogin(String),
    /// Token and payment id are both in place; bind the authorize action
    Ready,
}

/// Result of driving the authorize action once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// 2xx from the API; show the terminal success messages
    Authorized,
    /// The payment was already authorized; no request issued
    AlreadyAuthorized,
    /// A request is already outstanding; this trigger was ignored
    InFlight,
    /// Non-success status from the API (reported to the sink)
    Rejected(u16),
    /// Transport or parse failure (reported to the sink)
    Failed,
}

/// Controller for the authorize page
pub struct AuthorizeController {
    state: AuthorizeState,
    in_flight: bool,
    config: FlowConfig,
    store: BoxedStore,
    gateway: BoxedGateway,
    navigator: BoxedNavigator,
    sink: ErrorSink,
}

impl AuthorizeController {
    pub fn new(
        config: FlowConfig,
        store: BoxedStore,
        gateway: BoxedGateway,
        navigator: BoxedNavigator,
    ) -> Self {
        Self {
            state: AuthorizeState::Initializing,
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

    pub fn state(&self) -> AuthorizeState {
        self.state
    }

    /// Page-load work, in order:
    ///
    /// 1. Stale-session guard: a token and a payment correlation both
    ///    present, with the stored correlation naming a *different*
    ///    payment than this page, means a reused page instance is
    ///    carrying an earlier session. Clear everything and force
    ///    re-authentication. (The legacy pages cleared whenever both cookies
    ///    existed, which also wiped the session on the return from login;
    ///    the mismatch condition keeps the guard's purpose without that
    ///    loop. See DESIGN.md.)
    /// 2. Capture the payment identifier from the page href and store it
    ///    with a bounded lifetime.
    /// 3. No token → full-page redirect to the login page. The payment
    ///    cookie carries the correlation, so no URL parameters are
    ///    needed. Otherwise the page binds the authorize action.
    pub fn initialize(&mut self, href: &str) -> InitOutcome {
        match payment_id_from_url(href) {
            Some(payment_id) => {
                if self.store.has(TOKEN_COOKIE)
                    && self.store.has(PAYMENT_COOKIE)
                    && self.store.read(PAYMENT_COOKIE) != payment_id
                {
                    debug!("stale session for a different payment, clearing cookie store");
                    self.store.clear_all();
                }
                self.store
                    .write(PAYMENT_COOKIE, &payment_id, self.config.payment_ttl_secs);
                debug!(%payment_id, "captured payment correlation");
            }
            None => {
                (self.sink)(&FlowError::Parse(format!(
                    "no payment identifier in page URL: {}",
                    href
                )));
            }
        }

        if !self.store.has(TOKEN_COOKIE) {
            let url = login_url(&self.config.api_base_url);
            info!("no auth token, forwarding to login page");
            self.navigator.assign(&url);
            return InitOutcome::RedirectedToLogin(url);
        }

        self.state = AuthorizeState::AwaitingAuthorization;
        InitOutcome::Ready
    }

    /// Drive the authorize action.
    ///
    /// Reads both correlation cookies, POSTs to the authorization
    /// endpoint with the token raw in the `Authorization` header, and
    /// branches on the response status. Failures go to the sink and the
    /// controller returns to `AwaitingAuthorization` so the user can
    /// retry the action; a completed authorization is terminal and
    /// re-triggering it is a no-op.
    pub async fn authorize(&mut self) -> AuthorizeOutcome {
        if self.state == AuthorizeState::Authorized {
            debug!("payment already authorized, ignoring trigger");
            return AuthorizeOutcome::AlreadyAuthorized;
        }
        if self.in_flight {
            debug!("authorize request already outstanding, ignoring trigger");
            return AuthorizeOutcome::InFlight;
        }

        let payment_id = self.store.read(PAYMENT_COOKIE);
        let token = self.store.read(TOKEN_COOKIE);

        if payment_id.is_empty() || token.is_empty() {
            // Cookies expired between page load and the click; the state
            // machine otherwise guarantees both are present here.
            let name = if payment_id.is_empty() {
                PAYMENT_COOKIE
            } else {
                TOKEN_COOKIE
            };
            (self.sink)(&FlowError::MissingCookie {
                name: name.to_string(),
            });
            return AuthorizeOutcome::Failed;
        }

        self.state = AuthorizeState::Authorizing;
        self.in_flight = true;
        let result = self.gateway.authorize(&payment_id, &token).await;
        self.in_flight = false;

        match result {
            Ok(receipt) if receipt.is_success() => {
                info!(%payment_id, "payment authorized");
                self.state = AuthorizeState::Authorized;
                AuthorizeOutcome::Authorized
            }
            Ok(receipt) => {
                warn!(%payment_id, status = receipt.status, "authorization rejected");
                (self.sink)(&FlowError::Api {
                    status: receipt.status,
                    message: receipt.body.to_string(),
                });
                self.state = AuthorizeState::AwaitingAuthorization;
                AuthorizeOutcome::Rejected(receipt.status)
            }
            Err(err) => {
                (self.sink)(&err);
                self.state = AuthorizeState::AwaitingAuthorization;
                AuthorizeOutcome::Failed
            }
        }
    }
}
