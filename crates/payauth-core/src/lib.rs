//! # payauth-core
//!
//! Core of the client-side session/payment correlation protocol: how a
//! browser ties an anonymous payment request to a subsequently
//! authenticated user session using nothing but cookies and page
//! redirects.
//!
//! This crate provides:
//! - `SessionStore` trait and `MemoryStore` for the cookie-jar state
//! - The `document.cookie` text codec used by the browser edge
//! - `PaymentGateway` trait as the seam to the remote payment API
//! - `LoginController` and `AuthorizeController`, the two page state
//!   machines
//! - `FlowConfig` and the page-boundary types
//!
//! ## Example
//!
//! ```rust,ignore
//! use payauth_core::{AuthorizeController, FlowConfig, MemoryStore};
//!
//! let store = MemoryStore::shared();
//! let mut page = AuthorizeController::new(config, store, gateway, navigator);
//!
//! // On page load: capture the payment id, redirect to login if needed.
//! page.initialize("http://host/payments/PID123/authorize/request");
//!
//! // On the authorize click:
//! let outcome = page.authorize().await;
//! ```

pub mod authorize;
pub mod config;
pub mod cookie;
pub mod error;
pub mod gateway;
pub mod login;
pub mod page;
pub mod payment;
pub mod session;

// Re-exports for convenience
pub use authorize::{AuthorizeController, AuthorizeOutcome, AuthorizeState, InitOutcome};
pub use config::FlowConfig;
pub use error::{logging_sink, ErrorSink, FlowError, FlowResult};
pub use gateway::{AuthorizeReceipt, BoxedGateway, PaymentGateway};
pub use login::{LoginController, LoginOutcome, LoginState};
pub use page::{BoxedNavigator, Credentials, Navigator, PageBindings, SUCCESS_MESSAGES};
pub use payment::{authorize_request_url, authorize_response_url, login_url, payment_id_from_url};
pub use session::{BoxedStore, MemoryStore, SessionStore, PAYMENT_COOKIE, TOKEN_COOKIE};
