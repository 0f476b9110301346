//! # Page Boundary
//!
//! The flow treats the page itself as an external collaborator: it hands
//! over credentials as opaque strings, exposes element identifiers the
//! edge binds click handlers to, and owns the navigation primitive. This
//! module carries those boundary types.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Terminal messages shown once a payment is authorized
pub const SUCCESS_MESSAGES: [&str; 3] = [
    "Your Payment was authorized.",
    "You can close the page.",
    "Thank you!",
];

/// User-entered login credentials.
///
/// Transient: read once from the page inputs, sent once on the login
/// request, never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Both fields non-empty. An incomplete pair suppresses the login
    /// request entirely (silent no-op, not an error).
    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Element identifiers the protocol logic binds to.
///
/// Defaults match the legacy markup; deployments with different markup
/// override them in config.
#[derive(Debug, Clone, Deserialize)]
pub struct PageBindings {
    /// Login action trigger element id
    #[serde(default = "default_login_trigger")]
    pub login_trigger: String,

    /// Authorize action trigger element id
    #[serde(default = "default_authorize_trigger")]
    pub authorize_trigger: String,

    /// Name of the user-id form input
    #[serde(default = "default_user_field")]
    pub user_field: String,

    /// Name of the password form input
    #[serde(default = "default_pass_field")]
    pub pass_field: String,

    /// Ids of the terminal message elements on the authorize page
    #[serde(default = "default_message_elements")]
    pub message_elements: Vec<String>,
}

fn default_login_trigger() -> String {
    "login".to_string()
}

fn default_authorize_trigger() -> String {
    "authorize".to_string()
}

fn default_user_field() -> String {
    "user_id".to_string()
}

fn default_pass_field() -> String {
    "pass".to_string()
}

fn default_message_elements() -> Vec<String> {
    vec![
        "message0".to_string(),
        "message1".to_string(),
        "message2".to_string(),
    ]
}

impl Default for PageBindings {
    fn default() -> Self {
        Self {
            login_trigger: default_login_trigger(),
            authorize_trigger: default_authorize_trigger(),
            user_field: default_user_field(),
            pass_field: default_pass_field(),
            message_elements: default_message_elements(),
        }
    }
}

/// Full-page navigation seam.
///
/// `assign` pushes history, `replace` swaps the current entry. The login
/// controller uses `replace` on success so the login page never lingers
/// in history behind the authorize page.
pub trait Navigator: Send + Sync {
    fn assign(&self, url: &str);
    fn replace(&self, url: &str);
}

/// Type alias for a shared navigator (dynamic dispatch)
pub type BoxedNavigator = Arc<dyn Navigator>;
