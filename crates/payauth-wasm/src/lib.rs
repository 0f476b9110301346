//! # payauth-wasm
//!
//! Browser edge for the correlation flow. The protocol logic lives in
//! `payauth-core`; this crate binds its seams to the real page:
//! - `BrowserSession` — the `SessionStore` over `document.cookie`
//! - `WindowNavigator` and redirect helpers over `window.location`
//! - the pure helpers a page script calls from its own event handlers
//!
//! DOM wiring stays in the page script; it reads the element identifiers
//! from `FlowConfig.bindings` and calls in here on load and on click.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { BrowserSession, paymentIdFromUrl, redirect } from 'payauth-wasm';
//!
//! await init();
//!
//! const session = new BrowserSession();
//! const paymentId = paymentIdFromUrl(window.location.href);
//! session.writeCookie('payment', paymentId, 300);
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use chrono::{Duration, Utc};
use payauth_core::{cookie, payment as routes, Credentials, Navigator, SessionStore};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "panic-hook")]
    console_error_panic_hook::set_once();
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

/// `document.cookie`-backed session store.
///
/// Every operation is best-effort: a page without a cookie jar (or a jar
/// the browser refuses access to) reads as empty and swallows writes,
/// matching the protocol's infallible storage contract.
#[wasm_bindgen]
#[derive(Default)]
pub struct BrowserSession {}

impl BrowserSession {
    fn jar(&self) -> String {
        html_document()
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }

    fn apply(&self, assignment: &str) {
        if let Some(doc) = html_document() {
            let _ = doc.set_cookie(assignment);
        }
    }
}

#[wasm_bindgen]
impl BrowserSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    /// Set a cookie expiring `ttl_secs` from now (path `/`)
    #[wasm_bindgen(js_name = writeCookie)]
    pub fn write_cookie(&self, name: &str, value: &str, ttl_secs: i64) {
        let expires_at = Utc::now() + Duration::seconds(ttl_secs);
        self.apply(&cookie::set_cookie_string(name, value, expires_at));
    }

    /// Read a cookie, empty string when absent
    #[wasm_bindgen(js_name = readCookie)]
    pub fn read_cookie(&self, name: &str) -> String {
        cookie::read_cookie(&self.jar(), name)
    }

    /// Expire every visible cookie immediately
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all_cookies(&self) {
        for name in cookie::cookie_names(&self.jar()) {
            self.apply(&cookie::expired_cookie_string(&name));
        }
    }
}

impl SessionStore for BrowserSession {
    fn write(&self, name: &str, value: &str, ttl_secs: i64) {
        self.write_cookie(name, value, ttl_secs);
    }

    fn read(&self, name: &str) -> String {
        self.read_cookie(name)
    }

    fn clear_all(&self) {
        self.clear_all_cookies();
    }
}

/// `window.location`-backed navigator for the controllers
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn assign(&self, url: &str) {
        redirect(url);
    }

    fn replace(&self, url: &str) {
        redirect_replace(url);
    }
}

/// Full-page navigation, pushing a history entry
#[wasm_bindgen]
pub fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().assign(url);
    }
}

/// Full-page navigation, replacing the current history entry
#[wasm_bindgen(js_name = redirectReplace)]
pub fn redirect_replace(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().replace(url);
    }
}

/// The current page href, empty outside a window context
#[wasm_bindgen(js_name = currentHref)]
pub fn current_href() -> String {
    web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default()
}

/// Extract the payment identifier from a page href
#[wasm_bindgen(js_name = paymentIdFromUrl)]
pub fn payment_id_from_url(href: &str) -> Option<String> {
    routes::payment_id_from_url(href)
}

/// True when both login inputs are non-empty (request suppressed otherwise)
#[wasm_bindgen(js_name = credentialsComplete)]
pub fn credentials_complete(user_id: &str, password: &str) -> bool {
    Credentials::new(user_id, password).is_complete()
}

/// Login page URL for the no-token redirect
#[wasm_bindgen(js_name = loginUrl)]
pub fn login_url(base: &str) -> String {
    routes::login_url(base)
}

/// Authorize page URL the login page forwards to
#[wasm_bindgen(js_name = authorizeRequestUrl)]
pub fn authorize_request_url(base: &str, payment_id: &str) -> String {
    routes::authorize_request_url(base, payment_id)
}

/// Terminal success messages for the authorize page
#[wasm_bindgen(js_name = successMessages)]
pub fn success_messages() -> Vec<String> {
    payauth_core::SUCCESS_MESSAGES
        .iter()
        .map(|message| message.to_string())
        .collect()
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
