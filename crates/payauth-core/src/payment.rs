//! # Payment Reference
//!
//! Extraction of the pending payment identifier from the authorize page's
//! own URL, plus the route templates the flow navigates between.
//!
//! The authorize page is served at
//! `http://<host>/payments/<payment_id>/authorize/request`, which places
//! the identifier at a fixed position when the full href is split on `/`.

/// Fixed `/`-split position of the payment identifier in the page href
pub const PAYMENT_ID_SEGMENT: usize = 4;

/// Extract the payment identifier from a page href.
///
/// Returns `None` when the href is too short or the segment is empty; the
/// identifier itself is opaque and passed through untouched.
pub fn payment_id_from_url(href: &str) -> Option<String> {
    href.split('/')
        .nth(PAYMENT_ID_SEGMENT)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Login page URL for the no-token redirect
pub fn login_url(base: &str) -> String {
    format!("{}/account/login", base)
}

/// Authorize page URL the login page forwards to after a successful login
pub fn authorize_request_url(base: &str, payment_id: &str) -> String {
    format!("{}/payments/{}/authorize/request", base, payment_id)
}

/// Authorization endpoint invoked by the authorize action
pub fn authorize_response_url(base: &str, payment_id: &str) -> String {
    format!("{}/payments/{}/authorize/response", base, payment_id)
}
