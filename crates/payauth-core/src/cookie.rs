//! # Cookie Text Codec
//!
//! Pure functions over `document.cookie` text. The browser edge reads and
//! writes the real jar through these; everything here is string-in,
//! string-out and carries the legacy page scripts' exact lookup
//! semantics (split on `;`, trim leading spaces, first `name=` prefix
//! match wins, empty string when missing).

use chrono::{DateTime, Utc};

/// `toUTCString`-compatible expires format (RFC 1123 with a GMT suffix)
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Look up `name` in a cookie header string.
///
/// Returns the raw value (which may itself contain `=`), or the empty
/// string when the cookie is not present.
pub fn read_cookie(jar: &str, name: &str) -> String {
    let prefix = format!("{}=", name);
    for part in jar.split(';') {
        let part = part.trim_start_matches(' ');
        if let Some(value) = part.strip_prefix(&prefix) {
            return value.to_string();
        }
    }
    String::new()
}

/// List the names of every cookie visible in a jar string
pub fn cookie_names(jar: &str) -> Vec<String> {
    jar.split(';')
        .map(|part| part.trim_start_matches(' '))
        .filter(|part| !part.is_empty())
        .map(|part| match part.find('=') {
            Some(idx) => part[..idx].to_string(),
            None => part.to_string(),
        })
        .collect()
}

/// Render a `Set-Cookie`-style assignment for `document.cookie`
pub fn set_cookie_string(name: &str, value: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; expires={}; path=/",
        name,
        value,
        expires_at.format(EXPIRES_FORMAT)
    )
}

/// Render an assignment that expires `name` immediately (epoch expiry)
pub fn expired_cookie_string(name: &str) -> String {
    set_cookie_string(name, "", DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_present_cookie() {
        let jar = "token=T1; payment=PID123";
        assert_eq!(read_cookie(jar, "token"), "T1");
        assert_eq!(read_cookie(jar, "payment"), "PID123");
    }

    #[test]
    fn test_read_missing_cookie_is_empty() {
        assert_eq!(read_cookie("token=T1", "payment"), "");
        assert_eq!(read_cookie("", "token"), "");
    }

    #[test]
    fn test_read_trims_leading_spaces() {
        let jar = "other=x;  token=T1";
        assert_eq!(read_cookie(jar, "token"), "T1");
    }

    #[test]
    fn test_read_value_may_contain_equals() {
        let jar = "token=abc=def";
        assert_eq!(read_cookie(jar, "token"), "abc=def");
    }

    #[test]
    fn test_read_first_match_wins() {
        let jar = "token=first; token=second";
        assert_eq!(read_cookie(jar, "token"), "first");
    }

    #[test]
    fn test_cookie_names() {
        let jar = "token=T1; payment=PID123; flag";
        assert_eq!(cookie_names(jar), vec!["token", "payment", "flag"]);
        assert!(cookie_names("").is_empty());
    }

    #[test]
    fn test_set_cookie_string() {
        let expires = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(
            set_cookie_string("payment", "PID123", expires),
            "payment=PID123; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"
        );
    }

    #[test]
    fn test_expired_cookie_string_hits_epoch() {
        assert_eq!(
            expired_cookie_string("token"),
            "token=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"
        );
    }
}
