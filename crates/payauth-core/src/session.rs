//! # Session Store
//!
//! The cookie jar abstraction shared by both page controllers. It is the
//! only persistent state in the flow: two string-keyed entries with
//! per-entry expiry.
//!
//! Read semantics follow the browser cookie jar exactly: an absent,
//! expired, or empty-valued entry all read back as the empty string.
//! Callers treat the empty string as "not there" (no separate null/empty
//! distinction).
//!
//! TTLs are in seconds. The legacy page scripts drifted between days,
//! seconds, and minutes across variants; seconds is the standardized unit
//! here (see DESIGN.md).

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Cookie key holding the auth token
pub const TOKEN_COOKIE: &str = "token";

/// Cookie key holding the pending payment identifier
pub const PAYMENT_COOKIE: &str = "payment";

/// Key-value persistence with per-entry expiry.
///
/// All operations are best-effort and infallible, matching browser
/// cookie storage: there is no error channel to report through.
pub trait SessionStore: Send + Sync {
    /// Set `name` to `value`, expiring `ttl_secs` from now.
    fn write(&self, name: &str, value: &str, ttl_secs: i64);

    /// Read the value of `name`, or the empty string when absent or
    /// expired.
    fn read(&self, name: &str) -> String;

    /// Expire every visible entry immediately. Idempotent.
    fn clear_all(&self);

    /// True when `name` reads back non-empty.
    fn has(&self, name: &str) -> bool {
        !self.read(name).is_empty()
    }
}

/// Type alias for a shared session store (dynamic dispatch)
pub type BoxedStore = Arc<dyn SessionStore>;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-process session store.
///
/// Backs the controllers in tests and in the headless driver; the browser
/// edge substitutes a `document.cookie`-backed implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shareable store handle
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl SessionStore for MemoryStore {
    fn write(&self, name: &str, value: &str, ttl_secs: i64) {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(name.to_string(), entry);
        }
    }

    fn read(&self, name: &str) -> String {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => return String::new(),
        };
        match entries.get(name) {
            Some(entry) if entry.expires_at > Utc::now() => entry.value.clone(),
            _ => String::new(),
        }
    }

    fn clear_all(&self) {
        // Expire rather than remove: matches the cookie-jar clear, which
        // rewrites each entry with an epoch expiry.
        if let Ok(mut entries) = self.entries.write() {
            for entry in entries.values_mut() {
                entry.expires_at = DateTime::<Utc>::UNIX_EPOCH;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_before_expiry() {
        let store = MemoryStore::new();
        store.write(TOKEN_COOKIE, "T1", 60);
        assert_eq!(store.read(TOKEN_COOKIE), "T1");
        assert!(store.has(TOKEN_COOKIE));
    }

    #[test]
    fn test_expired_entry_reads_empty() {
        let store = MemoryStore::new();
        store.write(PAYMENT_COOKIE, "PID123", 0);
        assert_eq!(store.read(PAYMENT_COOKIE), "");

        store.write(PAYMENT_COOKIE, "PID123", -5);
        assert_eq!(store.read(PAYMENT_COOKIE), "");
        assert!(!store.has(PAYMENT_COOKIE));
    }

    #[test]
    fn test_absent_entry_reads_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.read("nothing"), "");
    }

    #[test]
    fn test_empty_value_is_absent() {
        let store = MemoryStore::new();
        store.write(TOKEN_COOKIE, "", 60);
        assert_eq!(store.read(TOKEN_COOKIE), "");
        assert!(!store.has(TOKEN_COOKIE));
    }

    #[test]
    fn test_overwrite_refreshes_value_and_expiry() {
        let store = MemoryStore::new();
        store.write(TOKEN_COOKIE, "old", -1);
        store.write(TOKEN_COOKIE, "new", 60);
        assert_eq!(store.read(TOKEN_COOKIE), "new");
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let store = MemoryStore::new();
        store.write(TOKEN_COOKIE, "T1", 60);
        store.write(PAYMENT_COOKIE, "PID123", 60);

        store.clear_all();
        assert_eq!(store.read(TOKEN_COOKIE), "");
        assert_eq!(store.read(PAYMENT_COOKIE), "");

        // Second clear leaves the same observable state.
        store.clear_all();
        assert_eq!(store.read(TOKEN_COOKIE), "");
        assert_eq!(store.read(PAYMENT_COOKIE), "");
    }

    #[test]
    fn test_write_after_clear_is_visible() {
        let store = MemoryStore::new();
        store.write(TOKEN_COOKIE, "T1", 60);
        store.clear_all();
        store.write(TOKEN_COOKIE, "T2", 60);
        assert_eq!(store.read(TOKEN_COOKIE), "T2");
    }
}
