//! Key-value cache with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    bytes: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|at| now >= at).unwrap_or(false)
    }
}

/// In-memory cache with per-entry TTL and explicit invalidation.
///
/// Values serialize through JSON, so any `Serialize`/`DeserializeOwned`
/// type can be cached. Entries without a TTL live until invalidated.
#[derive(Default)]
pub struct Cache {
    entries: Mutex<HashMap<String, Entry>>,
    default_ttl: Option<Duration>,
}

impl Cache {
    /// Create a cache whose entries never expire on their own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache applying `ttl` to every entry set without an
    /// explicit TTL.
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl: Some(ttl),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or its entry has expired.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let settings: Option<SiteSettings> = cache.get("settings")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        let now = Instant::now();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired(now) {
                entries.remove(key);
                return Ok(None);
            }
            let value: T = serde_json::from_slice(&entry.bytes)?;
            return Ok(Some(value));
        }
        Ok(None)
    }

    /// Set a value, applying the cache's default TTL if one is configured.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.set_entry(key, value, self.default_ttl)
    }

    /// Set a value with an explicit TTL.
    pub fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.set_entry(key, value, Some(ttl))
    }

    fn set_entry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(
            key.to_string(),
            Entry {
                bytes,
                expires_at: ttl.map(|t| Instant::now() + t),
            },
        );
        Ok(())
    }

    /// Delete a key. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    /// Check if a key exists (and has not expired).
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get::<serde_json::Value>(key)?.is_some())
    }

    /// Live keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        let now = Instant::now();
        Ok(entries
            .iter()
            .filter(|(_, e)| !e.is_expired(now))
            .map(|(k, _)| k.clone())
            .collect())
    }

    /// Delete every key starting with `prefix`. Returns how many were
    /// removed. This is the invalidation path for view keys like
    /// `order:<id>`.
    pub fn invalidate_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        let before = entries.len();
        entries.retain(|k, _| !k.starts_with(prefix));
        Ok(before - entries.len())
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("order", order_id);
/// // "order:68f1..."
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
