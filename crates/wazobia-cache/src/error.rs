//! Cache error types.

use thiserror::Error;

/// Errors that can occur in cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A (de)serialization failure on the way in or out of the cache.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The cache lock was poisoned by a panicking writer.
    #[error("Cache lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}
