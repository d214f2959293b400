//! Store error types.

use thiserror::Error;

/// Errors that can occur in store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document not found.
    #[error("Document not found")]
    NotFound,

    /// A (de)serialization failure while crossing the document boundary.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
