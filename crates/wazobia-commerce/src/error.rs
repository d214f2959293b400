//! Commerce error types.
//!
//! A closed enum rather than stringly-typed errors: every boundary maps its
//! failures into one of these variants, and the service layer renders the
//! display text straight to the caller.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Order not found. Display text is user-facing.
    #[error("Order not found")]
    OrderNotFound,

    /// Product not found.
    #[error("Product not found")]
    ProductNotFound,

    /// User not found.
    #[error("User not found")]
    UserNotFound,

    /// Paid transition attempted on an already-paid order. Terminal,
    /// non-retryable.
    #[error("Order is already paid")]
    OrderAlreadyPaid,

    /// Delivered transition attempted on an unpaid order.
    #[error("Order is not paid")]
    OrderNotPaid,

    /// Stock decrement would take inventory negative.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Schema-level validation failure with a field-level message.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Payment capture did not match the recorded intent.
    #[error("Error in payment capture: {0}")]
    PaymentFailed(String),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Email delivery failure.
    #[error("Email error: {0}")]
    EmailError(String),
}

impl From<wazobia_store::StoreError> for CommerceError {
    fn from(e: wazobia_store::StoreError) -> Self {
        CommerceError::StoreError(e.to_string())
    }
}

impl From<wazobia_cache::CacheError> for CommerceError {
    fn from(e: wazobia_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
