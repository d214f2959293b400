//! Payment gateway port.
//!
//! The hosted provider is behind a trait: the service only needs to open
//! an intent for an amount, capture it later, and accept the provider's
//! webhook event when the capture settles out-of-band.

use serde::{Deserialize, Serialize};
use wazobia_commerce::{CommerceError, Money, OrderId};

/// Status string providers report on a settled capture.
pub const CAPTURE_COMPLETED: &str = "COMPLETED";

/// A provider-side payment intent opened for an order total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    /// Provider-side id to capture against.
    pub id: String,
}

/// The provider's answer to a capture call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentCapture {
    /// Provider-side id; must match the recorded intent.
    pub id: String,
    /// Provider status (see [`CAPTURE_COMPLETED`]).
    pub status: String,
    /// Payer email reported by the provider.
    pub payer_email: String,
    /// Amount captured.
    pub amount: Money,
}

impl PaymentCapture {
    /// Whether the capture settled.
    pub fn is_completed(&self) -> bool {
        self.status == CAPTURE_COMPLETED
    }
}

/// An inbound provider webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PaymentEvent {
    /// A charge settled; the order id rides in the charge metadata.
    ChargeSucceeded {
        /// Provider event id.
        event_id: String,
        /// Order the charge belongs to.
        order_id: OrderId,
        /// Payer email from the billing details.
        payer_email: String,
        /// Amount charged.
        amount: Money,
    },
}

/// A hosted payment provider.
pub trait PaymentGateway {
    /// Open an intent for the given amount.
    fn create_order(&self, amount: Money) -> Result<PaymentIntent, CommerceError>;

    /// Capture a previously opened intent.
    fn capture_payment(&self, intent_id: &str) -> Result<PaymentCapture, CommerceError>;
}
