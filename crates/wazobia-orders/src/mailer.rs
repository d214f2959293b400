//! Email port and message builders.

use serde::{Deserialize, Serialize};
use wazobia_commerce::{CommerceError, OrderId};

/// Which template an email renders with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EmailKind {
    /// Order receipt sent when payment confirms.
    PurchaseReceipt {
        /// The paid order.
        order_id: OrderId,
    },
    /// Request to review the ordered items, sent after delivery.
    ReviewRequest {
        /// The delivered order.
        order_id: OrderId,
    },
}

/// An outgoing email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailMessage {
    /// Sender, "Name <address>".
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Template selection.
    pub kind: EmailKind,
    /// Unix timestamp to defer delivery until, if any.
    pub scheduled_at: Option<i64>,
}

/// A hosted email provider.
pub trait Mailer {
    /// Send (or schedule) a message.
    fn send(&self, message: EmailMessage) -> Result<(), CommerceError>;
}

/// Build the purchase-receipt email for a paid order.
pub fn purchase_receipt(
    from: String,
    to: String,
    order_id: OrderId,
) -> EmailMessage {
    EmailMessage {
        from,
        to,
        subject: "Order Confirmation".to_string(),
        kind: EmailKind::PurchaseReceipt { order_id },
        scheduled_at: None,
    }
}

/// Build the review-request email for a delivered order, scheduled one day
/// out so it lands after the package does.
pub fn review_request(
    from: String,
    to: String,
    order_id: OrderId,
    now: i64,
) -> EmailMessage {
    EmailMessage {
        from,
        to,
        subject: "Review your order items".to_string(),
        kind: EmailKind::ReviewRequest { order_id },
        scheduled_at: Some(now + 24 * 60 * 60),
    }
}
