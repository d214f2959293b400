//! Service configuration.

/// Configuration for the order service, injected at construction.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Whether marking an order paid decrements product stock. Replaces
    /// the environment's connection-string check with an explicit flag;
    /// disable it against seeded development data.
    pub decrement_stock_on_payment: bool,
    /// Sender name on outgoing email.
    pub sender_name: String,
    /// Sender address on outgoing email.
    pub sender_email: String,
    /// Items per page in listings.
    pub page_size: usize,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            decrement_stock_on_payment: true,
            sender_name: "support".to_string(),
            sender_email: "onboarding@resend.dev".to_string(),
            page_size: 9,
        }
    }
}
