//! Site settings.

use crate::checkout::{default_delivery_options, DeliveryDateOption};
use serde::{Deserialize, Serialize};

/// An accepted payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    /// Display name, also used as the identifier on orders.
    pub name: String,
    /// Commission percentage charged on top, if any.
    pub commission: f64,
}

/// Admin-editable site configuration. A single document in the store,
/// served through the settings cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSettings {
    /// Site display name.
    pub site_name: String,
    /// Items per page in listings.
    pub page_size: usize,
    /// Accepted payment methods.
    pub available_payment_methods: Vec<PaymentMethod>,
    /// Default payment method name.
    pub default_payment_method: String,
    /// Configured delivery tiers, fastest first.
    pub available_delivery_dates: Vec<DeliveryDateOption>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Wazobia".to_string(),
            page_size: 9,
            available_payment_methods: vec![
                PaymentMethod {
                    name: "PayPal".to_string(),
                    commission: 0.0,
                },
                PaymentMethod {
                    name: "Stripe".to_string(),
                    commission: 0.0,
                },
                PaymentMethod {
                    name: "Cash On Delivery".to_string(),
                    commission: 0.0,
                },
            ],
            default_payment_method: "Cash On Delivery".to_string(),
            available_delivery_dates: default_delivery_options(),
        }
    }
}
