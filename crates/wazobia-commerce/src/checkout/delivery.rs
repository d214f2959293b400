//! Delivery date options.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A named shipping tier: how fast it arrives, what it costs, and the
/// order value above which it ships free.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryDateOption {
    /// Display name (e.g., "Tomorrow").
    pub name: String,
    /// Days until expected delivery.
    pub days_to_deliver: i64,
    /// Flat shipping price for this tier.
    pub shipping_price: Money,
    /// Free shipping applies at or above this items total. Zero means the
    /// tier never ships free.
    pub free_shipping_min_price: Money,
}

impl DeliveryDateOption {
    /// Shipping price for the given items total: zero when the tier has a
    /// positive threshold and the total meets it, flat price otherwise.
    pub fn shipping_price_for(&self, items_price: Money) -> Money {
        if self.free_shipping_min_price.is_positive()
            && items_price.amount_cents >= self.free_shipping_min_price.amount_cents
        {
            Money::zero(items_price.currency)
        } else {
            self.shipping_price
        }
    }
}

/// The stock option list: faster tiers cost more, the slowest tier ships
/// free above the threshold. Listed fastest first; callers default to the
/// last entry.
pub fn default_delivery_options() -> Vec<DeliveryDateOption> {
    vec![
        DeliveryDateOption {
            name: "Tomorrow".to_string(),
            days_to_deliver: 1,
            shipping_price: Money::from_decimal(12.9, Currency::USD),
            free_shipping_min_price: Money::zero(Currency::USD),
        },
        DeliveryDateOption {
            name: "Next 3 days".to_string(),
            days_to_deliver: 3,
            shipping_price: Money::from_decimal(6.9, Currency::USD),
            free_shipping_min_price: Money::zero(Currency::USD),
        },
        DeliveryDateOption {
            name: "Next 5 days".to_string(),
            days_to_deliver: 5,
            shipping_price: Money::from_decimal(4.9, Currency::USD),
            free_shipping_min_price: Money::from_decimal(35.0, Currency::USD),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = default_delivery_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].days_to_deliver, 1);
        assert_eq!(options[2].shipping_price.amount_cents, 490);
        assert_eq!(options[2].free_shipping_min_price.amount_cents, 3500);
    }

    #[test]
    fn test_free_shipping_threshold() {
        let option = &default_delivery_options()[2];
        assert!(option
            .shipping_price_for(Money::new(3500, Currency::USD))
            .is_zero());
        assert_eq!(
            option
                .shipping_price_for(Money::new(3499, Currency::USD))
                .amount_cents,
            490
        );
    }

    #[test]
    fn test_no_threshold_always_charges() {
        let option = &default_delivery_options()[0];
        assert_eq!(
            option
                .shipping_price_for(Money::new(100_000, Currency::USD))
                .amount_cents,
            1290
        );
    }
}
