//! Order types and lifecycle guards.

use crate::checkout::ShippingAddress;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment-provider result recorded on the order once a capture settles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentResult {
    /// Provider-side payment/capture id.
    pub id: String,
    /// Provider status string (e.g., "COMPLETED").
    pub status: String,
    /// Payer email reported by the provider.
    pub email_address: String,
    /// Amount the provider says was paid, as a decimal string.
    pub price_paid: String,
}

/// A line item embedded in an order.
///
/// Carries denormalized display fields and a price/stock snapshot taken at
/// add-to-cart time; later product edits do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Product slug at order time.
    pub slug: String,
    /// Product image at order time.
    pub image: String,
    /// Product category at order time.
    pub category: String,
    /// Unit price at order time.
    pub unit_price: Money,
    /// Quantity ordered.
    pub quantity: i64,
    /// Stock level observed when the item was added to the cart. Advisory.
    pub count_in_stock: i64,
}

/// An order through its lifecycle: created, then paid, then delivered.
/// Both transitions are one-way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Line items, in cart order.
    pub items: Vec<OrderItem>,
    /// Shipping address, when one was entered.
    pub shipping_address: Option<ShippingAddress>,
    /// Chosen payment method name.
    pub payment_method: String,
    /// Sum of line totals.
    pub items_price: Money,
    /// Shipping charge; absent when priced without an address.
    pub shipping_price: Option<Money>,
    /// Tax charge; absent when priced without an address.
    pub tax_price: Option<Money>,
    /// Grand total.
    pub total_price: Money,
    /// Index into the configured delivery options.
    pub delivery_date_index: usize,
    /// Unix timestamp of the expected delivery day.
    pub expected_delivery_date: Option<i64>,
    /// Whether payment has been confirmed.
    pub is_paid: bool,
    /// Unix timestamp of payment confirmation.
    pub paid_at: Option<i64>,
    /// Provider capture details, once paid.
    pub payment_result: Option<PaymentResult>,
    /// Whether delivery has been confirmed.
    pub is_delivered: bool,
    /// Unix timestamp of delivery confirmation.
    pub delivered_at: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Order {
    /// Validate the order shape before persisting: at least one item,
    /// positive quantities, and a consistent price breakdown.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.items.is_empty() {
            return Err(CommerceError::ValidationError(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(item.quantity));
            }
        }
        let mut expected = self.items_price;
        if let Some(shipping) = &self.shipping_price {
            expected = expected.try_add(shipping).ok_or(CommerceError::Overflow)?;
        }
        if let Some(tax) = &self.tax_price {
            expected = expected.try_add(tax).ok_or(CommerceError::Overflow)?;
        }
        if expected != self.total_price {
            return Err(CommerceError::ValidationError(
                "total price does not match its parts".to_string(),
            ));
        }
        Ok(())
    }

    /// Paid-transition guard and mutation. Idempotency guard: a second call
    /// is a terminal error, not a retry.
    pub fn mark_paid(&mut self, now: i64) -> Result<(), CommerceError> {
        if self.is_paid {
            return Err(CommerceError::OrderAlreadyPaid);
        }
        self.is_paid = true;
        self.paid_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Delivered-transition guard and mutation. Requires the order to be
    /// paid first.
    pub fn mark_delivered(&mut self, now: i64) -> Result<(), CommerceError> {
        if !self.is_paid {
            return Err(CommerceError::OrderNotPaid);
        }
        self.is_delivered = true;
        self.delivered_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sample_order() -> Order {
        Order {
            id: OrderId::generate(),
            user_id: UserId::new("user-1"),
            items: vec![OrderItem {
                product_id: ProductId::new("prod-1"),
                name: "Item".to_string(),
                slug: "item".to_string(),
                image: String::new(),
                category: "Misc".to_string(),
                unit_price: Money::new(1000, Currency::USD),
                quantity: 2,
                count_in_stock: 5,
            }],
            shipping_address: None,
            payment_method: "Cash On Delivery".to_string(),
            items_price: Money::new(2000, Currency::USD),
            shipping_price: None,
            tax_price: None,
            total_price: Money::new(2000, Currency::USD),
            delivery_date_index: 2,
            expected_delivery_date: None,
            is_paid: false,
            paid_at: None,
            payment_result: None,
            is_delivered: false,
            delivered_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_order().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let mut order = sample_order();
        order.items.clear();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_total() {
        let mut order = sample_order();
        order.total_price = Money::new(1, Currency::USD);
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_mark_paid_once() {
        let mut order = sample_order();
        assert!(order.mark_paid(100).is_ok());
        assert!(order.is_paid);
        assert_eq!(order.paid_at, Some(100));

        let err = order.mark_paid(200).unwrap_err();
        assert_eq!(err.to_string(), "Order is already paid");
    }

    #[test]
    fn test_deliver_requires_paid() {
        let mut order = sample_order();
        let err = order.mark_delivered(100).unwrap_err();
        assert_eq!(err.to_string(), "Order is not paid");
        assert!(!order.is_delivered);

        order.mark_paid(100).unwrap();
        assert!(order.mark_delivered(200).is_ok());
        assert!(order.is_delivered);
    }
}
