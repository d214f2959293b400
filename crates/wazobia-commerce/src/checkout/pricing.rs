//! Order pricing and delivery date calculation.
//!
//! Pure: takes the items, the optional address, the optional tier choice
//! and the configured option list, and returns the full price breakdown.
//! All I/O (settings lookup, persistence) happens in the caller.

use crate::checkout::{DeliveryDateOption, OrderItem, ShippingAddress};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Tax rate applied on top of the items price. Hardcoded, not configuration.
pub const TAX_PERCENT: f64 = 15.0;

/// Input to [`price_order`].
pub struct PricingInput<'a> {
    /// Line items being priced.
    pub items: &'a [OrderItem],
    /// Shipping address, if the buyer has entered one yet.
    pub shipping_address: Option<&'a ShippingAddress>,
    /// Chosen delivery tier; defaults to the last (slowest, cheapest) option.
    pub delivery_date_index: Option<usize>,
    /// Configured delivery tiers.
    pub delivery_options: &'a [DeliveryDateOption],
}

/// The computed price breakdown.
///
/// `shipping_price` and `tax_price` are `None` until a shipping address is
/// known. That models a price preview, not a zero charge, so `total_price`
/// equals `items_price` in that state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPricing {
    /// Sum of unit price times quantity across all items.
    pub items_price: Money,
    /// Shipping charge, absent before an address or when the chosen tier
    /// does not exist.
    pub shipping_price: Option<Money>,
    /// Tax charge, absent before an address.
    pub tax_price: Option<Money>,
    /// Items plus whatever shipping and tax are known.
    pub total_price: Money,
    /// The delivery tier the rest of the breakdown was computed against.
    pub delivery_date_index: usize,
    /// Days until expected delivery for the chosen tier, when it exists.
    pub days_to_deliver: Option<i64>,
}

/// Calculate the price breakdown and delivery choice for a set of items.
pub fn price_order(input: PricingInput<'_>) -> Result<OrderPricing, CommerceError> {
    let currency = input
        .items
        .first()
        .map(|i| i.unit_price.currency)
        .unwrap_or(Currency::USD);

    let mut items_price = Money::zero(currency);
    for item in input.items {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        let line = item
            .unit_price
            .try_multiply(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        items_price = items_price.try_add(&line).ok_or_else(|| {
            CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: line.currency.code().to_string(),
            }
        })?;
    }

    let delivery_date_index = input
        .delivery_date_index
        .unwrap_or(input.delivery_options.len().saturating_sub(1));
    let delivery_option = input.delivery_options.get(delivery_date_index);

    let shipping_price = match (input.shipping_address, delivery_option) {
        (Some(_), Some(option)) => Some(option.shipping_price_for(items_price)),
        _ => None,
    };

    let tax_price = input
        .shipping_address
        .map(|_| items_price.percentage(TAX_PERCENT));

    let mut total_price = items_price;
    if let Some(shipping) = &shipping_price {
        total_price = total_price
            .try_add(shipping)
            .ok_or(CommerceError::Overflow)?;
    }
    if let Some(tax) = &tax_price {
        total_price = total_price.try_add(tax).ok_or(CommerceError::Overflow)?;
    }

    Ok(OrderPricing {
        items_price,
        shipping_price,
        tax_price,
        total_price,
        delivery_date_index,
        days_to_deliver: delivery_option.map(|o| o.days_to_deliver),
    })
}
