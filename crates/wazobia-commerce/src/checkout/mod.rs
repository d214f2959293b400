//! Checkout types: addresses, delivery options, pricing, orders.

mod address;
mod delivery;
mod order;
mod pricing;

pub use address::ShippingAddress;
pub use delivery::{default_delivery_options, DeliveryDateOption};
pub use order::{Order, OrderItem, PaymentResult};
pub use pricing::{price_order, OrderPricing, PricingInput, TAX_PERCENT};
