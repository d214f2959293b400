//! E-commerce domain types and logic for Wazobia.
//!
//! This crate holds the pure domain layer:
//!
//! - **Catalog**: products, reviews, rating aggregation
//! - **Checkout**: addresses, delivery tiers, pricing, orders
//! - **Money**: cents-based monetary values
//! - **Settings**: admin-editable site configuration
//!
//! No I/O lives here; persistence and side effects belong to the service
//! layer in `wazobia-orders`.
//!
//! # Example
//!
//! ```rust,ignore
//! use wazobia_commerce::prelude::*;
//!
//! let options = default_delivery_options();
//! let pricing = price_order(PricingInput {
//!     items: &order.items,
//!     shipping_address: order.shipping_address.as_ref(),
//!     delivery_date_index: None,
//!     delivery_options: &options,
//! })?;
//! println!("Total: {}", pricing.total_price.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod settings;
pub mod user;

pub use error::CommerceError;
pub use ids::*;
pub use money::{round2, Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{round2, Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, RatingCount, RatingSummary, Review};

    // Checkout
    pub use crate::checkout::{
        default_delivery_options, price_order, DeliveryDateOption, Order, OrderItem,
        OrderPricing, PaymentResult, PricingInput, ShippingAddress, TAX_PERCENT,
    };

    // Settings
    pub use crate::settings::{PaymentMethod, SiteSettings};

    // Users
    pub use crate::user::{User, UserRole};
}
