//! Order lifecycle services for Wazobia.
//!
//! This crate is the side-effecting layer over `wazobia-commerce`: it
//! persists orders in a `wazobia-store` document store, caches hot reads
//! through `wazobia-cache`, and talks to the payment provider and email
//! provider through the [`PaymentGateway`](gateway::PaymentGateway) and
//! [`Mailer`](mailer::Mailer) ports.
//!
//! # Example
//!
//! ```rust,ignore
//! use wazobia_orders::prelude::*;
//!
//! let service = OrderService::new(store, cache, gateway, mailer, OrdersConfig::default());
//! let placed = service.create_order(cart);
//! assert!(placed.success);
//! ```

pub mod config;
pub mod gateway;
pub mod mailer;
pub mod result;
pub mod reviews;
pub mod service;
pub mod settings;
pub mod summary;

/// Collection names in the document store.
pub mod collections {
    /// Orders collection.
    pub const ORDERS: &str = "orders";
    /// Products collection.
    pub const PRODUCTS: &str = "products";
    /// Users collection.
    pub const USERS: &str = "users";
    /// Settings collection (single document).
    pub const SETTINGS: &str = "settings";
    /// Reviews collection.
    pub const REVIEWS: &str = "reviews";
}

pub use config::OrdersConfig;
pub use result::{ActionResult, Page};
pub use service::{CartInput, OrderService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::OrdersConfig;
    pub use crate::gateway::{
        PaymentCapture, PaymentEvent, PaymentGateway, PaymentIntent, CAPTURE_COMPLETED,
    };
    pub use crate::mailer::{EmailKind, EmailMessage, Mailer};
    pub use crate::result::{ActionResult, Page};
    pub use crate::reviews::{ReviewInput, ReviewService};
    pub use crate::service::{CartInput, OrderService};
    pub use crate::settings::SettingsService;
    pub use crate::summary::{order_summary, DateRange, SalesSummary};
}
