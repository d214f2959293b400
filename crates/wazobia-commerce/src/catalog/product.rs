//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One bucket of the per-star rating distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCount {
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Number of reviews with this rating.
    pub count: i64,
}

/// A product in the catalog.
///
/// Read-mostly. Two workflows mutate it: the stock adjustment decrements
/// `count_in_stock`, and review aggregation rewrites the rating fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Category name.
    pub category: String,
    /// Primary image path.
    pub image: String,
    /// Brand name.
    pub brand: Option<String>,
    /// Current selling price.
    pub price: Money,
    /// Crossed-out list price, when on sale.
    pub list_price: Option<Money>,
    /// Units in stock.
    pub count_in_stock: i64,
    /// Average star rating across reviews.
    pub avg_rating: f64,
    /// Total number of reviews.
    pub num_reviews: i64,
    /// Per-star review counts, always five buckets.
    pub rating_distribution: Vec<RatingCount>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product with no reviews and the given stock level.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        count_in_stock: i64,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            slug: slug.into(),
            category: category.into(),
            image: String::new(),
            brand: None,
            price,
            list_price: None,
            count_in_stock,
            avg_rating: 0.0,
            num_reviews: 0,
            rating_distribution: (1..=5).map(|rating| RatingCount { rating, count: 0 }).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether any stock remains.
    pub fn in_stock(&self) -> bool {
        self.count_in_stock > 0
    }

    /// Advisory cart-side check. Enforcement happens in the transactional
    /// decrement at payment time, not here.
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.count_in_stock >= quantity
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
