//! Catalog types: products and customer reviews.

mod product;
mod review;

pub use product::{Product, RatingCount};
pub use review::{Review, RatingSummary};
