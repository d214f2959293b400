//! Customer reviews and rating aggregation.

use crate::catalog::RatingCount;
use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A customer review of a product. One per user per product; a second
/// submission overwrites the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Author.
    pub user_id: UserId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Whether the author bought the product here.
    pub is_verified_purchase: bool,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Review title.
    pub title: String,
    /// Review body.
    pub comment: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Review {
    /// Validate the rating range.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(1..=5).contains(&self.rating) {
            return Err(CommerceError::ValidationError(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.title.trim().is_empty() {
            return Err(CommerceError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregated rating figures for a product, recomputed from all its reviews
/// whenever one is created or updated.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    /// Average star rating, rounded to one decimal.
    pub avg_rating: f64,
    /// Total review count.
    pub num_reviews: i64,
    /// Per-star counts; all five buckets present, missing stars at zero.
    pub distribution: Vec<RatingCount>,
}

impl RatingSummary {
    /// Reduce a set of star ratings into aggregate figures.
    pub fn from_ratings(ratings: impl Iterator<Item = u8>) -> Self {
        let mut counts = [0i64; 5];
        for rating in ratings {
            if (1..=5).contains(&rating) {
                counts[(rating - 1) as usize] += 1;
            }
        }

        let num_reviews: i64 = counts.iter().sum();
        let weighted: i64 = counts
            .iter()
            .enumerate()
            .map(|(i, c)| (i as i64 + 1) * c)
            .sum();
        let avg_rating = if num_reviews == 0 {
            0.0
        } else {
            // one-decimal precision, matching what gets displayed
            (weighted as f64 / num_reviews as f64 * 10.0).round() / 10.0
        };

        let distribution = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| RatingCount {
                rating: i as u8 + 1,
                count,
            })
            .collect();

        Self {
            avg_rating,
            num_reviews,
            distribution,
        }
    }
}
