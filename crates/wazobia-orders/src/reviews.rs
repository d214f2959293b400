//! Review service: submission, listing, and product rating refresh.

use crate::collections;
use crate::result::{ActionResult, Page};
use crate::service::current_timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wazobia_commerce::catalog::{Product, RatingSummary, Review};
use wazobia_commerce::{CommerceError, ProductId, ReviewId, UserId};
use wazobia_store::MemoryStore;

/// A review as submitted by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewInput {
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
}

/// Review submission and listing.
pub struct ReviewService {
    store: Arc<MemoryStore>,
}

impl ReviewService {
    /// Wire up the service.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Submit a review. A user gets one review per product; submitting
    /// again overwrites the text and rating but keeps the original id and
    /// creation time. The product's rating aggregates are refreshed from
    /// all of its reviews afterwards.
    pub fn create_or_update(&self, input: ReviewInput) -> ActionResult<ReviewId> {
        let result = (|| {
            let existing = self
                .store
                .find(collections::REVIEWS, |r: &Review| {
                    r.product_id == input.product_id && r.user_id == input.user_id
                })?
                .into_iter()
                .next();
            let updated = existing.is_some();

            let review = match existing {
                Some(previous) => Review {
                    is_verified_purchase: input.is_verified_purchase,
                    rating: input.rating,
                    title: input.title,
                    comment: input.comment,
                    ..previous
                },
                None => Review {
                    id: ReviewId::generate(),
                    user_id: input.user_id,
                    product_id: input.product_id,
                    is_verified_purchase: input.is_verified_purchase,
                    rating: input.rating,
                    title: input.title,
                    comment: input.comment,
                    created_at: current_timestamp(),
                },
            };
            review.validate()?;
            self.store
                .put(collections::REVIEWS, review.id.as_str(), &review)?;
            self.refresh_product_rating(&review.product_id)?;
            info!(review_id = %review.id, product_id = %review.product_id, updated, "review saved");
            Ok((review.id, updated))
        })();

        match result {
            Ok((id, true)) => ActionResult::ok_with("Review updated successfully", id),
            Ok((id, false)) => ActionResult::ok_with("Review created successfully", id),
            Err(e) => ActionResult::err(&e),
        }
    }

    /// Recompute a product's rating aggregates from its reviews.
    fn refresh_product_rating(&self, product_id: &ProductId) -> Result<(), CommerceError> {
        let reviews: Vec<Review> = self
            .store
            .find(collections::REVIEWS, |r: &Review| &r.product_id == product_id)?;
        let summary = RatingSummary::from_ratings(reviews.iter().map(|r| r.rating));

        let mut product: Product = self
            .store
            .get(collections::PRODUCTS, product_id.as_str())?
            .ok_or(CommerceError::ProductNotFound)?;
        product.avg_rating = summary.avg_rating;
        product.num_reviews = summary.num_reviews;
        product.rating_distribution = summary.distribution;
        product.updated_at = current_timestamp();
        self.store
            .put(collections::PRODUCTS, product_id.as_str(), &product)
            .map_err(CommerceError::from)
    }

    /// A product's reviews, newest first. An empty set still reports one
    /// page so pagers always have something to render.
    pub fn list_for_product(
        &self,
        product_id: &ProductId,
        page: usize,
        page_size: usize,
    ) -> Result<Page<Review>, CommerceError> {
        let mut reviews: Vec<Review> = self
            .store
            .find(collections::REVIEWS, |r: &Review| &r.product_id == product_id)?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut page = Page::paginate(reviews, page, page_size);
        if page.total_pages == 0 {
            page.total_pages = 1;
        }
        Ok(page)
    }

    /// The review a user left on a product, if any.
    pub fn find_by_user(
        &self,
        product_id: &ProductId,
        user_id: &UserId,
    ) -> Result<Option<Review>, CommerceError> {
        Ok(self
            .store
            .find(collections::REVIEWS, |r: &Review| {
                &r.product_id == product_id && &r.user_id == user_id
            })?
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wazobia_commerce::{Currency, Money};

    fn seed_product(store: &MemoryStore, id: &str) {
        let mut product = Product::new(
            format!("Product {id}"),
            format!("product-{id}"),
            "Shoes",
            Money::from_decimal(49.99, Currency::USD),
            10,
        );
        product.id = ProductId::new(id);
        store.put(collections::PRODUCTS, id, &product).unwrap();
    }

    fn input(product: &str, user: &str, rating: u8, title: &str) -> ReviewInput {
        ReviewInput {
            user_id: UserId::new(user),
            product_id: ProductId::new(product),
            is_verified_purchase: true,
            rating,
            title: title.to_string(),
            comment: "words".to_string(),
        }
    }

    #[test]
    fn test_create_then_update_keeps_one_review() {
        let store = Arc::new(MemoryStore::new());
        seed_product(&store, "p1");
        let service = ReviewService::new(Arc::clone(&store));

        let created = service.create_or_update(input("p1", "u1", 3, "Okay"));
        assert!(created.success);
        assert_eq!(created.message, "Review created successfully");

        let updated = service.create_or_update(input("p1", "u1", 5, "Actually great"));
        assert!(updated.success);
        assert_eq!(updated.message, "Review updated successfully");
        assert_eq!(created.data, updated.data);

        let page = service
            .list_for_product(&ProductId::new("p1"), 1, 10)
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].rating, 5);
        assert_eq!(page.data[0].title, "Actually great");

        let product: Product = store.get(collections::PRODUCTS, "p1").unwrap().unwrap();
        assert_eq!(product.num_reviews, 1);
        assert_eq!(product.avg_rating, 5.0);
    }

    #[test]
    fn test_aggregates_across_users() {
        let store = Arc::new(MemoryStore::new());
        seed_product(&store, "p1");
        let service = ReviewService::new(Arc::clone(&store));

        service.create_or_update(input("p1", "u1", 5, "Great"));
        service.create_or_update(input("p1", "u2", 4, "Good"));
        service.create_or_update(input("p1", "u3", 5, "Great again"));

        let product: Product = store.get(collections::PRODUCTS, "p1").unwrap().unwrap();
        assert_eq!(product.num_reviews, 3);
        assert_eq!(product.avg_rating, 4.7);
        let five_star = product
            .rating_distribution
            .iter()
            .find(|c| c.rating == 5)
            .unwrap();
        assert_eq!(five_star.count, 2);
    }

    #[test]
    fn test_empty_listing_reports_one_page() {
        let store = Arc::new(MemoryStore::new());
        seed_product(&store, "p1");
        let service = ReviewService::new(store);

        let page = service
            .list_for_product(&ProductId::new("p1"), 1, 10)
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_invalid_rating_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        seed_product(&store, "p1");
        let service = ReviewService::new(store);

        let result = service.create_or_update(input("p1", "u1", 0, "Bad input"));
        assert!(!result.success);
    }
}
