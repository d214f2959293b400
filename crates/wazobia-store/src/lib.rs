//! In-memory document store for Wazobia.
//!
//! Named collections of JSON documents with typed access, filtered finds,
//! distinct-field queries, and all-or-nothing multi-document transactions.
//!
//! # Example
//!
//! ```rust,ignore
//! use wazobia_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! store.put("products", product.id.as_str(), &product)?;
//!
//! let found: Option<Product> = store.get("products", "prod-1")?;
//!
//! store.transaction::<_, StoreError, _>(|tx| {
//!     let mut p: Product = tx.get("products", "prod-1")?.ok_or(StoreError::NotFound)?;
//!     p.count_in_stock -= 1;
//!     tx.put("products", "prod-1", &p)
//! })?;
//! ```

mod error;
mod store;

pub use error::StoreError;
pub use store::{MemoryStore, StoreTx};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{MemoryStore, StoreError, StoreTx};
}
