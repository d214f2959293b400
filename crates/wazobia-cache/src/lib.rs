//! Key-value cache for Wazobia.
//!
//! Read-through caching with per-entry TTL and explicit invalidation,
//! always injected rather than held in a process global. Backs the
//! settings cache and the order-detail view invalidation in the service
//! layer.

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError};
}
