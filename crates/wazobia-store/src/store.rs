//! Document store and transactions.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Named collections of JSON documents, keyed by document id.
type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// In-memory document store.
///
/// Documents serialize through JSON, so any `Serialize`/`DeserializeOwned`
/// type can live in a collection. Single-document operations take the lock
/// briefly; [`MemoryStore::transaction`] stages a copy of the whole store
/// and commits it atomically, so a multi-document update either lands in
/// full or not at all.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document.
    pub fn put<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        let mut collections = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Fetch a document by id.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let collections = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        match collections.get(collection).and_then(|c| c.get(id)) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Delete a document. Returns whether it existed.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get_mut(collection)
            .map(|c| c.remove(id).is_some())
            .unwrap_or(false))
    }

    /// All documents in a collection, in id order.
    pub fn all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let collections = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        docs.values()
            .map(|v| serde_json::from_value(v.clone()).map_err(StoreError::from))
            .collect()
    }

    /// Documents matching a predicate, in id order.
    pub fn find<T, F>(&self, collection: &str, mut predicate: F) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        let mut matched = Vec::new();
        for doc in self.all::<T>(collection)? {
            if predicate(&doc) {
                matched.push(doc);
            }
        }
        Ok(matched)
    }

    /// The first document in a collection, if any. Settings live as a
    /// single document, fetched this way.
    pub fn first<T: DeserializeOwned>(&self, collection: &str) -> Result<Option<T>, StoreError> {
        let collections = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        match collections.get(collection).and_then(|c| c.values().next()) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections.get(collection).map(|c| c.len()).unwrap_or(0))
    }

    /// Distinct values of a top-level field across a collection.
    pub fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut seen = Vec::new();
        for doc in docs.values() {
            if let Some(value) = doc.get(field) {
                if !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
        }
        Ok(seen)
    }

    /// Run a closure against a staged copy of the store.
    ///
    /// The closure sees and mutates the copy through [`StoreTx`]. When it
    /// returns `Ok` the copy replaces the live state in one swap; on `Err`
    /// the copy is dropped and nothing changes.
    pub fn transaction<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut StoreTx) -> Result<R, E>,
    {
        let mut collections = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let mut tx = StoreTx {
            staged: collections.clone(),
        };
        let result = f(&mut tx)?;
        *collections = tx.staged;
        Ok(result)
    }
}

/// Handle onto the staged state inside a [`MemoryStore::transaction`].
pub struct StoreTx {
    staged: Collections,
}

impl StoreTx {
    /// Fetch a document from the staged state.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.staged.get(collection).and_then(|c| c.get(id)) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a document in the staged state.
    pub fn put<T: Serialize>(
        &mut self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        self.staged
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Delete a document from the staged state.
    pub fn delete(&mut self, collection: &str, id: &str) -> bool {
        self.staged
            .get_mut(collection)
            .map(|c| c.remove(id).is_some())
            .unwrap_or(false)
    }
}
