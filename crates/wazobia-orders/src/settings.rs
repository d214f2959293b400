//! Site settings with a read-through cache.
//!
//! Settings are read on nearly every request and written almost never, so
//! reads go cache first, store second, defaults last. Updates write the
//! store and refresh the cache in the same call.

use crate::collections;
use crate::result::ActionResult;
use std::sync::Arc;
use wazobia_cache::{cache_key, Cache};
use wazobia_commerce::settings::SiteSettings;
use wazobia_commerce::CommerceError;
use wazobia_store::MemoryStore;

/// Id of the single settings document.
const SETTINGS_DOC_ID: &str = "site";

/// Cached access to the single [`SiteSettings`] document.
pub struct SettingsService {
    store: Arc<MemoryStore>,
    cache: Arc<Cache>,
}

impl SettingsService {
    /// Wire up the service.
    pub fn new(store: Arc<MemoryStore>, cache: Arc<Cache>) -> Self {
        Self { store, cache }
    }

    fn key() -> String {
        cache_key!("settings", SETTINGS_DOC_ID)
    }

    /// Current settings: cache, then store, then defaults. A store miss
    /// caches the defaults so the next read is warm.
    pub fn get(&self) -> Result<SiteSettings, CommerceError> {
        if let Some(settings) = self.cache.get::<SiteSettings>(&Self::key())? {
            return Ok(settings);
        }
        let settings = self.get_uncached()?;
        self.cache.set(&Self::key(), &settings)?;
        Ok(settings)
    }

    /// Current settings straight from the store, defaults on a miss.
    pub fn get_uncached(&self) -> Result<SiteSettings, CommerceError> {
        Ok(self
            .store
            .first::<SiteSettings>(collections::SETTINGS)?
            .unwrap_or_default())
    }

    /// Replace the settings document and refresh the cache.
    pub fn update(&self, settings: SiteSettings) -> ActionResult<()> {
        let result = (|| {
            self.store
                .put(collections::SETTINGS, SETTINGS_DOC_ID, &settings)?;
            self.cache.set(&Self::key(), &settings)?;
            Ok(())
        })();
        ActionResult::from_result(result, "Setting updated successfully")
    }
}
