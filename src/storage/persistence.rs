//! Persistence adapter: the item collection as one JSON document in a
//! key-value store.

use super::KeyValueStore;
use crate::core::{Item, Result};
use log::{debug, error, warn};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "grocery-list";

/// Reads and writes the whole item collection under a single key.
///
/// None of the public operations fail outward: storage and parse errors are
/// logged and the in-memory collection stays authoritative.
#[derive(Debug, Clone)]
pub struct ItemPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ItemPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `items` under the key. Returns whether the write landed.
    pub fn save(&self, items: &[Item]) -> bool {
        match self.write_items(items) {
            Ok(()) => {
                debug!("saved {} items under '{}'", items.len(), self.key);
                true
            }
            Err(err) => {
                error!("failed to save items: key='{}' error='{}'", self.key, err);
                false
            }
        }
    }

    /// Read the stored collection. Missing or unreadable data yields an
    /// empty collection.
    pub fn load(&self) -> Vec<Item> {
        match self.read_items() {
            Ok(Some(items)) => {
                debug!("loaded {} items from '{}'", items.len(), self.key);
                items
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "discarding unreadable stored items: key='{}' error='{}'",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Remove the stored value entirely. Returns whether the removal landed.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(err) => {
                error!("failed to clear items: key='{}' error='{}'", self.key, err);
                false
            }
        }
    }

    fn write_items(&self, items: &[Item]) -> Result<()> {
        let serialized = serde_json::to_string(items)?;
        self.store.set(&self.key, &serialized)
    }

    fn read_items(&self) -> Result<Option<Vec<Item>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let items: Vec<Item> = serde_json::from_str(&raw)?;
        Ok(Some(items))
    }
}
