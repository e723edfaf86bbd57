use crate::core::{Filter, GroceryError, Result};
use crate::storage::{DEFAULT_STORAGE_KEY, FileStore, validate_key};
use std::path::PathBuf;

/// Grocery list configuration
///
/// Where the list lives and how a freshly opened list starts out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Key the item collection is stored under
    pub storage_key: String,

    /// Directory for the file-backed store
    pub data_dir: Option<PathBuf>,

    /// Filter mode applied right after opening
    pub initial_filter: Filter,
}

impl ListConfig {
    /// Create a configuration with the default storage key and no data directory
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            initial_filter: Filter::All,
        }
    }

    /// Set the storage key
    pub fn storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the initial filter mode
    pub fn initial_filter(mut self, filter: Filter) -> Self {
        self.initial_filter = filter;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.storage_key)
    }

    /// Open the file-backed store at the configured data directory
    pub fn file_store(&self) -> Result<FileStore> {
        self.validate()?;
        let dir = self.data_dir.as_ref().ok_or_else(|| {
            GroceryError::StorageUnavailable("no data directory configured".to_string())
        })?;
        FileStore::open(dir)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new()
    }
}
