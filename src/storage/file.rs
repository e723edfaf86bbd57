//! File-backed key-value store: one JSON document per key in a data directory.

use super::KeyValueStore;
use crate::core::{GroceryError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const VALUE_EXTENSION: &str = "json";

/// Check that `key` can be used as a file name on every platform.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(GroceryError::InvalidKey(key.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            GroceryError::IoError(format!(
                "Failed to create data directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the value for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GroceryError::IoError(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write through a temp file in the same directory, then rename it over
    /// the target so readers never see a half-written value.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| {
            GroceryError::StorageUnavailable(format!(
                "Failed to create temp file in '{}': {}",
                self.dir.display(),
                e
            ))
        })?;
        temp.write_all(value.as_bytes())
            .map_err(|e| GroceryError::IoError(format!("Failed to write temp file: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| GroceryError::IoError(format!("Failed to sync temp file: {}", e)))?;
        temp.persist(&path).map_err(|e| {
            GroceryError::IoError(format!(
                "Failed to rename temp file -> '{}': {}",
                path.display(),
                e.error
            ))
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GroceryError::IoError(format!(
                "Failed to delete '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}
