//! File-mapping backend: a single-file persistent string map

use crate::{Result, StoreBackend, StoreError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed key/value backend in the manner of a dbm database
///
/// The whole mapping lives in one JSON file, loaded on open and rewritten
/// on every put. Keys and values must be valid UTF-8; binary data is
/// rejected with `StoreError::NonText`.
pub struct DbmStore {
    path: PathBuf,
    entries: Option<HashMap<String, String>>,
}

impl DbmStore {
    /// Open or create a dbm store at the given file path
    ///
    /// The file is created immediately, so an open/close cycle with no puts
    /// still leaves a database file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            HashMap::new()
        };

        let store = Self {
            path,
            entries: Some(entries),
        };
        store.flush()?;
        Ok(store)
    }

    /// Get the file path of this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(entries) = &self.entries {
            let text = serde_json::to_string(entries)?;
            fs::write(&self.path, text)?;
        }
        Ok(())
    }

    fn as_text(bytes: &[u8]) -> Result<&str> {
        std::str::from_utf8(bytes)
            .map_err(|_| StoreError::NonText(String::from_utf8_lossy(bytes).into_owned()))
    }
}

impl StoreBackend for DbmStore {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let entries = self.entries.as_ref().ok_or(StoreError::Closed)?;
        let key = Self::as_text(key)?;
        entries
            .get(key)
            .map(|v| v.clone().into_bytes())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let key = Self::as_text(key)?.to_string();
        let value = Self::as_text(value)?.to_string();

        let entries = self.entries.as_mut().ok_or(StoreError::Closed)?;
        entries.insert(key, value);
        self.flush()
    }

    fn close(&mut self) -> Result<()> {
        if let Some(entries) = self.entries.take() {
            let text = serde_json::to_string(&entries)?;
            fs::write(&self.path, text)?;
        }
        Ok(())
    }
}
