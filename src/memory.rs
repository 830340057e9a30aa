//! In-memory backend

use crate::{Result, StoreBackend, StoreError};
use std::collections::HashMap;

/// In-memory key/value backend
///
/// Fast, non-persistent, byte-transparent. All data is lost when the store
/// is dropped. Close is a no-op.
pub struct MemStore {
    entries: HashMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for MemStore {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
