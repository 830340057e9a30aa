//! Store backend trait and kind selection

use crate::{Result, StoreError};
use std::fmt;
use std::str::FromStr;

/// Pluggable key/value backend interface
///
/// Backends are not required to be thread-safe; `IsolatedStore` exists to
/// give a single backend instance one owning worker when it must be shared.
pub trait StoreBackend: Send {
    /// Get the value associated with a key
    ///
    /// Fails with `StoreError::NotFound` if the key was never put.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Associate a value with a key, overwriting any previous association
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Release the underlying storage resource
    ///
    /// Idempotent: a second close is a no-op. Persistent backends reject
    /// further get/put calls with `StoreError::Closed`.
    fn close(&mut self) -> Result<()>;
}

/// The kind of backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-local map, nothing persisted
    Mem,
    /// Single-file persistent string map
    Dbm,
    /// Ordered persistent store in a directory
    LevelDb,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Mem => "mem",
            StoreKind::Dbm => "dbm",
            StoreKind::LevelDb => "leveldb",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mem" => Ok(StoreKind::Mem),
            "dbm" => Ok(StoreKind::Dbm),
            "leveldb" => Ok(StoreKind::LevelDb),
            other => Err(StoreError::UnsupportedKind(other.to_string())),
        }
    }
}
