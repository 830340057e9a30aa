//! Error types for store operations

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "ordered")]
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[cfg(feature = "ordered")]
    #[error("Database creation error: {0}")]
    DatabaseCreation(#[from] redb::DatabaseError),

    #[cfg(feature = "ordered")]
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[cfg(feature = "ordered")]
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[cfg(feature = "ordered")]
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[cfg(feature = "ordered")]
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Unsupported store kind: {0}")]
    UnsupportedKind(String),

    #[error("A path is required for the {0} store")]
    PathRequired(&'static str),

    #[error("The dbm store requires UTF-8 keys and values: {0}")]
    NonText(String),

    #[error("Store is closed")]
    Closed,
}

impl StoreError {
    /// NotFound for a key that may not be valid UTF-8.
    pub(crate) fn not_found(key: &[u8]) -> Self {
        StoreError::NotFound(String::from_utf8_lossy(key).into_owned())
    }
}
