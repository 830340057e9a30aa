//! Backend selection and construction

use crate::{DbmStore, MemStore, Result, StoreBackend, StoreError, StoreKind};
use std::path::Path;

#[cfg(feature = "ordered")]
use crate::OrderedStore;

/// Whether the ordered backend was compiled into this build
///
/// Pure capability probe; evaluated fresh on every factory call, no
/// process-wide state.
pub fn ordered_available() -> bool {
    cfg!(feature = "ordered")
}

/// Create a store of the requested kind
///
/// With an explicit `kind`, that backend is constructed directly (`path` is
/// ignored for `"mem"`). With no kind, the ordered backend is preferred
/// when available, falling back to the dbm backend otherwise. Unrecognized
/// kind strings fail with `StoreError::UnsupportedKind`.
///
/// `path` is a file path for the dbm backend and a directory for the
/// ordered backend.
pub fn create_store(
    path: Option<&Path>,
    kind: Option<&str>,
) -> Result<Box<dyn StoreBackend>> {
    let kind = match kind {
        Some(s) => Some(s.parse::<StoreKind>()?),
        None => None,
    };

    match kind {
        Some(StoreKind::Mem) => Ok(Box::new(MemStore::new())),
        Some(StoreKind::Dbm) => {
            let path = path.ok_or(StoreError::PathRequired("dbm"))?;
            Ok(Box::new(DbmStore::open(path)?))
        }
        #[cfg(feature = "ordered")]
        Some(StoreKind::LevelDb) => {
            let path = path.ok_or(StoreError::PathRequired("leveldb"))?;
            Ok(Box::new(OrderedStore::open(path)?))
        }
        #[cfg(not(feature = "ordered"))]
        Some(StoreKind::LevelDb) => {
            Err(StoreError::UnsupportedKind("leveldb".to_string()))
        }
        None => {
            let path = path.ok_or(StoreError::PathRequired("persistent"))?;
            #[cfg(feature = "ordered")]
            if ordered_available() {
                return Ok(Box::new(OrderedStore::open(path)?));
            }
            Ok(Box::new(DbmStore::open(path)?))
        }
    }
}
