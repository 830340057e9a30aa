//! Bolthole - Key/value store with pluggable backends
//!
//! This crate provides a minimal get/put/close storage abstraction with
//! three interchangeable backends:
//! - In-memory (for testing and scratch data)
//! - dbm-style single-file mapping (text keys and values)
//! - Ordered persistent store (redb, behind the default `ordered` feature)
//!
//! ## Architecture
//!
//! [`create_store`] selects and constructs a backend; with no explicit
//! kind it prefers the ordered backend and falls back to the file mapping.
//! [`IsolatedStore`] wraps any backend behind a single worker thread and a
//! command channel, so many threads can share one store without the
//! backend itself being thread-safe.

mod backend;
mod dbm;
mod error;
mod factory;
mod isolated;
mod memory;
#[cfg(feature = "ordered")]
mod ordered;

pub use backend::{StoreBackend, StoreKind};
pub use dbm::DbmStore;
pub use error::{Result, StoreError};
pub use factory::{create_store, ordered_available};
pub use isolated::IsolatedStore;
pub use memory::MemStore;
#[cfg(feature = "ordered")]
pub use ordered::OrderedStore;
