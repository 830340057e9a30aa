//! Actor-style isolation wrapper giving one backend a single owning worker

use crate::{create_store, Result, StoreBackend, StoreError};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tracing::warn;

/// A command sent from a caller to the worker
enum Command {
    Put {
        key: Vec<u8>,
        value: Vec<u8>,
    },
    Get {
        key: Vec<u8>,
        reply: mpsc::Sender<Result<Vec<u8>>>,
    },
    Close,
}

/// Concurrency wrapper around a single store backend
///
/// Backends are not required to be thread-safe, so sharing one between
/// threads needs a single owner. `IsolatedStore` spawns one worker thread
/// that owns the backend and applies commands strictly in the order they
/// arrive on its channel; callers only ever hold the sending half.
///
/// `get` blocks until the worker replies on a per-call channel. `put` is
/// fire-and-forget: it returns once the command is enqueued, and a storage
/// failure inside the worker is logged rather than reported to the caller.
///
/// Handles are cloneable; clones share the same worker and queue. Dropping
/// every handle disconnects the channel, which the worker treats as close,
/// so the underlying resource is released even without an explicit
/// `close()`. Only the originally constructed handle can join the worker.
pub struct IsolatedStore {
    tx: mpsc::Sender<Command>,
    worker: Option<thread::JoinHandle<()>>,
}

impl IsolatedStore {
    /// Construct a backend via the factory and start its worker thread
    ///
    /// Takes the same arguments as [`create_store`]; construction errors
    /// surface here, before any thread is spawned.
    pub fn new(path: Option<&Path>, kind: Option<&str>) -> Result<Self> {
        let backend = create_store(path, kind)?;
        let (tx, rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("bolthole-store".to_string())
            .spawn(move || run_worker(backend, rx))?;

        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }

    /// Get the value associated with a key
    ///
    /// Blocks until the worker has applied every previously enqueued
    /// command and replied to this one. Fails with `StoreError::Closed` if
    /// the worker has already shut down.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Command::Get {
                key: key.to_vec(),
                reply: reply_tx,
            })
            .map_err(|_| StoreError::Closed)?;

        // The worker sends exactly one reply per get; a dropped sender
        // means the command was never serviced.
        reply_rx.recv().map_err(|_| StoreError::Closed)?
    }

    /// Associate a value with a key
    ///
    /// Returns as soon as the command is enqueued. Ordered relative to
    /// other commands on the same queue, but not acknowledged: a storage
    /// failure is only visible in the worker's log.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.tx
            .send(Command::Put {
                key: key.to_vec(),
                value: value.to_vec(),
            })
            .map_err(|_| StoreError::Closed)
    }

    /// Close the backend and shut the worker down
    ///
    /// Waits for the worker to drain commands enqueued before the close and
    /// terminate. Idempotent; commands enqueued after a close are never
    /// serviced and fail with `StoreError::Closed`.
    pub fn close(&mut self) -> Result<()> {
        // Send may fail if the worker is already gone; that is a no-op close
        let _ = self.tx.send(Command::Close);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("store worker panicked during shutdown");
            }
        }
        Ok(())
    }
}

impl Clone for IsolatedStore {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            worker: None,
        }
    }
}

/// Worker loop: sole owner of the backend for its entire lifetime
///
/// Every command is applied in arrival order. Errors are values here —
/// a failed command never terminates the loop, and get errors travel back
/// through the reply channel.
fn run_worker(mut backend: Box<dyn StoreBackend>, rx: mpsc::Receiver<Command>) {
    loop {
        match rx.recv() {
            Ok(Command::Put { key, value }) => {
                if let Err(e) = backend.put(&key, &value) {
                    warn!(
                        key = %String::from_utf8_lossy(&key),
                        error = %e,
                        "put failed in store worker"
                    );
                }
            }
            Ok(Command::Get { key, reply }) => {
                // A caller that gave up waiting only drops the receiver
                let _ = reply.send(backend.get(&key));
            }
            // All handles dropped counts as a close request
            Ok(Command::Close) | Err(_) => break,
        }
    }

    if let Err(e) = backend.close() {
        warn!(error = %e, "backend close failed in store worker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_then_get() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        store.put(b"x", b"y").unwrap();
        assert_eq!(store.get(b"x").unwrap(), b"y");
        store.close().unwrap();
    }

    #[test]
    fn test_not_found_travels_back() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        let err = store.get(b"missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(k) if k == "missing"));
        store.close().unwrap();
    }

    #[test]
    fn test_overwrite() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        store.put(b"a", b"1").unwrap();
        store.put(b"a", b"2").unwrap();
        assert_eq!(store.get(b"a").unwrap(), b"2");
        store.close().unwrap();
    }

    #[test]
    fn test_construction_error_is_synchronous() {
        let err = IsolatedStore::new(None, Some("bogus")).err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedKind(_)));
    }

    #[test]
    fn test_concurrent_callers_observe_their_own_writes() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        let threads = 8;
        let keys_per_thread = 25;

        thread::scope(|s| {
            for t in 0..threads {
                let handle = store.clone();
                s.spawn(move || {
                    for i in 0..keys_per_thread {
                        let key = format!("t{}-k{}", t, i);
                        let value = format!("t{}-v{}", t, i);
                        handle.put(key.as_bytes(), value.as_bytes()).unwrap();
                        assert_eq!(handle.get(key.as_bytes()).unwrap(), value.into_bytes());
                    }
                });
            }
        });

        // No writes lost: every key is still present afterwards
        for t in 0..threads {
            for i in 0..keys_per_thread {
                let key = format!("t{}-k{}", t, i);
                let value = format!("t{}-v{}", t, i);
                assert_eq!(store.get(key.as_bytes()).unwrap(), value.into_bytes());
            }
        }

        store.close().unwrap();
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        store.put(b"k", b"v").unwrap();
        store.close().unwrap();
        store.close().unwrap();
    }

    #[test]
    fn test_ops_after_close() {
        let mut store = IsolatedStore::new(None, Some("mem")).unwrap();
        store.close().unwrap();

        assert!(matches!(store.get(b"k"), Err(StoreError::Closed)));
        assert!(matches!(store.put(b"k", b"v"), Err(StoreError::Closed)));
    }

    #[test]
    fn test_durability_through_wrapper() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");

        {
            let mut store =
                IsolatedStore::new(Some(&db_path), Some("dbm")).unwrap();
            store.put(b"test_key", b"test_value").unwrap();
            store.close().unwrap();
        }

        {
            let mut store =
                IsolatedStore::new(Some(&db_path), Some("dbm")).unwrap();
            assert_eq!(store.get(b"test_key").unwrap(), b"test_value");
            store.close().unwrap();
        }
    }

    #[test]
    fn test_drop_releases_backend() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");

        {
            let store = IsolatedStore::new(Some(&db_path), Some("dbm")).unwrap();
            store.put(b"k", b"v").unwrap();
            // No explicit close; dropping the handle shuts the worker down
        }

        // The worker drains the queue and flushes once the channel disconnects
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            let text = std::fs::read_to_string(&db_path).unwrap();
            if text.contains("\"k\"") {
                break;
            }
            assert!(std::time::Instant::now() < deadline, "write never flushed");
            thread::yield_now();
        }
    }
}
