//! Ordered persistent backend (redb)

use crate::{Result, StoreBackend, StoreError};
use redb::{Database, TableDefinition};
use std::fs;
use std::path::{Path, PathBuf};

const ENTRIES_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("entries");

/// Ordered persistent key/value backend
///
/// Byte-transparent storage backed by a redb database file inside the
/// given directory, with automatic crash recovery. Selected by the
/// `"leveldb"` kind string.
pub struct OrderedStore {
    db: Option<Database>,
    path: PathBuf,
}

impl OrderedStore {
    /// Create or open an ordered store in the given directory
    ///
    /// The directory is created if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        let db = Database::create(path.join("data.redb"))?;

        // Ensure the table exists so a fresh database can serve reads
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(ENTRIES_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Some(db), path })
    }

    /// Get the directory path of this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn db(&self) -> Result<&Database> {
        self.db.as_ref().ok_or(StoreError::Closed)
    }
}

impl StoreBackend for OrderedStore {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let read_txn = self.db()?.begin_read()?;
        let table = read_txn.open_table(ENTRIES_TABLE)?;

        match table.get(key)? {
            Some(value) => Ok(value.value().to_vec()),
            None => Err(StoreError::not_found(key)),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let write_txn = self.db()?.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the database releases the file lock and flushes state
        self.db.take();
        Ok(())
    }
}
