//! A persistent storage engine backed by RocksDB.

use crate::{
    Batcher, Iteratee, KeyValueIter, KeyValueReader, KeyValueWriter, StorageError, WriteBatch,
};
use rocksdb::{DB, Direction, IteratorMode, Options};
use std::{path::Path, sync::Arc};

/// A RocksDB-backed key-value store.
#[derive(Debug, Clone)]
pub struct DiskDatabase {
    db: Arc<DB>,
}

impl DiskDatabase {
    /// Opens the database at `path`, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path)?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueReader for DiskDatabase {
    fn has(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.db.get_pinned(key)?.is_some())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.db.get(key)?)
    }
}

impl KeyValueWriter for DiskDatabase {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        Ok(self.db.put(key, value)?)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        Ok(self.db.delete(key)?)
    }
}

impl Iteratee for DiskDatabase {
    fn iter_with_prefix(&self, prefix: &[u8]) -> Result<KeyValueIter, StorageError> {
        let mut pairs = Vec::new();
        for entry in self.db.iterator(IteratorMode::From(prefix, Direction::Forward)) {
            let (key, value) = entry?;
            if !key.starts_with(prefix) {
                break;
            }
            pairs.push((key.into_vec(), value.into_vec()));
        }
        Ok(pairs.into_iter())
    }
}

impl Batcher for DiskDatabase {
    type Batch = DiskBatch;

    fn new_batch(&self) -> DiskBatch {
        DiskBatch { db: self.db.clone(), batch: rocksdb::WriteBatch::default(), size: 0 }
    }
}

/// A write batch for [`DiskDatabase`].
pub struct DiskBatch {
    db: Arc<DB>,
    batch: rocksdb::WriteBatch,
    size: usize,
}

impl std::fmt::Debug for DiskBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskBatch")
            .field("ops", &self.batch.len())
            .field("size", &self.size)
            .finish()
    }
}

impl WriteBatch for DiskBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.batch.put(key, value);
        self.size += value.len();
    }

    fn delete(&mut self, key: &[u8]) {
        self.batch.delete(key);
        self.size += 1;
    }

    fn value_size(&self) -> usize {
        self.size
    }

    fn write(&mut self) -> Result<(), StorageError> {
        let batch = std::mem::take(&mut self.batch);
        self.size = 0;
        Ok(self.db.write(batch)?)
    }

    fn reset(&mut self) {
        self.batch.clear();
        self.size = 0;
    }
}
