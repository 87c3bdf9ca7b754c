//! An ephemeral, map-backed storage engine.

use crate::{
    Batcher, Iteratee, KeyValueIter, KeyValueReader, KeyValueWriter, StorageError, WriteBatch,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// An in-memory key-value store.
///
/// Clones share the same underlying map. After [`MemoryDatabase::close`] every
/// operation fails with [`StorageError::Closed`].
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    entries: Arc<RwLock<Option<Entries>>>,
}

impl MemoryDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { entries: Arc::new(RwLock::new(Some(Entries::new()))) }
    }

    /// Drops every entry and rejects further operations.
    pub fn close(&self) {
        *self.write_guard() = None;
    }

    /// Returns the number of entries, zero once closed.
    pub fn len(&self) -> usize {
        self.read_guard().as_ref().map_or(0, BTreeMap::len)
    }

    /// Returns `true` if the database holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Option<Entries>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Option<Entries>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueReader for MemoryDatabase {
    fn has(&self, key: &[u8]) -> Result<bool, StorageError> {
        let guard = self.read_guard();
        let entries = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(entries.contains_key(key))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let guard = self.read_guard();
        let entries = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(entries.get(key).cloned())
    }
}

impl KeyValueWriter for MemoryDatabase {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let mut guard = self.write_guard();
        let entries = guard.as_mut().ok_or(StorageError::Closed)?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        let mut guard = self.write_guard();
        let entries = guard.as_mut().ok_or(StorageError::Closed)?;
        entries.remove(key);
        Ok(())
    }
}

impl Iteratee for MemoryDatabase {
    fn iter_with_prefix(&self, prefix: &[u8]) -> Result<KeyValueIter, StorageError> {
        let guard = self.read_guard();
        let entries = guard.as_ref().ok_or(StorageError::Closed)?;
        let pairs: Vec<_> = entries
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(pairs.into_iter())
    }
}

impl Batcher for MemoryDatabase {
    type Batch = MemoryBatch;

    fn new_batch(&self) -> MemoryBatch {
        MemoryBatch { db: self.clone(), writes: Vec::new(), size: 0 }
    }
}

/// A write batch for [`MemoryDatabase`].
#[derive(Debug)]
pub struct MemoryBatch {
    db: MemoryDatabase,
    writes: Vec<(Vec<u8>, Option<Vec<u8>>)>,
    size: usize,
}

impl WriteBatch for MemoryBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.writes.push((key.to_vec(), Some(value.to_vec())));
        self.size += value.len();
    }

    fn delete(&mut self, key: &[u8]) {
        self.writes.push((key.to_vec(), None));
        self.size += 1;
    }

    fn value_size(&self) -> usize {
        self.size
    }

    fn write(&mut self) -> Result<(), StorageError> {
        let mut guard = self.db.write_guard();
        let entries = guard.as_mut().ok_or(StorageError::Closed)?;
        for (key, value) in self.writes.drain(..) {
            match value {
                Some(value) => entries.insert(key, value),
                None => entries.remove(&key),
            };
        }
        self.size = 0;
        Ok(())
    }

    fn reset(&mut self) {
        self.writes.clear();
        self.size = 0;
    }
}
