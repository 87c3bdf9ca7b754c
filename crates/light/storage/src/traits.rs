//! Byte-level interfaces every storage engine provides.

use crate::StorageError;
use std::fmt::Debug;

/// A snapshot of key/value pairs, ascending by key.
pub type KeyValueIter = std::vec::IntoIter<(Vec<u8>, Vec<u8>)>;

/// Read access to a key-value store.
pub trait KeyValueReader {
    /// Returns `true` if the key is present.
    fn has(&self, key: &[u8]) -> Result<bool, StorageError>;

    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;
}

/// Write access to a key-value store.
pub trait KeyValueWriter {
    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Removes `key` from the store. Removing an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), StorageError>;
}

/// A write-only buffer of changes applied atomically to its database.
///
/// A batch belongs to a single writer and is never shared between callers.
pub trait WriteBatch: Send {
    /// Queues a write of `value` under `key`.
    fn put(&mut self, key: &[u8], value: &[u8]);

    /// Queues a removal of `key`.
    fn delete(&mut self, key: &[u8]);

    /// Returns the amount of data queued for writing.
    fn value_size(&self) -> usize;

    /// Atomically applies every queued change and empties the batch.
    fn write(&mut self) -> Result<(), StorageError>;

    /// Discards every queued change.
    fn reset(&mut self);
}

/// Creates write batches for a database.
pub trait Batcher {
    /// The batch type of the database.
    type Batch: WriteBatch;

    /// Creates an empty batch that commits into this database.
    fn new_batch(&self) -> Self::Batch;
}

/// Ordered iteration over a database.
pub trait Iteratee {
    /// Returns every pair whose key starts with `prefix`, ascending by key.
    fn iter_with_prefix(&self, prefix: &[u8]) -> Result<KeyValueIter, StorageError>;
}

/// A complete key-value store, safe for concurrent use.
pub trait Database:
    KeyValueReader + KeyValueWriter + Batcher + Iteratee + Debug + Send + Sync + 'static
{
}

impl<T> Database for T where
    T: KeyValueReader + KeyValueWriter + Batcher + Iteratee + Debug + Send + Sync + 'static
{
}
