//! Error types for the local store.

use thiserror::Error;

/// Errors that may occur while interacting with the local store.
///
/// This enum is used across all engines and schema accessors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database was closed before the operation.
    #[error("database closed")]
    Closed,

    /// The disk engine failed.
    #[cfg(feature = "rocksdb")]
    #[error("disk database error: {0}")]
    Disk(#[from] rocksdb::Error),

    /// A stored entry is not valid RLP for its table.
    #[error("failed to decode {table} entry: {source}")]
    Rlp {
        /// The table the entry was read from.
        table: &'static str,
        /// The decoding failure.
        #[source]
        source: alloy_rlp::Error,
    },

    /// A stored JSON entry could not be encoded or decoded.
    #[error("json entry error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored entry has the wrong shape for its table.
    #[error("invalid {table} entry: {reason}")]
    InvalidEntry {
        /// The table the entry was read from.
        table: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
