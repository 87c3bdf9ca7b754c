//! Local key-value storage for the lumen light client.
//!
//! The crate is split in two layers:
//!
//! - engines implementing the byte-level [`Database`] traits: the ephemeral
//!   [`MemoryDatabase`] and, behind the `rocksdb` feature, the persistent
//!   [`DiskDatabase`];
//! - typed accessors in [`schema`] that map headers, bodies, receipts, bloom
//!   bits and chain configuration onto keys of any engine.
//!
//! ## Features
//!
//! - `rocksdb`: enable [`DiskDatabase`].
#![doc(issue_tracker_base_url = "https://github.com/lumen-light/lumen/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::StorageError;

mod traits;
pub use traits::{
    Batcher, Database, Iteratee, KeyValueIter, KeyValueReader, KeyValueWriter, WriteBatch,
};

mod memory;
pub use memory::{MemoryBatch, MemoryDatabase};

#[cfg(feature = "rocksdb")]
mod disk;
#[cfg(feature = "rocksdb")]
pub use disk::{DiskBatch, DiskDatabase};

pub mod schema;
