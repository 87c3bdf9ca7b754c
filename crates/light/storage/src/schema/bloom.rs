//! Bloom-bits sections and bloom-trie roots.

use super::{bloom_bits_key, bloom_trie_root_key};
use crate::{KeyValueReader, StorageError, WriteBatch};
use alloy_primitives::B256;
use tracing::error;

/// Reads the compressed bit vector of `bit` over `section`, keyed by the
/// section head hash.
pub fn read_bloom_bits<DB>(
    db: &DB,
    bit: u16,
    section: u64,
    head: B256,
) -> Result<Option<Vec<u8>>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    db.get(&bloom_bits_key(bit, section, head))
}

/// Queues the compressed bit vector of `bit` over `section`.
pub fn write_bloom_bits<B: WriteBatch + ?Sized>(
    batch: &mut B,
    bit: u16,
    section: u64,
    head: B256,
    bits: &[u8],
) {
    batch.put(&bloom_bits_key(bit, section, head), bits);
}

/// Reads the bloom-trie root committed for `section` with the given head.
pub fn read_bloom_trie_root<DB>(
    db: &DB,
    section: u64,
    head: B256,
) -> Result<Option<B256>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&bloom_trie_root_key(section, head))? else {
        return Ok(None);
    };
    if data.len() != B256::len_bytes() {
        error!(target: "odr_storage", section, %head, len = data.len(), "Invalid bloom trie root");
        return Err(StorageError::InvalidEntry {
            table: "bloom trie root",
            reason: format!("expected 32 bytes, found {}", data.len()),
        });
    }
    Ok(Some(B256::from_slice(&data)))
}

/// Queues the bloom-trie root for `section` with the given head.
pub fn write_bloom_trie_root<B: WriteBatch + ?Sized>(
    batch: &mut B,
    section: u64,
    head: B256,
    root: B256,
) {
    batch.put(&bloom_trie_root_key(section, head), root.as_slice());
}
