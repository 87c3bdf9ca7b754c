//! Canonical hashes, headers and bodies.

use super::{block_body_key, header_hash_key, header_key, header_number_key};
use crate::{KeyValueReader, StorageError, WriteBatch};
use alloy_primitives::B256;
use alloy_rlp::Decodable;
use lumen_primitives::{Body, Header};
use tracing::{error, warn};

/// Reads the canonical hash at `number`.
///
/// A missing or all-zero entry is reported as `None`.
pub fn read_canonical_hash<DB>(db: &DB, number: u64) -> Result<Option<B256>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&header_hash_key(number))? else {
        return Ok(None);
    };
    if data.len() != B256::len_bytes() {
        error!(
            target: "odr_storage",
            number,
            len = data.len(),
            "Canonical hash entry has invalid length"
        );
        return Err(StorageError::InvalidEntry {
            table: "canonical hash",
            reason: format!("expected 32 bytes, found {}", data.len()),
        });
    }
    let hash = B256::from_slice(&data);
    Ok((!hash.is_zero()).then_some(hash))
}

/// Queues the canonical hash at `number`.
pub fn write_canonical_hash<B: WriteBatch + ?Sized>(batch: &mut B, number: u64, hash: B256) {
    batch.put(&header_hash_key(number), hash.as_slice());
}

/// Queues the removal of the canonical hash at `number`.
pub fn delete_canonical_hash<B: WriteBatch + ?Sized>(batch: &mut B, number: u64) {
    batch.delete(&header_hash_key(number));
}

/// Reads the height of the header with the given hash.
pub fn read_header_number<DB>(db: &DB, hash: B256) -> Result<Option<u64>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&header_number_key(hash))? else {
        return Ok(None);
    };
    let bytes: [u8; 8] = data.as_slice().try_into().map_err(|_| StorageError::InvalidEntry {
        table: "header number",
        reason: format!("expected 8 bytes, found {}", data.len()),
    })?;
    Ok(Some(u64::from_be_bytes(bytes)))
}

/// Reads and decodes the header keyed by (`hash`, `number`).
pub fn read_header<DB>(db: &DB, hash: B256, number: u64) -> Result<Option<Header>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&header_key(number, hash))? else {
        return Ok(None);
    };
    let header = Header::decode(&mut data.as_slice()).map_err(|source| {
        warn!(target: "odr_storage", %hash, number, %source, "Invalid header RLP");
        StorageError::Rlp { table: "header", source }
    })?;
    Ok(Some(header))
}

/// Queues a header together with its hash-to-number mapping.
///
/// Canonical status is recorded separately with [`write_canonical_hash`].
pub fn write_header<B: WriteBatch + ?Sized>(batch: &mut B, header: &Header) {
    let hash = header.hash_slow();
    batch.put(&header_number_key(hash), &header.number.to_be_bytes());
    batch.put(&header_key(header.number, hash), &alloy_rlp::encode(header));
}

/// Reads the raw RLP body keyed by (`hash`, `number`).
pub fn read_body_rlp<DB>(db: &DB, hash: B256, number: u64) -> Result<Option<Vec<u8>>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    db.get(&block_body_key(number, hash))
}

/// Queues a raw RLP body keyed by (`hash`, `number`).
pub fn write_body_rlp<B: WriteBatch + ?Sized>(batch: &mut B, hash: B256, number: u64, rlp: &[u8]) {
    batch.put(&block_body_key(number, hash), rlp);
}

/// Queues an encoded body keyed by (`hash`, `number`).
pub fn write_body<B: WriteBatch + ?Sized>(batch: &mut B, hash: B256, number: u64, body: &Body) {
    write_body_rlp(batch, hash, number, &body.encoded());
}
