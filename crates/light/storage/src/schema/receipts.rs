//! Block receipts.

use super::block_receipts_key;
use crate::{KeyValueReader, StorageError, WriteBatch};
use alloy_primitives::B256;
use alloy_rlp::Decodable;
use lumen_primitives::Receipt;
use tracing::warn;

/// Returns `true` if receipts are stored for (`hash`, `number`).
pub fn has_receipts<DB>(db: &DB, hash: B256, number: u64) -> Result<bool, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    db.has(&block_receipts_key(number, hash))
}

/// Reads the receipts of a block exactly as stored.
///
/// No block-context fields are filled in by this call.
pub fn read_raw_receipts<DB>(
    db: &DB,
    hash: B256,
    number: u64,
) -> Result<Option<Vec<Receipt>>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&block_receipts_key(number, hash))? else {
        return Ok(None);
    };
    let receipts = Vec::<Receipt>::decode(&mut data.as_slice()).map_err(|source| {
        warn!(target: "odr_storage", %hash, number, %source, "Invalid receipts RLP");
        StorageError::Rlp { table: "receipts", source }
    })?;
    Ok(Some(receipts))
}

/// Queues the receipts of a block.
pub fn write_receipts<B: WriteBatch + ?Sized>(
    batch: &mut B,
    hash: B256,
    number: u64,
    receipts: &[Receipt],
) {
    let mut out = Vec::new();
    alloy_rlp::encode_list::<Receipt, Receipt>(receipts, &mut out);
    batch.put(&block_receipts_key(number, hash), &out);
}

/// Queues the removal of the receipts of a block.
pub fn delete_receipts<B: WriteBatch + ?Sized>(batch: &mut B, hash: B256, number: u64) {
    batch.delete(&block_receipts_key(number, hash));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Batcher, MemoryDatabase};
    use lumen_primitives::{Log, RECEIPT_STATUS_SUCCESSFUL};

    #[test]
    fn test_receipts_roundtrip() {
        let db = MemoryDatabase::new();
        let hash = B256::repeat_byte(0xaa);
        let receipts = vec![
            Receipt {
                status: RECEIPT_STATUS_SUCCESSFUL,
                cumulative_gas_used: 21_000,
                logs: vec![Log { topics: vec![B256::repeat_byte(1)], ..Default::default() }],
                ..Default::default()
            },
            Receipt {
                cumulative_gas_used: 42_000,
                tx_hash: B256::repeat_byte(2),
                ..Default::default()
            },
        ];
        assert!(!has_receipts(&db, hash, 5).unwrap());

        let mut batch = db.new_batch();
        write_receipts(&mut batch, hash, 5, &receipts);
        batch.write().unwrap();

        assert!(has_receipts(&db, hash, 5).unwrap());
        assert_eq!(read_raw_receipts(&db, hash, 5).unwrap(), Some(receipts));

        delete_receipts(&mut batch, hash, 5);
        batch.write().unwrap();
        assert_eq!(read_raw_receipts(&db, hash, 5).unwrap(), None);
    }

    #[test]
    fn test_empty_receipt_set_is_present() {
        let db = MemoryDatabase::new();
        let mut batch = db.new_batch();
        write_receipts(&mut batch, B256::ZERO, 1, &[]);
        batch.write().unwrap();
        assert_eq!(read_raw_receipts(&db, B256::ZERO, 1).unwrap(), Some(vec![]));
    }
}
