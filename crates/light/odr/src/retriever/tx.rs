//! Transaction lookup by hash.

use super::OdrRetriever;
use crate::{OdrError, RequestKind, TrustViolation, TxStatusRequest};
use alloy_primitives::B256;
use lumen_primitives::Transaction;
use lumen_storage::Database;
use tokio_util::sync::CancellationToken;

/// A canonical transaction together with its position in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLocation {
    /// The transaction.
    pub transaction: Transaction,
    /// Hash of the containing block.
    pub block_hash: B256,
    /// Height of the containing block.
    pub block_number: u64,
    /// Position of the transaction in the block body.
    pub index: u64,
}

impl<DB: Database> OdrRetriever<DB> {
    /// Looks up a transaction by hash through a remote status request.
    ///
    /// Returns `None` unless the peer reports the transaction as included.
    /// The reported position is only accepted if the block is canonical
    /// locally and its body holds the queried transaction at that index.
    pub async fn transaction(
        &self,
        hash: B256,
        cancel: &CancellationToken,
    ) -> Result<Option<TransactionLocation>, OdrError> {
        let statuses = self.submit(TxStatusRequest { hashes: vec![hash] }, cancel).await?;
        let [status] = statuses.as_slice() else {
            return Err(TrustViolation::ResponseCountMismatch {
                kind: RequestKind::TxStatus,
                expected: 1,
                got: statuses.len(),
            }
            .into());
        };
        let Some(lookup) = status.included_at() else {
            debug!(target: "odr", %hash, status = ?status.status, "Transaction not included");
            return Ok(None);
        };

        let canonical = self.header_by_number(lookup.block_number, cancel).await?;
        if canonical.is_none_or(|header| header.hash_slow() != lookup.block_hash) {
            warn!(
                target: "odr",
                %hash,
                block = %lookup.block_hash,
                number = lookup.block_number,
                "Transaction reported in non-canonical block"
            );
            return Err(TrustViolation::NonCanonicalBlock {
                number: lookup.block_number,
                hash: lookup.block_hash,
            }
            .into());
        }

        let mut body = self.body(lookup.block_hash, lookup.block_number, cancel).await?;
        let len = body.transactions.len();
        let index = usize::try_from(lookup.index).ok().filter(|&index| index < len);
        let Some(index) = index else {
            warn!(
                target: "odr",
                %hash,
                index = lookup.index,
                len,
                "Transaction index out of bounds"
            );
            return Err(TrustViolation::TransactionIndexOutOfBounds { index: lookup.index, len }
                .into());
        };
        let transaction = body.transactions.swap_remove(index);
        let found = transaction.hash();
        if found != hash {
            warn!(target: "odr", expected = %hash, %found, "Transaction hash mismatch");
            return Err(TrustViolation::TransactionHashMismatch { expected: hash, found }.into());
        }

        Ok(Some(TransactionLocation {
            transaction,
            block_hash: lookup.block_hash,
            block_number: lookup.block_number,
            index: lookup.index,
        }))
    }
}
