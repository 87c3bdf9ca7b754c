//! Receipts and logs.

use super::OdrRetriever;
use crate::{OdrError, ReceiptsRequest};
use alloy_primitives::B256;
use lumen_primitives::{Header, Log, Receipt, derive_receipt_fields, needs_derivation};
use lumen_storage::{
    Batcher, Database, WriteBatch,
    schema::{read_canonical_hash, read_chain_config, read_raw_receipts, write_receipts},
};
use tokio_util::sync::CancellationToken;

impl<DB: Database> OdrRetriever<DB> {
    /// Returns the receipts of the block with every derived field filled in.
    ///
    /// Receipts missing locally are fetched remotely. A set still lacking its
    /// derived fields is completed against the block and the chain
    /// configuration of the local genesis, then written back once.
    pub async fn block_receipts(
        &self,
        hash: B256,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<Receipt>, OdrError> {
        let mut receipts = match read_raw_receipts(self.db.as_ref(), hash, number)? {
            Some(receipts) => {
                crate::inc!(counter, LOCAL_HITS, "artifact" => "receipts");
                receipts
            }
            None => {
                crate::inc!(counter, LOCAL_MISSES, "artifact" => "receipts");
                debug!(target: "odr", %hash, number, "Receipts not stored locally");
                let request = ReceiptsRequest { hash, number, header: None, untrusted: false };
                self.submit(request, cancel).await?
            }
        };
        if !needs_derivation(&receipts) {
            return Ok(receipts);
        }

        let block = self.block(hash, number, cancel).await?;
        let genesis = read_canonical_hash(self.db.as_ref(), 0)?.unwrap_or_default();
        let Some(config) = read_chain_config(self.db.as_ref(), genesis)? else {
            warn!(target: "odr", %genesis, "No chain config stored for genesis");
            return Err(OdrError::MissingChainConfig(genesis));
        };
        derive_receipt_fields(&mut receipts, &config, hash, number, block.transactions())
            .inspect_err(|err| {
                warn!(target: "odr", %hash, number, %err, "Receipts do not match block");
            })?;

        let mut batch = self.db.new_batch();
        write_receipts(&mut batch, hash, number, &receipts);
        batch.write()?;
        crate::add!(counter, RECEIPTS_DERIVED, receipts.len() as u64);
        debug!(target: "odr", %hash, number, count = receipts.len(), "Stored derived receipts");

        Ok(receipts)
    }

    /// Returns the logs of the block, grouped per transaction.
    pub async fn block_logs(
        &self,
        hash: B256,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<Log>>, OdrError> {
        let receipts = self.block_receipts(hash, number, cancel).await?;
        Ok(receipts.into_iter().map(|receipt| receipt.logs).collect())
    }

    /// Returns the logs of the block described by `header` without trusting
    /// the serving peer.
    ///
    /// Remotely fetched receipts are neither derived nor stored.
    pub async fn untrusted_block_logs(
        &self,
        header: &Header,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<Log>>, OdrError> {
        let (hash, number) = (header.hash_slow(), header.number);
        let receipts = match read_raw_receipts(self.db.as_ref(), hash, number)? {
            Some(receipts) => receipts,
            None => {
                debug!(target: "odr", %hash, number, "Fetching untrusted receipts");
                let request =
                    ReceiptsRequest { hash, number, header: Some(header.clone()), untrusted: true };
                self.submit(request, cancel).await?
            }
        };
        Ok(receipts.into_iter().map(|receipt| receipt.logs).collect())
    }
}
