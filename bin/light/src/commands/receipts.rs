//! Log queries.

use alloy_primitives::B256;
use anyhow::Context;
use clap::Args;
use lumen_odr::OdrRetriever;
use lumen_storage::{Database, schema::read_header};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Selects the block whose logs are printed.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogsArgs {
    /// Block hash.
    #[arg(long)]
    pub(crate) hash: B256,
    /// Block height.
    #[arg(long, short = 'n')]
    pub(crate) number: u64,
    /// Reads receipts without deriving or storing them.
    #[arg(long)]
    pub(crate) untrusted: bool,
}

impl LogsArgs {
    pub(crate) async fn run<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        let logs = if self.untrusted {
            let header = read_header(retriever.database().as_ref(), self.hash, self.number)?
                .with_context(|| format!("header {} at {} not stored", self.hash, self.number))?;
            retriever.untrusted_block_logs(&header, cancel).await?
        } else {
            retriever.block_logs(self.hash, self.number, cancel).await?
        };
        Ok(json!(logs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_retriever;
    use lumen_odr::{OdrConfig, test_utils::{ChainFixture, underived_receipts}};
    use lumen_primitives::ChainConfig;
    use lumen_storage::{Batcher, WriteBatch, schema};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_logs_are_derived_from_stored_receipts() {
        let mut chain = ChainFixture::new(ChainConfig::new(1)).unwrap();
        let tx = chain.transfer(0);
        let block = chain.push_block(vec![tx.clone()]).unwrap();
        let db = chain.database();
        let mut batch = db.new_batch();
        schema::write_receipts(&mut batch, block.hash(), 1, &underived_receipts(&[tx.clone()]));
        batch.write().unwrap();
        let retriever = build_retriever(Arc::new(db), OdrConfig::default()).unwrap();
        let cancel = CancellationToken::new();

        let untrusted = LogsArgs { hash: block.hash(), number: 1, untrusted: true };
        let raw = untrusted.run(&retriever, &cancel).await.unwrap();
        assert_eq!(raw[0][0]["txHash"], json!(B256::ZERO));

        let trusted = LogsArgs { untrusted: false, ..untrusted };
        let derived = trusted.run(&retriever, &cancel).await.unwrap();
        assert_eq!(derived[0][0]["txHash"], json!(tx.hash()));
    }
}
