//! Header, body and block queries.

use alloy_primitives::B256;
use clap::Args;
use lumen_odr::OdrRetriever;
use lumen_storage::Database;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Selects a canonical height.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberArgs {
    /// Block height.
    #[arg(long, short = 'n')]
    pub(crate) number: u64,
}

impl NumberArgs {
    pub(crate) async fn canonical_hash<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.canonical_hash(self.number, cancel).await?))
    }

    pub(crate) async fn header<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.header_by_number(self.number, cancel).await?))
    }
}

/// Selects a block by hash and height.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockArgs {
    /// Block hash.
    #[arg(long)]
    pub(crate) hash: B256,
    /// Block height.
    #[arg(long, short = 'n')]
    pub(crate) number: u64,
}

impl BlockArgs {
    pub(crate) async fn body<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.body_rlp(self.hash, self.number, cancel).await?))
    }

    pub(crate) async fn block<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.block(self.hash, self.number, cancel).await?))
    }

    pub(crate) async fn receipts<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.block_receipts(self.hash, self.number, cancel).await?))
    }
}
