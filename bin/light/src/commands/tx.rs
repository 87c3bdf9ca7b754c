//! Transaction lookup.

use alloy_primitives::B256;
use clap::Args;
use lumen_odr::OdrRetriever;
use lumen_storage::Database;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Selects a transaction by hash.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TxArgs {
    /// Transaction hash.
    pub(crate) hash: B256,
}

impl TxArgs {
    pub(crate) async fn run<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.transaction(self.hash, cancel).await?))
    }
}
