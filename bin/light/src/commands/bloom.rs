//! Bloom-bits queries.

use clap::Args;
use lumen_odr::OdrRetriever;
use lumen_storage::Database;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Selects a bloom bit and the sections to read it for.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct BloomBitsArgs {
    /// Bloom bit index.
    #[arg(long)]
    pub(crate) bit: u16,
    /// Comma separated section indices.
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) sections: Vec<u64>,
}

impl BloomBitsArgs {
    pub(crate) async fn run<DB: Database>(
        &self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        Ok(json!(retriever.bloom_bits(self.bit, &self.sections, cancel).await?))
    }
}
