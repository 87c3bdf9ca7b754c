//! Contains the lumen-light CLI.

use crate::{commands::Commands, flags::GlobalArgs};
use alloy_primitives::B256;
use anyhow::Context;
use clap::Parser;
use lumen_odr::{CheckpointIndexer, OdrConfig, OdrRetriever, OfflineBackend};
use lumen_primitives::TrustedCheckpoint;
use lumen_storage::{Batcher, Database, DiskDatabase, WriteBatch, schema};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Inspects the chain artifacts a light client store can serve.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub(crate) global: GlobalArgs,
    /// The query to run.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Runs the CLI, printing the query result as JSON.
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        self.global.log.init_tracing()?;
        self.global.metrics.init_metrics(lumen_odr::describe_odr_metrics)?;

        let config = self.global.odr_config()?;
        let db = DiskDatabase::open(&self.global.datadir).with_context(|| {
            format!("failed to open database at {}", self.global.datadir.display())
        })?;
        let retriever = build_retriever(Arc::new(db), config)?;

        let cancel = CancellationToken::new();
        let ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!(target: "lumen_light", "Interrupted, cancelling query");
                ctrl_c.cancel();
            }
        });

        let output = self.command.run(&retriever, &cancel).await?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// Builds a retriever over `db` that never reaches the network.
///
/// A configured checkpoint bootstraps the bloom-trie trust boundary and
/// seeds its root into the store.
pub(crate) fn build_retriever<DB: Database>(
    db: Arc<DB>,
    config: OdrConfig,
) -> anyhow::Result<OdrRetriever<DB>> {
    let checkpoint = match config.checkpoint.clone() {
        Some(checkpoint) => Some(checkpoint),
        None => builtin_checkpoint(db.as_ref())?,
    };
    let indexer_config = config.indexer;
    let retriever = OdrRetriever::new(db, Arc::new(OfflineBackend), config);
    let Some(checkpoint) = checkpoint else {
        return Ok(retriever);
    };

    let db = retriever.database();
    let section = checkpoint.section_index;
    let stored = schema::read_bloom_trie_root(db.as_ref(), section, checkpoint.section_head)?;
    if stored.is_none() && checkpoint.bloom_root != B256::ZERO {
        let mut batch = db.new_batch();
        schema::write_bloom_trie_root(
            &mut batch,
            section,
            checkpoint.section_head,
            checkpoint.bloom_root,
        );
        batch.write()?;
        info!(
            target: "lumen_light",
            section,
            head = %checkpoint.section_head,
            "Seeded bloom trie root from checkpoint"
        );
    }
    Ok(retriever.with_indexer(Arc::new(CheckpointIndexer::new(checkpoint, indexer_config))))
}

/// Looks up the built-in checkpoint of the network whose genesis is stored in `db`.
fn builtin_checkpoint<DB>(db: &DB) -> anyhow::Result<Option<TrustedCheckpoint>>
where
    DB: Database + ?Sized,
{
    let Some(genesis) = schema::read_canonical_hash(db, 0)? else {
        return Ok(None);
    };
    let checkpoint = TrustedCheckpoint::for_genesis(genesis).cloned();
    if let Some(checkpoint) = &checkpoint {
        info!(
            target: "lumen_light",
            %genesis,
            section = checkpoint.section_index,
            "Using built-in checkpoint"
        );
    }
    Ok(checkpoint)
}
