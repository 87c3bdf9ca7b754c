//! Contains the queries of the lumen-light CLI.

use clap::Subcommand;
use lumen_odr::OdrRetriever;
use lumen_storage::Database;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

mod chain;
pub(crate) use chain::{BlockArgs, NumberArgs};

mod bloom;
pub(crate) use bloom::BloomBitsArgs;

mod receipts;
pub(crate) use receipts::LogsArgs;

mod tx;
pub(crate) use tx::TxArgs;

/// Queries supported by the CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    /// Prints the canonical hash at a height.
    CanonicalHash(NumberArgs),
    /// Prints the canonical header at a height.
    Header(NumberArgs),
    /// Prints the RLP body of a block.
    Body(BlockArgs),
    /// Prints a block with its decoded body.
    Block(BlockArgs),
    /// Prints the receipts of a block, deriving missing fields.
    Receipts(BlockArgs),
    /// Prints the logs of a block.
    Logs(LogsArgs),
    /// Prints compressed bloom-bits vectors.
    BloomBits(BloomBitsArgs),
    /// Locates a transaction by hash.
    Tx(TxArgs),
}

impl Commands {
    /// Runs the query and returns its JSON result.
    pub(crate) async fn run<DB: Database>(
        self,
        retriever: &OdrRetriever<DB>,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Value> {
        match self {
            Self::CanonicalHash(args) => args.canonical_hash(retriever, cancel).await,
            Self::Header(args) => args.header(retriever, cancel).await,
            Self::Body(args) => args.body(retriever, cancel).await,
            Self::Block(args) => args.block(retriever, cancel).await,
            Self::Receipts(args) => args.receipts(retriever, cancel).await,
            Self::Logs(args) => args.run(retriever, cancel).await,
            Self::BloomBits(args) => args.run(retriever, cancel).await,
            Self::Tx(args) => args.run(retriever, cancel).await,
        }
    }
}
