//! Chain artifact types served by the lumen on-demand retrieval layer.
//!
//! Headers are the alloy consensus [`Header`]; bodies, receipts and the
//! transaction lookup types are defined here together with their RLP
//! encodings, which are the formats held by the local store and returned by
//! remote peers.
#![doc(issue_tracker_base_url = "https://github.com/lumen-light/lumen/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use alloy_consensus::Header;

mod block;
pub use block::{Block, BlockSign, Body, CommitteeMember};

mod transaction;
pub use transaction::Transaction;

mod receipt;
pub use receipt::{
    DeriveError, Log, RECEIPT_STATUS_FAILED, RECEIPT_STATUS_SUCCESSFUL, Receipt,
    derive_receipt_fields, needs_derivation,
};

mod config;
pub use config::{
    ChainConfig, DEVNET_GENESIS_HASH, IndexerConfig, MAINNET_GENESIS_HASH, TESTNET_GENESIS_HASH,
    TrustedCheckpoint,
};

mod lookup;
pub use lookup::{TxLookupEntry, TxStatus, TxStatusKind};
