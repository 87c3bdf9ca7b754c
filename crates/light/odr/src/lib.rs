//! On-demand retrieval of chain artifacts for the lumen light client.
//!
//! [`OdrRetriever`] answers header, body, receipt, log, bloom-bits and
//! transaction queries from a local [`Database`](lumen_storage::Database),
//! falling back to a remote [`OdrBackend`] on misses. Remote answers are
//! reconciled with the locally known canonical chain and the trusted bloom
//! trie before they are returned.
//!
//! ## Features
//!
//! - `metrics`: record local hits, remote requests and trust rollbacks with the
//!   [`metrics`](https://docs.rs/metrics) crate, see [`describe_odr_metrics`].
//! - `test-utils`: expose the [`test_utils`] fixtures.
#![doc(issue_tracker_base_url = "https://github.com/lumen-light/lumen/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod macros;

mod metrics;
pub use metrics::{Metrics, describe_odr_metrics};

mod errors;
pub use errors::{ErrorKind, OdrError, RetrieveError, TrustViolation};

mod request;
pub use request::{
    BlockRequest, BloomRequest, OdrRequest, OdrResponse, ReceiptsRequest, Request, RequestKind,
    TxStatusRequest,
};

mod backend;
pub use backend::{OdrBackend, OfflineBackend};

mod indexer;
pub use indexer::{BloomTrieIndexer, CheckpointIndexer, TrustedSections};

mod reconcile;
pub use reconcile::reconcile_trusted_sections;

mod config;
pub use config::OdrConfig;

mod retriever;
pub use retriever::{OdrRetriever, TransactionLocation};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
