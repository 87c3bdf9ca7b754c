//! Retriever configuration.

use lumen_primitives::{IndexerConfig, TrustedCheckpoint};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration of an [`OdrRetriever`](crate::OdrRetriever).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OdrConfig {
    /// Sizing of the bloom-bits and bloom-trie sections.
    pub indexer: IndexerConfig,
    /// Per-request timeout of remote submissions, in milliseconds.
    pub request_timeout: Option<u64>,
    /// Checkpoint bootstrapping the bloom-trie trust boundary.
    pub checkpoint: Option<TrustedCheckpoint>,
}

impl OdrConfig {
    /// Returns the remote request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_millis)
    }
}
