//! Trusted bloom-trie sections.

use alloy_primitives::B256;
use lumen_primitives::{IndexerConfig, TrustedCheckpoint};
use std::collections::BTreeMap;

/// The trust boundary over bloom-trie sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrustedSections {
    /// Number of contiguous sections considered verified.
    pub count: u64,
    /// Height of the block heading the last trusted section.
    pub head_number: u64,
    /// Hash of that block.
    pub head_hash: B256,
}

/// Read-only view of the bloom-trie indexer.
#[cfg_attr(test, mockall::automock)]
pub trait BloomTrieIndexer: Send + Sync {
    /// Returns the presumed trust boundary.
    fn sections(&self) -> TrustedSections;

    /// Returns the hash of the block heading the given section, zero if unknown.
    fn section_head(&self, section: u64) -> B256;
}

/// An indexer vouching for the sections covered by a [`TrustedCheckpoint`].
#[derive(Debug, Clone)]
pub struct CheckpointIndexer {
    checkpoint: TrustedCheckpoint,
    config: IndexerConfig,
    heads: BTreeMap<u64, B256>,
}

impl CheckpointIndexer {
    /// Creates an indexer from a checkpoint and the bloom-trie sizing.
    pub fn new(checkpoint: TrustedCheckpoint, config: IndexerConfig) -> Self {
        let mut heads = BTreeMap::new();
        heads.insert(checkpoint.section_index, checkpoint.section_head);
        Self { checkpoint, config, heads }
    }

    /// Records the head of an earlier section, used when rolling back.
    pub fn with_section_head(mut self, section: u64, head: B256) -> Self {
        if section < self.checkpoint.section_index {
            self.heads.insert(section, head);
        }
        self
    }

    /// Returns the checkpoint backing this indexer.
    pub const fn checkpoint(&self) -> &TrustedCheckpoint {
        &self.checkpoint
    }
}

impl BloomTrieIndexer for CheckpointIndexer {
    fn sections(&self) -> TrustedSections {
        let count = self.checkpoint.section_count();
        TrustedSections {
            count,
            head_number: self.config.bloom_trie_head(count),
            head_hash: self.checkpoint.section_head,
        }
    }

    fn section_head(&self, section: u64) -> B256 {
        self.heads.get(&section).copied().unwrap_or_default()
    }
}
