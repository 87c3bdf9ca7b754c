//! Transaction status and position reported by remote peers.

use alloy_primitives::B256;

/// The claimed position of a transaction in the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLookupEntry {
    /// Hash of the containing block.
    pub block_hash: B256,
    /// Height of the containing block.
    pub block_number: u64,
    /// Position of the transaction in the block body.
    pub index: u64,
}

/// Inclusion state of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TxStatusKind {
    /// Not known to the responder.
    #[default]
    Unknown,
    /// Queued in the responder's pool.
    Queued,
    /// Pending in the responder's pool.
    Pending,
    /// Included in a canonical block.
    Included,
}

/// The status of a transaction as reported by a remote peer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxStatus {
    /// Inclusion state.
    pub status: TxStatusKind,
    /// Claimed position, present when included.
    pub lookup: Option<TxLookupEntry>,
    /// Rejection reason reported by the peer, if any.
    pub error: Option<String>,
}

impl TxStatus {
    /// Creates the status of an included transaction.
    pub const fn included(lookup: TxLookupEntry) -> Self {
        Self { status: TxStatusKind::Included, lookup: Some(lookup), error: None }
    }

    /// Returns the claimed position if the transaction is reported as included.
    pub const fn included_at(&self) -> Option<TxLookupEntry> {
        match (self.status, self.lookup) {
            (TxStatusKind::Included, Some(lookup)) => Some(lookup),
            _ => None,
        }
    }
}
