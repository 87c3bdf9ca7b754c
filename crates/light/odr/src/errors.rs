//! Error types for on-demand retrieval.

use crate::RequestKind;
use alloy_primitives::B256;
use lumen_primitives::DeriveError;
use lumen_storage::StorageError;
use std::time::Duration;
use thiserror::Error;

/// A failure of the remote channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrieveError {
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// No remote peer is available to serve the request.
    #[error("no peers available")]
    NoPeers,
    /// The backend answered with a response of the wrong kind.
    #[error("expected {expected} response, got {got}")]
    UnexpectedResponse {
        /// The kind of the submitted request.
        expected: RequestKind,
        /// The kind of the received response.
        got: RequestKind,
    },
    /// The backend failed to serve the request.
    #[error("retrieval failed: {0}")]
    Failed(String),
}

/// A remote answer that contradicts local trust anchors or is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustViolation {
    /// The locator points at a block that is not canonical locally.
    #[error("block {hash} at height {number} is not canonical")]
    NonCanonicalBlock {
        /// Claimed block height.
        number: u64,
        /// Claimed block hash.
        hash: B256,
    },
    /// The locator index lies outside the block body.
    #[error("transaction index {index} out of bounds for body with {len} transactions")]
    TransactionIndexOutOfBounds {
        /// Claimed transaction index.
        index: u64,
        /// Number of transactions in the body.
        len: usize,
    },
    /// The transaction at the locator has a different hash.
    #[error("transaction hash mismatch: expected {expected}, found {found}")]
    TransactionHashMismatch {
        /// Queried hash.
        expected: B256,
        /// Hash of the transaction found at the locator.
        found: B256,
    },
    /// A bloom-bits section lies beyond the trusted bloom trie.
    #[error("no trusted bloom trie for section {section}, {trusted} sections trusted")]
    NoTrustedBloomTrie {
        /// Requested section.
        section: u64,
        /// Number of trusted sections.
        trusted: u64,
    },
    /// A response carries a different number of items than requested.
    #[error("{kind} response has {got} items, expected {expected}")]
    ResponseCountMismatch {
        /// Kind of the response.
        kind: RequestKind,
        /// Number of requested items.
        expected: usize,
        /// Number of returned items.
        got: usize,
    },
}

/// Broad classification of an [`OdrError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The artifact is unavailable locally and cannot be fetched.
    NotFound,
    /// The remote channel failed.
    Transport,
    /// A payload could not be decoded or reconciled with its block.
    Decode,
    /// A remote answer failed validation.
    TrustViolation,
    /// The local store is inconsistent or failed.
    Internal,
}

/// An error returned by the retrieval operations.
#[derive(Debug, Error)]
pub enum OdrError {
    /// The local store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The remote channel failed.
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),
    /// A remote answer failed validation.
    #[error("trust violation: {0}")]
    Trust(#[from] TrustViolation),
    /// A payload is not valid RLP.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] alloy_rlp::Error),
    /// A receipt set cannot be matched with its block.
    #[error("failed to derive receipt fields: {0}")]
    Derive(#[from] DeriveError),
    /// The header of a block is not stored locally.
    #[error("header {hash} at height {number} not found")]
    NoHeader {
        /// Block hash.
        hash: B256,
        /// Block height.
        number: u64,
    },
    /// No chain configuration is stored for the genesis block.
    #[error("no chain config stored for genesis {0}")]
    MissingChainConfig(B256),
    /// A canonical hash is recorded but its header is not stored.
    #[error("canonical hash {hash} at height {number} has no stored header")]
    MissingCanonicalHeader {
        /// Block height.
        number: u64,
        /// Recorded canonical hash.
        hash: B256,
    },
}

impl OdrError {
    /// Returns the broad class of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoHeader { .. } | Self::MissingChainConfig(_) => ErrorKind::NotFound,
            Self::Retrieve(_) => ErrorKind::Transport,
            Self::Decode(_) | Self::Derive(_) => ErrorKind::Decode,
            Self::Trust(_) => ErrorKind::TrustViolation,
            Self::Storage(_) | Self::MissingCanonicalHeader { .. } => ErrorKind::Internal,
        }
    }
}
