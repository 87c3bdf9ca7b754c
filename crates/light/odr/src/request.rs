//! Typed requests submitted over the remote channel.
//!
//! Every request kind is a variant of the closed [`OdrRequest`] enum and is
//! answered by the matching [`OdrResponse`] variant. The [`Request`] trait
//! ties each typed request to the payload it expects back.

use alloy_primitives::{B256, Bytes};
use derive_more::{Display, From};
use lumen_primitives::{Header, IndexerConfig, Receipt, TxStatus};

/// The kind of a request or response.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Block body retrieval.
    #[display("body")]
    Body,
    /// Block receipts retrieval.
    #[display("receipts")]
    Receipts,
    /// Bloom-bits retrieval.
    #[display("bloom bits")]
    Bloom,
    /// Transaction status lookup.
    #[display("tx status")]
    TxStatus,
}

impl RequestKind {
    /// Returns a short label for the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Receipts => "receipts",
            Self::Bloom => "bloom_bits",
            Self::TxStatus => "tx_status",
        }
    }
}

/// Requests the RLP body of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    /// Block hash.
    pub hash: B256,
    /// Block height.
    pub number: u64,
}

/// Requests the receipts of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptsRequest {
    /// Block hash.
    pub hash: B256,
    /// Block height.
    pub number: u64,
    /// Header the receipts are checked against, for untrusted requests.
    pub header: Option<Header>,
    /// Whether the receipts are used for inspection only and never stored.
    pub untrusted: bool,
}

/// Requests compressed bloom-bits vectors of one bit over several sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomRequest {
    /// Root of the bloom trie the answers are proven against.
    pub bloom_trie_root: B256,
    /// Index of the last trusted bloom-trie section.
    pub bloom_trie_num: u64,
    /// Hash of the block heading that section.
    pub section_head: B256,
    /// Bloom bit index.
    pub bit: u16,
    /// Bloom-bits sections to retrieve.
    pub sections: Vec<u64>,
    /// Section sizing.
    pub config: IndexerConfig,
}

/// Requests the status of transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatusRequest {
    /// Transaction hashes, answered in order.
    pub hashes: Vec<B256>,
}

/// A request submitted to an [`OdrBackend`](crate::OdrBackend).
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum OdrRequest {
    /// See [`BlockRequest`].
    Body(BlockRequest),
    /// See [`ReceiptsRequest`].
    Receipts(ReceiptsRequest),
    /// See [`BloomRequest`].
    Bloom(BloomRequest),
    /// See [`TxStatusRequest`].
    TxStatus(TxStatusRequest),
}

impl OdrRequest {
    /// Returns the kind of the request.
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Body(_) => RequestKind::Body,
            Self::Receipts(_) => RequestKind::Receipts,
            Self::Bloom(_) => RequestKind::Bloom,
            Self::TxStatus(_) => RequestKind::TxStatus,
        }
    }
}

/// The populated answer to an [`OdrRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdrResponse {
    /// RLP body.
    Body(Bytes),
    /// Receipts in transaction order.
    Receipts(Vec<Receipt>),
    /// One compressed vector per requested section, in request order.
    Bloom(Vec<Bytes>),
    /// One status per requested hash, in request order.
    TxStatus(Vec<TxStatus>),
}

impl OdrResponse {
    /// Returns the kind of the response.
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Body(_) => RequestKind::Body,
            Self::Receipts(_) => RequestKind::Receipts,
            Self::Bloom(_) => RequestKind::Bloom,
            Self::TxStatus(_) => RequestKind::TxStatus,
        }
    }
}

/// A typed request with a known response payload.
pub trait Request: Into<OdrRequest> {
    /// The payload carried by the matching response.
    type Response;

    /// The kind of the request.
    const KIND: RequestKind;

    /// Unwraps the payload, handing back responses of any other kind.
    fn extract(response: OdrResponse) -> Result<Self::Response, OdrResponse>;
}

impl Request for BlockRequest {
    type Response = Bytes;
    const KIND: RequestKind = RequestKind::Body;

    fn extract(response: OdrResponse) -> Result<Bytes, OdrResponse> {
        match response {
            OdrResponse::Body(body) => Ok(body),
            other => Err(other),
        }
    }
}

impl Request for ReceiptsRequest {
    type Response = Vec<Receipt>;
    const KIND: RequestKind = RequestKind::Receipts;

    fn extract(response: OdrResponse) -> Result<Vec<Receipt>, OdrResponse> {
        match response {
            OdrResponse::Receipts(receipts) => Ok(receipts),
            other => Err(other),
        }
    }
}

impl Request for BloomRequest {
    type Response = Vec<Bytes>;
    const KIND: RequestKind = RequestKind::Bloom;

    fn extract(response: OdrResponse) -> Result<Vec<Bytes>, OdrResponse> {
        match response {
            OdrResponse::Bloom(bits) => Ok(bits),
            other => Err(other),
        }
    }
}

impl Request for TxStatusRequest {
    type Response = Vec<TxStatus>;
    const KIND: RequestKind = RequestKind::TxStatus;

    fn extract(response: OdrResponse) -> Result<Vec<TxStatus>, OdrResponse> {
        match response {
            OdrResponse::TxStatus(statuses) => Ok(statuses),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_conversion_keeps_kind() {
        let request: OdrRequest = BlockRequest { hash: B256::ZERO, number: 1 }.into();
        assert_eq!(request.kind(), BlockRequest::KIND);

        let request: OdrRequest = TxStatusRequest { hashes: vec![] }.into();
        assert_eq!(request.kind(), TxStatusRequest::KIND);
    }

    #[test]
    fn test_extract_rejects_other_kinds() {
        let response = OdrResponse::Receipts(vec![]);
        assert_eq!(ReceiptsRequest::extract(response.clone()), Ok(vec![]));
        assert_eq!(BlockRequest::extract(response.clone()), Err(response));
    }
}
