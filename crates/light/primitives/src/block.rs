//! Block bodies and assembled blocks.

use crate::Transaction;
use alloy_consensus::Header;
use alloy_primitives::{Address, B256, Bytes};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A committee signature over a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockSign {
    /// Height of the signed block.
    pub fast_height: u64,
    /// Hash of the signed block.
    pub fast_hash: B256,
    /// Vote result.
    pub result: u32,
    /// Raw signature bytes.
    pub sign: Bytes,
}

/// A committee membership record attached to a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CommitteeMember {
    /// Reward address of the member.
    pub coinbase: Address,
    /// Public key of the member.
    pub public_key: Bytes,
    /// Membership flag.
    pub flag: u32,
    /// Member type.
    pub member_type: u32,
}

/// The body of a block: its transactions plus committee signatures and records.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    /// Transactions in execution order.
    pub transactions: Vec<Transaction>,
    /// Committee signatures over the block.
    pub signs: Vec<BlockSign>,
    /// Committee membership records.
    pub infos: Vec<CommitteeMember>,
}

impl Body {
    /// Returns the RLP encoding of the body.
    pub fn encoded(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }
}

/// A block assembled from a header and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// The block header.
    pub header: Header,
    /// The block body.
    pub body: Body,
}

impl Block {
    /// Assembles a block from its header and body.
    pub const fn new(header: Header, body: Body) -> Self {
        Self { header, body }
    }

    /// Returns the block hash.
    pub fn hash(&self) -> B256 {
        self.header.hash_slow()
    }

    /// Returns the block height.
    pub const fn number(&self) -> u64 {
        self.header.number
    }

    /// Returns the transactions of the block.
    pub fn transactions(&self) -> &[Transaction] {
        &self.body.transactions
    }
}
