//! The transaction type carried in block bodies.

use alloy_primitives::{Address, B256, Bytes, TxKind, U256, keccak256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A signed transaction as it appears in a block body.
///
/// The sender is committed in the signed payload, so contract addresses can
/// be derived without signature recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Transaction {
    /// Replay-protection domain of the transaction.
    pub chain_id: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Price paid per unit of gas.
    pub gas_price: u128,
    /// Maximum gas the transaction may consume.
    pub gas_limit: u64,
    /// Call target, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Value transferred.
    pub value: U256,
    /// Call data or init code.
    pub input: Bytes,
    /// Sender of the transaction.
    pub from: Address,
    /// Signature over the payload.
    pub signature: Bytes,
}

impl Transaction {
    /// Returns the keccak256 hash of the RLP encoded transaction.
    pub fn hash(&self) -> B256 {
        keccak256(alloy_rlp::encode(self))
    }

    /// Returns `true` if the transaction deploys a contract.
    pub const fn is_create(&self) -> bool {
        self.to.is_create()
    }

    /// Returns the address of the contract deployed by this transaction, if any.
    pub fn created_address(&self) -> Option<Address> {
        self.is_create().then(|| self.from.create(self.nonce))
    }
}
