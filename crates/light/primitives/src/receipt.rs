//! Receipts, logs, and the derivation of their block-context fields.

use crate::{ChainConfig, Transaction};
use alloy_primitives::{Address, B256, Bloom, Bytes};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use thiserror::Error;

/// Receipt status of a transaction that reverted.
pub const RECEIPT_STATUS_FAILED: u64 = 0;

/// Receipt status of a transaction that executed successfully.
pub const RECEIPT_STATUS_SUCCESSFUL: u64 = 1;

/// A log emitted by a transaction.
///
/// Only `address`, `topics` and `data` are consensus fields; the rest are
/// filled in by [`derive_receipt_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<B256>,
    /// Unindexed payload.
    pub data: Bytes,
    /// Height of the containing block.
    pub block_number: u64,
    /// Hash of the emitting transaction.
    pub tx_hash: B256,
    /// Position of the emitting transaction in the block.
    pub tx_index: u64,
    /// Hash of the containing block.
    pub block_hash: B256,
    /// Position of the log among all logs of the block.
    pub index: u64,
    /// Whether the log was reverted by a reorganisation.
    pub removed: bool,
}

/// The receipt of a single transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Receipt {
    /// Execution status, see [`RECEIPT_STATUS_SUCCESSFUL`].
    pub status: u64,
    /// Gas used in the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Bloom filter over the receipt's logs.
    pub logs_bloom: Bloom,
    /// Logs emitted by the transaction.
    pub logs: Vec<Log>,
    /// Hash of the transaction. Zero until derived.
    pub tx_hash: B256,
    /// Address of the created contract, zero for calls.
    pub contract_address: Address,
    /// Gas used by this transaction alone.
    pub gas_used: u64,
    /// Hash of the containing block.
    pub block_hash: B256,
    /// Height of the containing block.
    pub block_number: u64,
    /// Position of the transaction in the block.
    pub transaction_index: u64,
}

impl Receipt {
    /// Returns `true` once the block-context fields have been filled in.
    pub fn is_derived(&self) -> bool {
        self.tx_hash != B256::ZERO
    }
}

/// Returns `true` if the receipt set still lacks its block-context fields.
///
/// Only the first receipt is inspected: sets are derived as a whole.
pub fn needs_derivation(receipts: &[Receipt]) -> bool {
    receipts.first().is_some_and(|receipt| !receipt.is_derived())
}

/// An error raised when a receipt set cannot be matched with its block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// The number of receipts differs from the number of transactions.
    #[error("receipt count {receipts} does not match transaction count {transactions}")]
    CountMismatch {
        /// Number of receipts.
        receipts: usize,
        /// Number of transactions.
        transactions: usize,
    },
    /// A transaction belongs to a different chain.
    #[error("transaction {index} has chain id {got}, expected {expected}")]
    ChainIdMismatch {
        /// Position of the transaction.
        index: usize,
        /// Chain id of the configuration.
        expected: u64,
        /// Chain id of the transaction.
        got: u64,
    },
    /// Cumulative gas decreased between two consecutive receipts.
    #[error("cumulative gas used decreases at receipt {0}")]
    CumulativeGasDecreased(usize),
}

/// Fills in the block-context fields of `receipts` from the block they belong to.
///
/// The set is validated before anything is written, so on error the receipts
/// are left untouched. Applying the derivation twice yields the same result.
pub fn derive_receipt_fields(
    receipts: &mut [Receipt],
    config: &ChainConfig,
    block_hash: B256,
    block_number: u64,
    transactions: &[Transaction],
) -> Result<(), DeriveError> {
    if receipts.len() != transactions.len() {
        return Err(DeriveError::CountMismatch {
            receipts: receipts.len(),
            transactions: transactions.len(),
        });
    }
    let mut previous = 0;
    for (index, (receipt, tx)) in receipts.iter().zip(transactions).enumerate() {
        if tx.chain_id != config.chain_id {
            return Err(DeriveError::ChainIdMismatch {
                index,
                expected: config.chain_id,
                got: tx.chain_id,
            });
        }
        if receipt.cumulative_gas_used < previous {
            return Err(DeriveError::CumulativeGasDecreased(index));
        }
        previous = receipt.cumulative_gas_used;
    }

    let mut previous = 0;
    let mut log_index = 0;
    for (index, (receipt, tx)) in receipts.iter_mut().zip(transactions).enumerate() {
        let tx_hash = tx.hash();
        receipt.tx_hash = tx_hash;
        receipt.contract_address = tx.created_address().unwrap_or_default();
        receipt.gas_used = receipt.cumulative_gas_used - previous;
        receipt.block_hash = block_hash;
        receipt.block_number = block_number;
        receipt.transaction_index = index as u64;
        previous = receipt.cumulative_gas_used;

        for log in &mut receipt.logs {
            log.block_number = block_number;
            log.block_hash = block_hash;
            log.tx_hash = tx_hash;
            log.tx_index = index as u64;
            log.index = log_index;
            log_index += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{TxKind, address};
    use rstest::rstest;

    fn receipt(cumulative_gas_used: u64, logs: usize) -> Receipt {
        Receipt {
            status: RECEIPT_STATUS_SUCCESSFUL,
            cumulative_gas_used,
            logs: vec![Log::default(); logs],
            ..Default::default()
        }
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                chain_id: 1,
                nonce: 0,
                to: TxKind::Call(Address::repeat_byte(0x11)),
                ..Default::default()
            },
            Transaction {
                chain_id: 1,
                nonce: 0,
                to: TxKind::Create,
                from: address!("0x6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0"),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_derive_fills_block_context() {
        let txs = transactions();
        let mut receipts = vec![receipt(21_000, 1), receipt(71_000, 2)];
        let hash = B256::repeat_byte(0xab);
        assert!(needs_derivation(&receipts));

        derive_receipt_fields(&mut receipts, &ChainConfig::new(1), hash, 5, &txs).unwrap();

        assert!(!needs_derivation(&receipts));
        assert_eq!(receipts[0].tx_hash, txs[0].hash());
        assert_eq!(receipts[1].tx_hash, txs[1].hash());
        assert_eq!(receipts[0].gas_used, 21_000);
        assert_eq!(receipts[1].gas_used, 50_000);
        assert_eq!(receipts[0].contract_address, Address::ZERO);
        assert_eq!(
            receipts[1].contract_address,
            address!("0xcd234a471b72ba2f1ccf0a70fcaba648a5eecd8d")
        );
        assert_eq!(receipts[1].transaction_index, 1);
        assert!(receipts.iter().all(|r| r.block_hash == hash && r.block_number == 5));

        let indices: Vec<_> =
            receipts.iter().flat_map(|r| r.logs.iter().map(|l| l.index)).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(receipts[1].logs[1].tx_hash, txs[1].hash());
        assert_eq!(receipts[1].logs[0].tx_index, 1);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let txs = transactions();
        let mut once = vec![receipt(21_000, 1), receipt(71_000, 0)];
        let config = ChainConfig::new(1);
        derive_receipt_fields(&mut once, &config, B256::ZERO, 5, &txs).unwrap();
        let mut twice = once.clone();
        derive_receipt_fields(&mut twice, &config, B256::ZERO, 5, &txs).unwrap();
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case::too_few(
        vec![receipt(1, 0)],
        DeriveError::CountMismatch { receipts: 1, transactions: 2 }
    )]
    #[case::gas_decreases(
        vec![receipt(5, 0), receipt(4, 0)],
        DeriveError::CumulativeGasDecreased(1)
    )]
    fn test_derive_rejects_mismatched_sets(
        #[case] mut receipts: Vec<Receipt>,
        #[case] expected: DeriveError,
    ) {
        let before = receipts.clone();
        let config = ChainConfig::new(1);
        let err = derive_receipt_fields(&mut receipts, &config, B256::ZERO, 1, &transactions())
            .unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(receipts, before);
    }

    #[test]
    fn test_derive_rejects_foreign_chain() {
        let mut receipts = vec![receipt(1, 0), receipt(2, 0)];
        let config = ChainConfig::new(7);
        let err = derive_receipt_fields(&mut receipts, &config, B256::ZERO, 1, &transactions())
            .unwrap_err();
        assert_eq!(err, DeriveError::ChainIdMismatch { index: 0, expected: 7, got: 1 });
    }

    #[test]
    fn test_empty_set_needs_no_derivation() {
        assert!(!needs_derivation(&[]));
    }
}
