//! Fixtures for exercising the retriever without a network.

use crate::{OdrBackend, OdrRequest, OdrResponse, RetrieveError};
use alloy_primitives::{Address, B256, TxKind, U256};
use async_trait::async_trait;
use lumen_primitives::{Block, Body, ChainConfig, Header, Log, Receipt, Transaction};
use lumen_storage::{Batcher, MemoryDatabase, StorageError, WriteBatch, schema};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A backend that records every request and answers from a queue.
///
/// Once the queue is drained, requests fail with [`RetrieveError::NoPeers`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    requests: Mutex<Vec<OdrRequest>>,
    responses: Mutex<VecDeque<Result<OdrResponse, RetrieveError>>>,
}

impl RecordingBackend {
    /// Creates a backend with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn respond(&self, response: OdrResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queues a failure.
    pub fn fail(&self, err: RetrieveError) {
        lock(&self.responses).push_back(Err(err));
    }

    /// Returns every request received so far, in order.
    pub fn requests(&self) -> Vec<OdrRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the number of requests received so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl OdrBackend for RecordingBackend {
    async fn retrieve(&self, request: OdrRequest) -> Result<OdrResponse, RetrieveError> {
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().unwrap_or(Err(RetrieveError::NoPeers))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A canonical chain written into a [`MemoryDatabase`].
///
/// The genesis block and the chain configuration are stored on creation.
#[derive(Debug)]
pub struct ChainFixture {
    db: MemoryDatabase,
    config: ChainConfig,
    blocks: Vec<Block>,
}

impl ChainFixture {
    /// Sender of every fixture transaction.
    pub const SENDER: Address = Address::repeat_byte(0xaa);

    /// Recipient of fixture transfers.
    pub const RECIPIENT: Address = Address::repeat_byte(0xbb);

    /// Creates a chain holding only its genesis block.
    pub fn new(config: ChainConfig) -> Result<Self, StorageError> {
        let mut fixture = Self { db: MemoryDatabase::new(), config, blocks: Vec::new() };
        let genesis = fixture.push_block(Vec::new())?;

        let mut batch = fixture.db.new_batch();
        schema::write_chain_config(&mut batch, genesis.hash(), &config)?;
        batch.write()?;
        Ok(fixture)
    }

    /// Returns a handle to the underlying store.
    pub fn database(&self) -> MemoryDatabase {
        self.db.clone()
    }

    /// Returns the canonical block at `number`.
    pub fn block(&self, number: u64) -> Option<&Block> {
        self.blocks.get(usize::try_from(number).ok()?)
    }

    /// Builds a value transfer from [`Self::SENDER`].
    pub fn transfer(&self, nonce: u64) -> Transaction {
        Transaction {
            chain_id: self.config.chain_id,
            nonce,
            gas_price: 1,
            gas_limit: 21_000,
            to: TxKind::Call(Self::RECIPIENT),
            value: U256::from_limbs([1, 0, 0, 0]),
            input: alloy_primitives::Bytes::new(),
            from: Self::SENDER,
            signature: alloy_primitives::Bytes::new(),
        }
    }

    /// Builds a contract creation from [`Self::SENDER`].
    pub fn create(&self, nonce: u64) -> Transaction {
        let mut tx = self.transfer(nonce);
        tx.to = TxKind::Create;
        tx.gas_limit = 100_000;
        tx
    }

    /// Appends a canonical block holding `transactions` and stores its
    /// header, canonical hash and body.
    pub fn push_block(&mut self, transactions: Vec<Transaction>) -> Result<Block, StorageError> {
        let number = self.blocks.len() as u64;
        let header = Header {
            parent_hash: self.blocks.last().map(Block::hash).unwrap_or_default(),
            number,
            gas_limit: 30_000_000,
            timestamp: number * 12,
            ..Default::default()
        };
        let block = Block::new(header, Body { transactions, ..Default::default() });
        let hash = block.hash();

        let mut batch = self.db.new_batch();
        schema::write_header(&mut batch, &block.header);
        schema::write_canonical_hash(&mut batch, number, hash);
        schema::write_body(&mut batch, hash, number, &block.body);
        batch.write()?;

        self.blocks.push(block.clone());
        Ok(block)
    }

    /// Appends `count` empty blocks.
    pub fn push_empty_blocks(&mut self, count: u64) -> Result<(), StorageError> {
        for _ in 0..count {
            self.push_block(Vec::new())?;
        }
        Ok(())
    }
}

/// Builds receipts for `transactions` as a peer serves them: consensus fields
/// only, one log per transaction, 21000 gas each.
pub fn underived_receipts(transactions: &[Transaction]) -> Vec<Receipt> {
    transactions
        .iter()
        .enumerate()
        .map(|(index, tx)| Receipt {
            status: lumen_primitives::RECEIPT_STATUS_SUCCESSFUL,
            cumulative_gas_used: 21_000 * (index as u64 + 1),
            logs: vec![Log {
                address: tx.to.to().copied().unwrap_or_default(),
                topics: vec![B256::with_last_byte(index as u8)],
                ..Default::default()
            }],
            ..Default::default()
        })
        .collect()
}
