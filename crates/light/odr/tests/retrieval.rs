//! End-to-end retrieval against an in-memory chain and a recording backend.

use alloy_primitives::{B256, Bytes};
use lumen_odr::{
    BloomRequest, CheckpointIndexer, OdrConfig, OdrError, OdrRequest, OdrResponse, OdrRetriever,
    TrustViolation,
    test_utils::{ChainFixture, RecordingBackend, underived_receipts},
};
use lumen_primitives::{ChainConfig, IndexerConfig, TrustedCheckpoint, needs_derivation};
use lumen_storage::{Batcher, MemoryDatabase, WriteBatch, schema};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn retriever(
    db: MemoryDatabase,
    config: OdrConfig,
) -> (Arc<RecordingBackend>, OdrRetriever<MemoryDatabase>) {
    let backend = Arc::new(RecordingBackend::new());
    (backend.clone(), OdrRetriever::new(Arc::new(db), backend, config))
}

#[tokio::test]
async fn receipts_are_derived_and_persisted() {
    let mut chain = ChainFixture::new(ChainConfig::new(1)).unwrap();
    chain.push_empty_blocks(4).unwrap();
    let txs = vec![chain.transfer(0), chain.create(1)];
    let block = chain.push_block(txs.clone()).unwrap();
    let db = chain.database();
    assert!(!schema::has_receipts(&db, block.hash(), 5).unwrap());

    let (backend, retriever) = retriever(db.clone(), OdrConfig::default());
    backend.respond(OdrResponse::Receipts(underived_receipts(&txs)));
    let cancel = CancellationToken::new();

    let receipts = retriever.block_receipts(block.hash(), 5, &cancel).await.unwrap();
    assert_eq!(receipts.len(), 2);
    assert!(!needs_derivation(&receipts));
    for (index, (receipt, tx)) in receipts.iter().zip(&txs).enumerate() {
        assert_eq!(receipt.tx_hash, tx.hash());
        assert_eq!(receipt.block_number, 5);
        assert_eq!(receipt.transaction_index, index as u64);
        assert_eq!(receipt.gas_used, 21_000);
    }
    assert_eq!(receipts[1].contract_address, ChainFixture::SENDER.create(1));

    let stored = schema::read_raw_receipts(&db, block.hash(), 5).unwrap().unwrap();
    assert_eq!(stored, receipts);

    // The second call is served locally and writes nothing.
    let entries = db.len();
    let again = retriever.block_receipts(block.hash(), 5, &cancel).await.unwrap();
    assert_eq!(again, receipts);
    assert_eq!(backend.request_count(), 1);
    assert_eq!(db.len(), entries);
}

#[tokio::test]
async fn bloom_bits_merge_local_and_remote_sections() {
    let config = OdrConfig { indexer: IndexerConfig::TEST, ..Default::default() };
    let db = MemoryDatabase::new();
    let checkpoint = TrustedCheckpoint {
        section_index: 11,
        section_head: B256::repeat_byte(0x0c),
        ..Default::default()
    };
    let indexer = CheckpointIndexer::new(checkpoint.clone(), IndexerConfig::TEST);

    let section_head = B256::repeat_byte(0x0a);
    let mut batch = db.new_batch();
    let section_10_head = IndexerConfig::TEST.bloom_section_head(10);
    schema::write_canonical_hash(&mut batch, section_10_head, section_head);
    schema::write_bloom_bits(&mut batch, 3, 10, section_head, &[0x10]);
    schema::write_bloom_trie_root(&mut batch, 11, checkpoint.section_head, B256::repeat_byte(0xbb));
    batch.write().unwrap();

    let (backend, retriever) = retriever(db, config);
    let retriever = retriever.with_indexer(Arc::new(indexer));
    backend.respond(OdrResponse::Bloom(vec![Bytes::from_static(&[0x11])]));

    let bits = retriever.bloom_bits(3, &[10, 11], &CancellationToken::new()).await.unwrap();
    assert_eq!(bits, vec![Bytes::from_static(&[0x10]), Bytes::from_static(&[0x11])]);
    assert_eq!(
        backend.requests(),
        vec![OdrRequest::Bloom(BloomRequest {
            bloom_trie_root: B256::repeat_byte(0xbb),
            bloom_trie_num: 11,
            section_head: checkpoint.section_head,
            bit: 3,
            sections: vec![11],
            config: IndexerConfig::TEST,
        })]
    );

    let err = retriever.bloom_bits(3, &[12], &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(
        err,
        OdrError::Trust(TrustViolation::NoTrustedBloomTrie { section: 12, trusted: 12 })
    ));
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn transaction_lookup_validates_against_local_chain() {
    let mut chain = ChainFixture::new(ChainConfig::new(5)).unwrap();
    let tx = chain.transfer(0);
    let block = chain.push_block(vec![tx.clone()]).unwrap();
    let (backend, retriever) = retriever(chain.database(), OdrConfig::default());
    let cancel = CancellationToken::new();

    backend.respond(OdrResponse::TxStatus(vec![lumen_primitives::TxStatus::included(
        lumen_primitives::TxLookupEntry { block_hash: block.hash(), block_number: 1, index: 0 },
    )]));
    let location = retriever.transaction(tx.hash(), &cancel).await.unwrap().unwrap();
    assert_eq!(location.transaction, tx);
    assert_eq!(location.block_hash, block.hash());

    let sibling = B256::repeat_byte(0x5a);
    backend.respond(OdrResponse::TxStatus(vec![lumen_primitives::TxStatus::included(
        lumen_primitives::TxLookupEntry { block_hash: sibling, block_number: 1, index: 0 },
    )]));
    let err = retriever.transaction(tx.hash(), &cancel).await.unwrap_err();
    assert!(matches!(err, OdrError::Trust(TrustViolation::NonCanonicalBlock { .. })));
}

#[tokio::test]
async fn concurrent_callers_share_one_retriever() {
    let mut chain = ChainFixture::new(ChainConfig::new(1)).unwrap();
    let tx = chain.transfer(0);
    let block = chain.push_block(vec![tx.clone()]).unwrap();
    let (backend, retriever) = retriever(chain.database(), OdrConfig::default());
    for _ in 0..2 {
        backend.respond(OdrResponse::Receipts(underived_receipts(&[tx.clone()])));
    }
    let retriever = Arc::new(retriever);

    let tasks: Vec<_> = (0..2)
        .map(|_| {
            let retriever = Arc::clone(&retriever);
            let hash = block.hash();
            tokio::spawn(async move {
                retriever.block_receipts(hash, 1, &CancellationToken::new()).await
            })
        })
        .collect();
    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap().unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert!(backend.request_count() >= 1);
    let stored = schema::read_raw_receipts(&chain.database(), block.hash(), 1).unwrap();
    assert_eq!(stored.as_ref(), Some(&results[0]));
}
