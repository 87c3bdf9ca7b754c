//! Canonical hashes, headers, bodies and blocks.

use super::OdrRetriever;
use crate::{BlockRequest, OdrError};
use alloy_primitives::{B256, Bytes};
use alloy_rlp::Decodable;
use lumen_primitives::{Block, Body, Header};
use lumen_storage::{
    Database,
    schema::{read_body_rlp, read_canonical_hash, read_header},
};
use tokio_util::sync::CancellationToken;

impl<DB: Database> OdrRetriever<DB> {
    /// Returns the canonical hash at `number`, or `None` if it is unknown.
    ///
    /// Falls back to the canonical header when no hash is recorded. Only the
    /// local store is consulted.
    pub async fn canonical_hash(
        &self,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Option<B256>, OdrError> {
        if let Some(hash) = read_canonical_hash(self.db.as_ref(), number)? {
            return Ok(Some(hash));
        }
        Ok(self.header_by_number(number, cancel).await?.map(|header| header.hash_slow()))
    }

    /// Returns the canonical header at `number`, or `None` if no canonical
    /// hash is recorded.
    ///
    /// A recorded canonical hash without a stored header is reported as
    /// [`OdrError::MissingCanonicalHeader`].
    pub async fn header_by_number(
        &self,
        number: u64,
        _cancel: &CancellationToken,
    ) -> Result<Option<Header>, OdrError> {
        let Some(hash) = read_canonical_hash(self.db.as_ref(), number)? else {
            debug!(target: "odr", number, "No canonical hash recorded");
            return Ok(None);
        };
        match read_header(self.db.as_ref(), hash, number)? {
            Some(header) => Ok(Some(header)),
            None => {
                error!(target: "odr", number, %hash, "Canonical hash recorded without header");
                Err(OdrError::MissingCanonicalHeader { number, hash })
            }
        }
    }

    /// Returns the RLP body of the block, fetching it remotely on a local miss.
    ///
    /// The payload is returned exactly as stored or received.
    pub async fn body_rlp(
        &self,
        hash: B256,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Bytes, OdrError> {
        if let Some(data) = read_body_rlp(self.db.as_ref(), hash, number)? {
            crate::inc!(counter, LOCAL_HITS, "artifact" => "body");
            return Ok(data.into());
        }
        crate::inc!(counter, LOCAL_MISSES, "artifact" => "body");
        debug!(target: "odr", %hash, number, "Body not stored locally");
        self.submit(BlockRequest { hash, number }, cancel).await
    }

    /// Returns the decoded body of the block.
    pub async fn body(
        &self,
        hash: B256,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Body, OdrError> {
        let data = self.body_rlp(hash, number, cancel).await?;
        Body::decode(&mut data.as_ref()).map_err(|err| {
            warn!(target: "odr", %hash, number, %err, "Invalid block body");
            err.into()
        })
    }

    /// Assembles the block from the locally stored header and its body.
    ///
    /// Headers are never fetched remotely: a missing header is reported as
    /// [`OdrError::NoHeader`].
    pub async fn block(
        &self,
        hash: B256,
        number: u64,
        cancel: &CancellationToken,
    ) -> Result<Block, OdrError> {
        let Some(header) = read_header(self.db.as_ref(), hash, number)? else {
            debug!(target: "odr", %hash, number, "Header not stored locally");
            return Err(OdrError::NoHeader { hash, number });
        };
        let body = self.body(hash, number, cancel).await?;
        Ok(Block::new(header, body))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        OdrBackend, OdrConfig, OdrError, OdrResponse, OdrRetriever, RequestKind, RetrieveError,
        backend::MockOdrBackend, test_utils::ChainFixture,
    };
    use alloy_primitives::{B256, Bytes};
    use lumen_primitives::{Body, ChainConfig};
    use lumen_storage::{Batcher, KeyValueWriter, MemoryDatabase, WriteBatch, schema};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn offline(db: MemoryDatabase) -> OdrRetriever<MemoryDatabase> {
        let mut backend = MockOdrBackend::new();
        backend.expect_retrieve().never();
        OdrRetriever::new(Arc::new(db), Arc::new(backend), OdrConfig::default())
    }

    fn with_backend(
        db: MemoryDatabase,
        backend: impl OdrBackend + 'static,
    ) -> OdrRetriever<MemoryDatabase> {
        OdrRetriever::new(Arc::new(db), Arc::new(backend), OdrConfig::default())
    }

    #[tokio::test]
    async fn test_header_by_number_returns_canonical_header() {
        let mut chain = ChainFixture::new(ChainConfig::new(1)).unwrap();
        let block = chain.push_block(vec![]).unwrap();
        let retriever = offline(chain.database());
        let cancel = CancellationToken::new();

        let header = retriever.header_by_number(1, &cancel).await.unwrap();
        assert_eq!(header, Some(block.header.clone()));
        assert_eq!(retriever.canonical_hash(1, &cancel).await.unwrap(), Some(block.hash()));
        assert_eq!(retriever.header_by_number(2, &cancel).await.unwrap(), None);
        assert_eq!(retriever.canonical_hash(2, &cancel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_canonical_hash_without_header_is_inconsistent() {
        let db = MemoryDatabase::new();
        let hash = B256::repeat_byte(0x42);
        let mut batch = db.new_batch();
        schema::write_canonical_hash(&mut batch, 9, hash);
        batch.write().unwrap();
        let retriever = offline(db);

        let err = retriever.header_by_number(9, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(
            err,
            OdrError::MissingCanonicalHeader { number: 9, hash: h } if h == hash
        ));
    }

    #[tokio::test]
    async fn test_local_body_is_returned_verbatim() {
        let mut chain = ChainFixture::new(ChainConfig::new(1)).unwrap();
        let tx = chain.transfer(0);
        let block = chain.push_block(vec![tx]).unwrap();
        let retriever = offline(chain.database());
        let cancel = CancellationToken::new();

        let rlp = retriever.body_rlp(block.hash(), 1, &cancel).await.unwrap();
        let assembled = retriever.block(block.hash(), 1, &cancel).await.unwrap();
        assert_eq!(assembled, block);
        assert_eq!(assembled.body.encoded(), rlp.to_vec());
    }

    #[tokio::test]
    async fn test_body_miss_fetches_remotely() {
        let body = Body { transactions: vec![Default::default()], ..Default::default() };
        let encoded = Bytes::from(body.encoded());
        let mut backend = MockOdrBackend::new();
        let response = encoded.clone();
        backend
            .expect_retrieve()
            .withf(|request| request.kind() == RequestKind::Body)
            .times(1)
            .returning(move |_| Ok(OdrResponse::Body(response.clone())));
        let db = MemoryDatabase::new();
        let retriever = with_backend(db.clone(), backend);

        let hash = B256::repeat_byte(1);
        let fetched = retriever.body(hash, 3, &CancellationToken::new()).await.unwrap();
        assert_eq!(fetched, body);
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_error() {
        let db = MemoryDatabase::new();
        let hash = B256::repeat_byte(1);
        let mut batch = db.new_batch();
        schema::write_body_rlp(&mut batch, hash, 2, &[0xff, 0x00]);
        batch.write().unwrap();
        let retriever = offline(db);

        let err = retriever.body(hash, 2, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, OdrError::Decode(_)));
    }

    #[tokio::test]
    async fn test_block_requires_local_header() {
        let db = MemoryDatabase::new();
        let hash = B256::repeat_byte(7);
        db.put(b"unrelated", b"entry").unwrap();
        let retriever = offline(db);

        let err = retriever.block(hash, 4, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, OdrError::NoHeader { number: 4, .. }));
    }

    #[tokio::test]
    async fn test_body_miss_without_peers() {
        let retriever = with_backend(MemoryDatabase::new(), crate::OfflineBackend);
        let err = retriever
            .body_rlp(B256::ZERO, 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OdrError::Retrieve(RetrieveError::NoPeers)));
    }
}
