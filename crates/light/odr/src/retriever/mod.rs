//! The retrieval façade.

use crate::{BloomTrieIndexer, OdrBackend, OdrConfig, OdrError, Request, RetrieveError};
use lumen_storage::Database;
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;

mod chain;

mod receipts;

mod bloom;

mod tx;
pub use tx::TransactionLocation;

/// Answers chain artifact queries from the local store, falling back to a
/// remote [`OdrBackend`] on misses.
///
/// Remote answers are validated against locally known trust anchors before
/// they are returned. The only write the retriever performs is the one-time
/// enrichment of a receipt set with its derived fields.
///
/// All operations take `&self`; share the retriever behind an [`Arc`] to serve
/// concurrent callers.
pub struct OdrRetriever<DB> {
    db: Arc<DB>,
    backend: Arc<dyn OdrBackend>,
    indexer: Option<Arc<dyn BloomTrieIndexer>>,
    config: OdrConfig,
}

impl<DB: Database> OdrRetriever<DB> {
    /// Creates a retriever without a bloom-trie indexer.
    pub const fn new(db: Arc<DB>, backend: Arc<dyn OdrBackend>, config: OdrConfig) -> Self {
        Self { db, backend, indexer: None, config }
    }

    /// Sets the indexer providing the bloom-trie trust boundary.
    pub fn with_indexer(mut self, indexer: Arc<dyn BloomTrieIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Returns the local store.
    pub const fn database(&self) -> &Arc<DB> {
        &self.db
    }

    /// Submits `request` to the backend and unwraps the typed payload.
    ///
    /// Resolves to [`RetrieveError::Cancelled`] as soon as `cancel` fires and
    /// to [`RetrieveError::Timeout`] once the configured timeout elapses.
    async fn submit<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, OdrError> {
        let kind = R::KIND;
        crate::inc!(counter, REMOTE_REQUESTS, "kind" => kind.as_str());
        debug!(target: "odr", %kind, "Submitting remote request");

        let retrieval = self.backend.retrieve(request.into());
        let result = match self.config.request_timeout() {
            Some(timeout) => tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(RetrieveError::Cancelled),
                result = tokio::time::timeout(timeout, retrieval) => {
                    result.unwrap_or(Err(RetrieveError::Timeout(timeout)))
                }
            },
            None => tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(RetrieveError::Cancelled),
                result = retrieval => result,
            },
        };

        let response = result.inspect_err(|err| {
            crate::inc!(counter, REMOTE_FAILURES, "kind" => kind.as_str());
            debug!(target: "odr", %kind, %err, "Remote request failed");
        })?;
        R::extract(response).map_err(|other| {
            warn!(target: "odr", expected = %kind, got = %other.kind(), "Unexpected response kind");
            RetrieveError::UnexpectedResponse { expected: kind, got: other.kind() }.into()
        })
    }
}

impl<DB: fmt::Debug> fmt::Debug for OdrRetriever<DB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdrRetriever")
            .field("db", &self.db)
            .field("indexer", &self.indexer.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BlockRequest, OdrResponse, ReceiptsRequest, RequestKind, backend::MockOdrBackend,
    };
    use alloy_primitives::{B256, Bytes};
    use lumen_storage::MemoryDatabase;
    use std::time::Duration;

    fn retriever(backend: MockOdrBackend, config: OdrConfig) -> OdrRetriever<MemoryDatabase> {
        OdrRetriever::new(Arc::new(MemoryDatabase::new()), Arc::new(backend), config)
    }

    #[tokio::test]
    async fn test_submit_returns_typed_payload() {
        let mut backend = MockOdrBackend::new();
        backend
            .expect_retrieve()
            .withf(|request| request.kind() == RequestKind::Body)
            .times(1)
            .returning(|_| Ok(OdrResponse::Body(Bytes::from_static(&[0xc0]))));
        let retriever = retriever(backend, OdrConfig::default());

        let body = retriever
            .submit(BlockRequest { hash: B256::ZERO, number: 1 }, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(body, Bytes::from_static(&[0xc0]));
    }

    #[tokio::test]
    async fn test_submit_rejects_mismatched_response() {
        let mut backend = MockOdrBackend::new();
        backend.expect_retrieve().returning(|_| Ok(OdrResponse::Bloom(vec![])));
        let retriever = retriever(backend, OdrConfig::default());

        let request =
            ReceiptsRequest { hash: B256::ZERO, number: 1, header: None, untrusted: false };
        let err = retriever.submit(request, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(
            err,
            OdrError::Retrieve(RetrieveError::UnexpectedResponse {
                expected: RequestKind::Receipts,
                got: RequestKind::Bloom,
            })
        ));
    }

    #[tokio::test]
    async fn test_submit_propagates_backend_failure() {
        let mut backend = MockOdrBackend::new();
        backend.expect_retrieve().returning(|_| Err(RetrieveError::Failed("boom".to_string())));
        let retriever = retriever(backend, OdrConfig::default());

        let err = retriever
            .submit(BlockRequest { hash: B256::ZERO, number: 1 }, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OdrError::Retrieve(RetrieveError::Failed(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_submission() {
        let mut backend = MockOdrBackend::new();
        backend.expect_retrieve().returning(|_| Ok(OdrResponse::Body(Bytes::new())));
        let retriever = retriever(backend, OdrConfig::default());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = retriever
            .submit(BlockRequest { hash: B256::ZERO, number: 1 }, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, OdrError::Retrieve(RetrieveError::Cancelled)));
    }

    #[derive(Debug)]
    struct StalledBackend;

    #[async_trait::async_trait]
    impl OdrBackend for StalledBackend {
        async fn retrieve(
            &self,
            _request: crate::OdrRequest,
        ) -> Result<OdrResponse, RetrieveError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_backend_times_out() {
        let config = OdrConfig { request_timeout: Some(250), ..Default::default() };
        let retriever =
            OdrRetriever::new(Arc::new(MemoryDatabase::new()), Arc::new(StalledBackend), config);

        let err = retriever
            .submit(BlockRequest { hash: B256::ZERO, number: 1 }, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OdrError::Retrieve(RetrieveError::Timeout(timeout))
                if timeout == Duration::from_millis(250)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_waiting() {
        let retriever = Arc::new(OdrRetriever::new(
            Arc::new(MemoryDatabase::new()),
            Arc::new(StalledBackend),
            OdrConfig::default(),
        ));
        let cancel = CancellationToken::new();

        let task = {
            let retriever = Arc::clone(&retriever);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                retriever.submit(BlockRequest { hash: B256::ZERO, number: 1 }, &cancel).await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, OdrError::Retrieve(RetrieveError::Cancelled)));
    }
}
