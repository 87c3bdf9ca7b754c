//! The remote channel the retriever falls back to on local misses.

use crate::{OdrRequest, OdrResponse, RetrieveError};
use async_trait::async_trait;

/// Serves [`OdrRequest`]s from remote peers.
///
/// Implementations perform the transport and any proof checking of the
/// payload. Cancellation and timeouts are applied by the caller, which drops
/// the returned future.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OdrBackend: Send + Sync {
    /// Submits a request and waits for its populated response.
    async fn retrieve(&self, request: OdrRequest) -> Result<OdrResponse, RetrieveError>;
}

/// A backend without peers.
///
/// Every request fails with [`RetrieveError::NoPeers`], so a retriever built
/// on it only answers from the local store.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

#[async_trait]
impl OdrBackend for OfflineBackend {
    async fn retrieve(&self, request: OdrRequest) -> Result<OdrResponse, RetrieveError> {
        trace!(target: "odr", kind = %request.kind(), "Offline backend rejecting request");
        Err(RetrieveError::NoPeers)
    }
}
