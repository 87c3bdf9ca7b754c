//! Metrics for on-demand retrieval.

/// Container for the metric identifiers of the retriever.
#[derive(Debug, Clone, Copy)]
pub struct Metrics;

impl Metrics {
    /// Counter of artifacts served from the local store, labelled by artifact.
    pub const LOCAL_HITS: &'static str = "lumen_odr_local_hits";

    /// Counter of local store misses, labelled by artifact.
    pub const LOCAL_MISSES: &'static str = "lumen_odr_local_misses";

    /// Counter of requests submitted to the backend, labelled by kind.
    pub const REMOTE_REQUESTS: &'static str = "lumen_odr_remote_requests";

    /// Counter of failed backend requests, labelled by kind.
    pub const REMOTE_FAILURES: &'static str = "lumen_odr_remote_failures";

    /// Counter of receipts whose derived fields were filled in.
    pub const RECEIPTS_DERIVED: &'static str = "lumen_odr_receipts_derived";

    /// Counter of bloom-trie sections dropped from the trust boundary.
    pub const TRUST_ROLLBACKS: &'static str = "lumen_odr_trust_rollbacks";
}

/// Describes every metric the retriever records.
///
/// Call once at startup when exporting to an observer such as Prometheus.
/// Does nothing without the `metrics` feature.
pub fn describe_odr_metrics() {
    #[cfg(feature = "metrics")]
    {
        metrics::describe_counter!(
            Metrics::LOCAL_HITS,
            metrics::Unit::Count,
            "Chain artifacts served from the local store"
        );
        metrics::describe_counter!(
            Metrics::LOCAL_MISSES,
            metrics::Unit::Count,
            "Chain artifacts missing from the local store"
        );
        metrics::describe_counter!(
            Metrics::REMOTE_REQUESTS,
            metrics::Unit::Count,
            "Requests submitted to remote peers"
        );
        metrics::describe_counter!(
            Metrics::REMOTE_FAILURES,
            metrics::Unit::Count,
            "Requests to remote peers that failed"
        );
        metrics::describe_counter!(
            Metrics::RECEIPTS_DERIVED,
            metrics::Unit::Count,
            "Receipts enriched with derived fields and written back"
        );
        metrics::describe_counter!(
            Metrics::TRUST_ROLLBACKS,
            metrics::Unit::Count,
            "Bloom trie sections rolled back after a reorg"
        );
    }
}
