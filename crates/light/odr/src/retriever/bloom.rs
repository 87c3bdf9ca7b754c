//! Bloom-bits retrieval within the trusted bloom trie.

use super::OdrRetriever;
use crate::{
    BloomRequest, OdrError, RequestKind, TrustViolation, TrustedSections,
    reconcile_trusted_sections,
};
use alloy_primitives::Bytes;
use lumen_storage::{
    Database,
    schema::{read_bloom_bits, read_bloom_trie_root, read_canonical_hash},
};
use tokio_util::sync::CancellationToken;

impl<DB: Database> OdrRetriever<DB> {
    /// Returns the compressed vectors of bloom bit `bit` for each of `sections`,
    /// in the order requested.
    ///
    /// Sections stored locally are served directly. The rest are fetched in
    /// a single request, which fails with
    /// [`TrustViolation::NoTrustedBloomTrie`] if any of them lies beyond the
    /// trusted bloom trie.
    pub async fn bloom_bits(
        &self,
        bit: u16,
        sections: &[u64],
        cancel: &CancellationToken,
    ) -> Result<Vec<Bytes>, OdrError> {
        let trusted = self.trusted_sections()?;
        let indexer = self.config.indexer;

        let mut result = vec![Bytes::new(); sections.len()];
        let mut missing = Vec::new();
        let mut slots = Vec::new();
        for (slot, &section) in sections.iter().enumerate() {
            let head = read_canonical_hash(self.db.as_ref(), indexer.bloom_section_head(section))?
                .unwrap_or_default();
            if let Some(bits) = read_bloom_bits(self.db.as_ref(), bit, section, head)? {
                crate::inc!(counter, LOCAL_HITS, "artifact" => "bloom_bits");
                result[slot] = bits.into();
                continue;
            }
            crate::inc!(counter, LOCAL_MISSES, "artifact" => "bloom_bits");
            if section >= trusted.count {
                warn!(
                    target: "odr",
                    section,
                    trusted = trusted.count,
                    "Bloom bits requested beyond trusted bloom trie"
                );
                return Err(TrustViolation::NoTrustedBloomTrie { section, trusted: trusted.count }
                    .into());
            }
            missing.push(section);
            slots.push(slot);
        }
        if missing.is_empty() {
            return Ok(result);
        }

        let root = read_bloom_trie_root(self.db.as_ref(), trusted.count - 1, trusted.head_hash)?
            .unwrap_or_default();
        let request = BloomRequest {
            bloom_trie_root: root,
            bloom_trie_num: trusted.count - 1,
            section_head: trusted.head_hash,
            bit,
            sections: missing,
            config: indexer,
        };
        debug!(target: "odr", bit, missing = slots.len(), "Fetching bloom bits");
        let vectors = self.submit(request, cancel).await?;
        if vectors.len() != slots.len() {
            warn!(
                target: "odr",
                expected = slots.len(),
                got = vectors.len(),
                "Bloom bits response count mismatch"
            );
            return Err(TrustViolation::ResponseCountMismatch {
                kind: RequestKind::Bloom,
                expected: slots.len(),
                got: vectors.len(),
            }
            .into());
        }
        for (slot, bits) in slots.into_iter().zip(vectors) {
            result[slot] = bits;
        }
        Ok(result)
    }

    /// Returns the indexer's trust boundary, rolled back to agree with the
    /// local canonical chain. Without an indexer no section is trusted.
    fn trusted_sections(&self) -> Result<TrustedSections, OdrError> {
        let Some(indexer) = self.indexer.as_deref() else {
            return Ok(TrustedSections::default());
        };
        let presumed = indexer.sections();
        let reconciled = reconcile_trusted_sections(
            presumed,
            self.config.indexer.bloom_trie_size,
            |number| read_canonical_hash(self.db.as_ref(), number),
            |section| indexer.section_head(section),
        )?;
        if reconciled.count < presumed.count {
            crate::add!(counter, TRUST_ROLLBACKS, presumed.count - reconciled.count);
            warn!(
                target: "odr",
                from = presumed.count,
                to = reconciled.count,
                "Rolled back trusted bloom trie sections"
            );
        }
        Ok(reconciled)
    }
}
