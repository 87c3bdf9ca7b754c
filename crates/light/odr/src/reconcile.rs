//! Rolling back the trust boundary after reorganisations.

use crate::TrustedSections;
use alloy_primitives::B256;

/// Shrinks `presumed` until its head agrees with the canonical chain.
///
/// `canonical` returns the local canonical hash at a height, `None` when
/// unknown; `section_head` returns the indexer's head hash of a section.
/// A head whose canonical hash is unknown is accepted, since a boundary
/// injected from a checkpoint precedes any local canonical data. While the
/// head disagrees, the count is decremented and the head moves to the last
/// block of the previous bloom-trie section. A count of zero is returned with
/// a zero head.
pub fn reconcile_trusted_sections<E>(
    presumed: TrustedSections,
    bloom_trie_size: u64,
    mut canonical: impl FnMut(u64) -> Result<Option<B256>, E>,
    mut section_head: impl FnMut(u64) -> B256,
) -> Result<TrustedSections, E> {
    let mut sections = presumed;
    while sections.count > 0 {
        match canonical(sections.head_number)? {
            Some(hash) if hash != sections.head_hash => {}
            _ => break,
        }
        sections.count -= 1;
        sections = if sections.count > 0 {
            TrustedSections {
                count: sections.count,
                head_number: sections.count * bloom_trie_size - 1,
                head_hash: section_head(sections.count - 1),
            }
        } else {
            TrustedSections::default()
        };
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{collections::HashMap, convert::Infallible};

    const SIZE: u64 = 16;

    fn head(count: u64) -> u64 {
        count * SIZE - 1
    }

    fn hash(byte: u8) -> B256 {
        B256::repeat_byte(byte)
    }

    #[test]
    fn test_matching_head_is_kept() {
        let presumed = TrustedSections { count: 3, head_number: head(3), head_hash: hash(3) };
        let canonical = HashMap::from([(head(3), hash(3))]);
        let reconciled = reconcile_trusted_sections::<Infallible>(
            presumed,
            SIZE,
            |n| Ok(canonical.get(&n).copied()),
            |_| unreachable!(),
        )
        .unwrap();
        assert_eq!(reconciled, presumed);
    }

    #[test]
    fn test_unknown_head_is_accepted() {
        let presumed = TrustedSections { count: 3, head_number: head(3), head_hash: hash(3) };
        let reconciled =
            reconcile_trusted_sections::<Infallible>(presumed, SIZE, |_| Ok(None), |_| hash(9))
                .unwrap();
        assert_eq!(reconciled, presumed);
    }

    #[test]
    fn test_rolls_back_to_matching_section() {
        let presumed = TrustedSections { count: 4, head_number: head(4), head_hash: hash(4) };
        // Sections 2 and 3 were reorged away, section 1 still matches.
        let canonical =
            HashMap::from([(head(4), hash(40)), (head(3), hash(30)), (head(2), hash(2))]);
        let reconciled = reconcile_trusted_sections::<Infallible>(
            presumed,
            SIZE,
            |n| Ok(canonical.get(&n).copied()),
            |section| hash(section as u8 + 1),
        )
        .unwrap();
        assert_eq!(
            reconciled,
            TrustedSections { count: 2, head_number: head(2), head_hash: hash(2) }
        );
    }

    #[test]
    fn test_rolls_back_to_zero() {
        let presumed = TrustedSections { count: 2, head_number: head(2), head_hash: hash(2) };
        let reconciled = reconcile_trusted_sections::<Infallible>(
            presumed,
            SIZE,
            |n| Ok(Some(hash(n as u8))),
            |_| hash(0xff),
        )
        .unwrap();
        assert_eq!(reconciled, TrustedSections::default());
    }

    #[test]
    fn test_propagates_read_errors() {
        let presumed = TrustedSections { count: 2, head_number: head(2), head_hash: hash(2) };
        let result = reconcile_trusted_sections(presumed, SIZE, |_| Err("closed"), |_| hash(1));
        assert_eq!(result, Err("closed"));
    }

    proptest! {
        #[test]
        fn test_reconciled_head_matches_canonical(
            count in 0u64..12,
            reorg in 0u64..12,
            known in proptest::collection::vec(any::<bool>(), 12),
        ) {
            // Indexer heads are `hash(section + 1)`. Canonical heads agree below
            // `reorg` and differ from it on, where some heights are unknown.
            let canonical = |n: u64| -> Result<Option<B256>, Infallible> {
                let section = (n + 1) / SIZE - 1;
                Ok(if section < reorg {
                    Some(hash(section as u8 + 1))
                } else if known[section as usize] {
                    Some(hash(0x80 | section as u8))
                } else {
                    None
                })
            };
            let presumed = TrustedSections {
                count,
                head_number: if count > 0 { head(count) } else { 0 },
                head_hash: if count > 0 { hash(count as u8) } else { B256::ZERO },
            };

            let reconciled =
                reconcile_trusted_sections(presumed, SIZE, canonical, |s| hash(s as u8 + 1))
                    .unwrap();

            prop_assert!(reconciled.count <= count);
            if reconciled.count == 0 {
                prop_assert_eq!(reconciled, TrustedSections::default());
            } else {
                prop_assert_eq!(reconciled.head_number, head(reconciled.count));
                prop_assert_eq!(reconciled.head_hash, hash(reconciled.count as u8));
                let current = canonical(reconciled.head_number).unwrap();
                prop_assert!(current.is_none() || current == Some(reconciled.head_hash));
            }
            if count > reorg {
                prop_assert!(reconciled.count >= reorg);
            } else {
                prop_assert_eq!(reconciled, presumed);
            }
        }
    }
}
