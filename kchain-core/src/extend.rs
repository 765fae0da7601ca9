//! Ungapped anchor extension
//!
//! Each seed grows base by base on both sides until it reaches a sequence
//! boundary, the extension limit, or one mismatch more than the per-side
//! budget. Wildcards neither match nor mismatch but still advance the
//! anchor. Extension runs in parallel over contiguous slices of the anchor
//! list; workers only read the sequences.

use std::collections::HashSet;

use crate::error::AlignResult;
use crate::parallel::for_each_chunk_mut;
use crate::params::AlignParams;
use crate::seed::utils::{compare_bases, complement_nucleotide, BaseCall};
use crate::types::{Anchor, Strand};

/// Number of bases `anchor` can grow before its query start.
fn extend_left(anchor: &Anchor, query: &[u8], reference: &[u8], params: &AlignParams) -> usize {
    let mut steps = 0;
    let mut mismatches = 0;
    while steps < params.max_extend {
        let Some(q_pos) = anchor.q_start().checked_sub(steps + 1) else {
            break;
        };
        let ref_base = match anchor.strand() {
            Strand::Forward => match anchor.r_start().checked_sub(steps + 1) {
                Some(r_pos) => reference[r_pos],
                None => break,
            },
            Strand::Reverse => match reference.get(anchor.r_end() + steps) {
                Some(&base) => complement_nucleotide(base),
                None => break,
            },
        };
        if compare_bases(query[q_pos], ref_base) == BaseCall::Mismatch {
            mismatches += 1;
            if mismatches > params.mismatch_tolerance {
                break;
            }
        }
        steps += 1;
    }
    steps
}

/// Number of bases `anchor` can grow past its query end.
fn extend_right(anchor: &Anchor, query: &[u8], reference: &[u8], params: &AlignParams) -> usize {
    let mut steps = 0;
    let mut mismatches = 0;
    while steps < params.max_extend {
        let Some(&query_base) = query.get(anchor.q_end() + steps) else {
            break;
        };
        let ref_base = match anchor.strand() {
            Strand::Forward => match reference.get(anchor.r_end() + steps) {
                Some(&base) => base,
                None => break,
            },
            Strand::Reverse => match anchor.r_start().checked_sub(steps + 1) {
                Some(r_pos) => complement_nucleotide(reference[r_pos]),
                None => break,
            },
        };
        if compare_bases(query_base, ref_base) == BaseCall::Mismatch {
            mismatches += 1;
            if mismatches > params.mismatch_tolerance {
                break;
            }
        }
        steps += 1;
    }
    steps
}

/// Extend one anchor on both sides; the two mismatch budgets are independent.
pub fn extend_anchor(anchor: Anchor, query: &[u8], reference: &[u8], params: &AlignParams) -> Anchor {
    let left = extend_left(&anchor, query, reference, params);
    let right = extend_right(&anchor, query, reference, params);
    anchor.extended(left, right)
}

/// Fraction of positions in the anchor that agree, counting wildcards as
/// agreement. Reverse anchors pair the query start with the reference end.
pub fn identity(anchor: &Anchor, query: &[u8], reference: &[u8]) -> f64 {
    let len = anchor.query_len();
    if len == 0 {
        return 0.0;
    }
    let agreeing = (0..len)
        .filter(|&i| {
            let query_base = query[anchor.q_start() + i];
            let ref_base = match anchor.strand() {
                Strand::Forward => reference[anchor.r_start() + i],
                Strand::Reverse => complement_nucleotide(reference[anchor.r_end() - 1 - i]),
            };
            compare_bases(query_base, ref_base) != BaseCall::Mismatch
        })
        .count();
    agreeing as f64 / len as f64
}

/// Whether an extended anchor is long and similar enough to keep.
pub fn passes_filter(anchor: &Anchor, query: &[u8], reference: &[u8], params: &AlignParams) -> bool {
    anchor.query_len() >= params.min_anchor_length
        && identity(anchor, query, reference) >= params.similarity_threshold
}

/// Extend every anchor in parallel, then drop short or dissimilar anchors
/// and exact duplicates. Surviving anchors keep their relative order.
pub fn extend_anchors(
    mut anchors: Vec<Anchor>,
    query: &[u8],
    reference: &[u8],
    params: &AlignParams,
) -> AlignResult<Vec<Anchor>> {
    let seeded = anchors.len();

    for_each_chunk_mut(&mut anchors, params.worker_count(), |slice| {
        for anchor in slice.iter_mut() {
            *anchor = extend_anchor(*anchor, query, reference, params);
        }
    })?;

    anchors.retain(|anchor| passes_filter(anchor, query, reference, params));
    let passed = anchors.len();

    // Seeds on the same diagonal usually grow into the same anchor.
    let mut seen = HashSet::with_capacity(anchors.len());
    anchors.retain(|anchor| seen.insert(*anchor));

    log::debug!(
        "Extended {} seeds: {} passed filters, {} distinct",
        seeded,
        passed,
        anchors.len()
    );
    Ok(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::utils::reverse_complement;

    fn params() -> AlignParams {
        AlignParams {
            threads: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_extends_to_sequence_ends() {
        let seq = b"ACGTTGCAAGGCTTACCGATCGATTTAAACCC";
        let anchor = extend_anchor(Anchor::seed(10, 10, 6, Strand::Forward), seq, seq, &params());
        assert_eq!((anchor.q_start(), anchor.q_end()), (0, seq.len()));
        assert_eq!((anchor.r_start(), anchor.r_end()), (0, seq.len()));
        assert_eq!(anchor.score(), Anchor::score_for(seq.len(), seq.len()));
    }

    #[test]
    fn test_max_extend_limit() {
        let seq = vec![b'A'; 100];
        let limited = AlignParams {
            max_extend: 7,
            ..params()
        };
        let anchor = extend_anchor(Anchor::seed(50, 50, 5, Strand::Forward), &seq, &seq, &limited);
        assert_eq!((anchor.q_start(), anchor.q_end()), (43, 62));
    }

    #[test]
    fn test_mismatch_budget_per_side() {
        // right side: four mismatches at offsets 20..24 stop extension before the fourth
        let query = b"AAAAAAAAAAAAAAAAAAAACCCCAAAA";
        let reference = b"AAAAAAAAAAAAAAAAAAAAGGGGAAAA";
        let anchor = extend_anchor(Anchor::seed(5, 5, 5, Strand::Forward), query, reference, &params());
        assert_eq!(anchor.q_start(), 0);
        assert_eq!(anchor.q_end(), 23);
    }

    #[test]
    fn test_wildcards_do_not_consume_budget() {
        let query = b"AAAAAAAAAANNNNNNAAAA";
        let reference = b"AAAAAAAAAACCCCCCAAAA";
        let anchor = extend_anchor(Anchor::seed(0, 0, 5, Strand::Forward), query, reference, &params());
        assert_eq!(anchor.q_end(), query.len());
        assert_eq!(identity(&anchor, query, reference), 1.0);
    }

    #[test]
    fn test_reverse_anchor_extension() {
        let reference = b"TTGACCATGCAGGTACCGTAGGCATTCAGT";
        let query = reverse_complement(reference);
        // query [10, 16) pairs with reference [14, 20) on the reverse strand
        let seed = Anchor::seed(10, reference.len() - 16, 6, Strand::Reverse);
        assert_eq!(identity(&seed, &query, reference), 1.0);

        let anchor = extend_anchor(seed, &query, reference, &params());
        assert_eq!((anchor.q_start(), anchor.q_end()), (0, query.len()));
        assert_eq!((anchor.r_start(), anchor.r_end()), (0, reference.len()));
        assert_eq!(identity(&anchor, &query, reference), 1.0);
    }

    #[test]
    fn test_identity_counts_mismatches() {
        let query = b"ACGTACGTAC";
        let reference = b"ACGTTCGTAA";
        let anchor = Anchor::seed(0, 0, 10, Strand::Forward);
        assert!((identity(&anchor, query, reference) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_filter_and_dedup() -> AlignResult<()> {
        let seq = b"ACGTTGCAAGGCTTACCGATCGATTTAAACCC";
        // three seeds on the main diagonal grow into one anchor
        let seeds = vec![
            Anchor::seed(0, 0, 6, Strand::Forward),
            Anchor::seed(8, 8, 6, Strand::Forward),
            Anchor::seed(20, 20, 6, Strand::Forward),
        ];
        let anchors = extend_anchors(seeds, seq, seq, &params())?;
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].query_len(), seq.len());
        Ok(())
    }

    #[test]
    fn test_short_anchors_dropped() -> AlignResult<()> {
        let query = b"GGGGGACGTACGGGGG";
        let reference = b"TTTTTACGTACTTTTT";
        let seeds = vec![Anchor::seed(5, 5, 6, Strand::Forward)];
        let strict = AlignParams {
            mismatch_tolerance: 0,
            ..params()
        };
        assert!(extend_anchors(seeds, query, reference, &strict)?.is_empty());
        Ok(())
    }
}
