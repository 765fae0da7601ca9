//! Second seeding pass over query ranges the primary chain left uncovered
//!
//! A fresh index with a smaller k is built over the reference and the
//! uncovered ranges are seeded, extended and filtered again. Survivors are
//! pooled with the primary chain and the whole set is re-chained, so a
//! better chain may displace primary anchors.

use std::ops::Range;

use crate::chain::{Chain, Chainer};
use crate::error::AlignResult;
use crate::extend::extend_anchors;
use crate::params::AlignParams;
use crate::seed::finder::AnchorFinder;
use crate::seed::index::KmerIndex;
use crate::types::{Anchor, SeqPos};

/// Maximal query ranges not covered by any anchor of `chain`.
pub fn uncovered_ranges(chain: &[Anchor], query_len: usize) -> Vec<Range<SeqPos>> {
    let mut covered = vec![false; query_len];
    for anchor in chain {
        let start = anchor.q_start().min(query_len);
        let end = anchor.q_end().min(query_len);
        covered[start..end].iter_mut().for_each(|c| *c = true);
    }

    let mut ranges = Vec::new();
    let mut open: Option<SeqPos> = None;
    for (pos, &is_covered) in covered.iter().enumerate() {
        match (is_covered, open) {
            (false, None) => open = Some(pos),
            (true, Some(start)) => {
                ranges.push(start..pos);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        ranges.push(start..query_len);
    }
    ranges
}

/// Seed, extend and filter anchors inside `ranges` using k-mers of length `k`.
pub fn find_secondary_anchors(
    ranges: &[Range<SeqPos>],
    query: &[u8],
    reference: &[u8],
    k: usize,
    params: &AlignParams,
) -> AlignResult<Vec<Anchor>> {
    let index = KmerIndex::build(reference, k, params.worker_count())?;
    let finder = AnchorFinder::new(query, &index);

    let mut seeds = Vec::new();
    for range in ranges.iter().filter(|r| r.len() >= k) {
        seeds.extend(finder.find_in(range.clone()));
    }
    log::debug!(
        "Secondary pass (k={}): {} seeds in {} uncovered ranges",
        k,
        seeds.len(),
        ranges.len()
    );
    if seeds.is_empty() {
        return Ok(seeds);
    }
    extend_anchors(seeds, query, reference, params)
}

/// Run the secondary pass on `primary` and return the re-chained result.
/// The primary chain comes back unchanged when nothing new survives.
pub fn refine_chain(
    primary: Chain,
    query: &[u8],
    reference: &[u8],
    primary_k: usize,
    chainer: &Chainer,
    params: &AlignParams,
) -> AlignResult<Chain> {
    let ranges = uncovered_ranges(&primary.anchors, query.len());
    if ranges.is_empty() {
        log::debug!("Primary chain covers the whole query; skipping secondary pass");
        return Ok(primary);
    }

    let k = params.secondary_k(primary_k);
    let secondary = find_secondary_anchors(&ranges, query, reference, k, params)?;
    if secondary.is_empty() {
        return Ok(primary);
    }

    log::debug!("Re-chaining {} primary + {} secondary anchors", primary.len(), secondary.len());
    let mut pooled = primary.into_anchors();
    pooled.extend(secondary);
    Ok(chainer.chain(pooled))
}
