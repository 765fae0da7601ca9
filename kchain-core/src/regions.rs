//! Turns a chain into a region list that covers the whole query
//!
//! Chained anchors become regions of their own; every stretch of query
//! before, between and after them becomes a gap region. A gap runs from the
//! end of the preceding anchor (or position 0) to the start of the next
//! anchor (or the sequence end) in both coordinate spaces. Reverse chains
//! descend on the reference, so their inner gaps have `ref_start > ref_end`.

use crate::types::{Anchor, Region, SeqPos};

/// Push a gap region when its query or reference span is non-empty.
fn push_gap(
    regions: &mut Vec<Region>,
    (query_start, query_end): (SeqPos, SeqPos),
    (ref_start, ref_end): (SeqPos, SeqPos),
) {
    if query_start < query_end || ref_start < ref_end {
        regions.push(Region::gap(query_start, query_end, ref_start, ref_end));
    }
}

/// Build the region list for `chain` (ascending query order, one strand).
///
/// An empty chain maps the whole query onto the whole reference.
pub fn build_regions(chain: &[Anchor], query_len: usize, ref_len: usize) -> Vec<Region> {
    let (Some(first), Some(last)) = (chain.first(), chain.last()) else {
        return vec![Region::gap(0, query_len, 0, ref_len)];
    };

    let mut regions = Vec::with_capacity(chain.len() * 2 + 1);
    push_gap(&mut regions, (0, first.q_start()), (0, first.r_start()));
    regions.push(Region::from_anchor(first));

    for pair in chain.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        push_gap(
            &mut regions,
            (prev.q_end(), next.q_start()),
            (prev.r_end(), next.r_start()),
        );
        regions.push(Region::from_anchor(next));
    }

    push_gap(&mut regions, (last.q_end(), query_len), (last.r_end(), ref_len));
    regions
}
