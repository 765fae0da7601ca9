//! Exact k-mer anchor discovery
//!
//! Looks every query k-mer up in the reference index, on the forward strand
//! and on the reverse complement of the query. Every hit becomes an anchor;
//! duplicates are left for the extension stage to sort out.

use std::ops::Range;

use super::index::KmerIndex;
use super::utils::reverse_complement;
use crate::types::{Anchor, SeqPos, Strand};

/// Which strand(s) of the query to seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    ReverseComplement,
}

/// Seeds the query against one reference index.
///
/// The reverse complement of the query is computed once on construction
/// and shared by every lookup.
pub struct AnchorFinder<'q, 'i, 'r> {
    query: &'q [u8],
    query_rc: Vec<u8>,
    index: &'i KmerIndex<'r>,
}

impl<'q, 'i, 'r> AnchorFinder<'q, 'i, 'r> {
    pub fn new(query: &'q [u8], index: &'i KmerIndex<'r>) -> Self {
        Self {
            query,
            query_rc: reverse_complement(query),
            index,
        }
    }

    /// Every anchor over the whole query: forward hits first, then
    /// reverse-complement hits.
    pub fn find_all(&self) -> Vec<Anchor> {
        self.find_in(0..self.query.len())
    }

    /// Anchors whose seed lies entirely inside `range` (query coordinates).
    pub fn find_in(&self, range: Range<SeqPos>) -> Vec<Anchor> {
        let mut anchors = self.find_oriented(range.clone(), Orientation::Forward);
        anchors.extend(self.find_oriented(range, Orientation::ReverseComplement));
        anchors
    }

    /// Anchors for one orientation whose seed lies inside `range`.
    ///
    /// Forward hits are emitted by ascending query offset. Reverse hits are
    /// emitted by ascending offset in the reverse-complemented query, which
    /// is descending in query coordinates.
    pub fn find_oriented(&self, range: Range<SeqPos>, orientation: Orientation) -> Vec<Anchor> {
        let k = self.index.k();
        let qlen = self.query.len();
        let end = range.end.min(qlen);
        if k == 0 || range.start >= end || end - range.start < k {
            return Vec::new();
        }

        let mut anchors = Vec::new();
        match orientation {
            Orientation::Forward => {
                for i in range.start..=end - k {
                    for &r_pos in self.index.lookup(&self.query[i..i + k]) {
                        anchors.push(Anchor::seed(i, r_pos, k, Strand::Forward));
                    }
                }
            }
            Orientation::ReverseComplement => {
                // Offset i in the reversed query covers query [qlen - i - k, qlen - i).
                for i in qlen - end..=qlen - range.start - k {
                    for &r_pos in self.index.lookup(&self.query_rc[i..i + k]) {
                        anchors.push(Anchor::seed(qlen - (i + k), r_pos, k, Strand::Reverse));
                    }
                }
            }
        }
        anchors
    }
}
