//! Chaining module for kchain
//!
//! Selects the highest-scoring set of anchors that can be laid end to end
//! along the query: non-overlapping, on one strand, and ordered along the
//! reference (ascending for forward anchors, descending for reverse ones).
//! The selection is a quadratic dynamic program over anchors sorted by
//! query start.

use serde::Serialize;

use crate::params::AlignParams;
use crate::types::{Anchor, Strand};

/// Parameters for the chaining algorithm
#[derive(Debug, Clone)]
pub struct ChainParams {
    /// Flat cost paid for every link between two anchors
    pub gap_base: i64,
    /// Scale of the super-linear penalty on the query/reference gap difference
    pub gap_scale: f64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::from(&AlignParams::default())
    }
}

impl From<&AlignParams> for ChainParams {
    fn from(params: &AlignParams) -> Self {
        Self {
            gap_base: params.gap_penalty_base,
            gap_scale: params.gap_penalty_scale,
        }
    }
}

/// A chain of anchors in ascending query order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chain {
    pub anchors: Vec<Anchor>,
    pub score: i64,
}

impl Chain {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Query bases covered by chained anchors.
    pub fn query_coverage(&self) -> usize {
        self.anchors.iter().map(Anchor::query_len).sum()
    }

    pub fn into_anchors(self) -> Vec<Anchor> {
        self.anchors
    }
}

/// Chaining algorithm implementation
pub struct Chainer {
    params: ChainParams,
}

impl Chainer {
    pub fn new(params: ChainParams) -> Self {
        Self { params }
    }

    /// Find the best chain among `anchors`. An empty input yields an empty chain.
    ///
    /// Anchors are sorted by query start with a stable sort, so anchors that
    /// start together keep their input order, and on equal scores the
    /// earlier candidate wins.
    pub fn chain(&self, mut anchors: Vec<Anchor>) -> Chain {
        if anchors.is_empty() {
            return Chain::default();
        }
        anchors.sort_by_key(Anchor::q_start);

        let n = anchors.len();
        let mut dp_score: Vec<i64> = anchors.iter().map(Anchor::score).collect();
        let mut dp_parent = vec![None::<usize>; n];

        for i in 0..n {
            let anchor_i = &anchors[i];
            for j in 0..i {
                let anchor_j = &anchors[j];
                if !self.can_link(anchor_j, anchor_i) {
                    continue;
                }
                let candidate_score =
                    dp_score[j] + anchor_i.score() - self.gap_cost(anchor_j, anchor_i);
                if candidate_score > dp_score[i] {
                    dp_score[i] = candidate_score;
                    dp_parent[i] = Some(j);
                }
            }
        }

        // First maximum wins.
        let mut best = 0;
        for i in 1..n {
            if dp_score[i] > dp_score[best] {
                best = i;
            }
        }

        let mut chain_indices = Vec::new();
        let mut current = Some(best);
        while let Some(idx) = current {
            chain_indices.push(idx);
            current = dp_parent[idx];
        }
        chain_indices.reverse();

        Chain {
            anchors: chain_indices.into_iter().map(|idx| anchors[idx]).collect(),
            score: dp_score[best],
        }
    }

    /// Whether `prev` may directly precede `next` in a chain
    pub fn can_link(&self, prev: &Anchor, next: &Anchor) -> bool {
        if prev.overlaps(next) || prev.q_end() > next.q_start() {
            return false;
        }
        match (prev.strand(), next.strand()) {
            (Strand::Forward, Strand::Forward) => prev.r_end() <= next.r_start(),
            (Strand::Reverse, Strand::Reverse) => prev.r_start() >= next.r_end(),
            _ => false,
        }
    }

    /// Cost of linking `prev` to `next`: a flat base plus a super-linear
    /// term in the difference between the query gap and the reference gap.
    pub fn gap_cost(&self, prev: &Anchor, next: &Anchor) -> i64 {
        let q_gap = next.q_start() as i64 - prev.q_end() as i64;
        let r_gap = match next.strand() {
            Strand::Forward => next.r_start() as i64 - prev.r_end() as i64,
            Strand::Reverse => prev.r_start() as i64 - next.r_end() as i64,
        };
        let diff = (q_gap - r_gap).unsigned_abs() as f64;
        self.params.gap_base + (diff * self.params.gap_scale * (1.0 + (1.0 + diff).log2())).floor() as i64
    }
}
