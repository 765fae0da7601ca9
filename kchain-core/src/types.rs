use serde::{Deserialize, Serialize};

/// Query/reference position. Sequences are held in memory, so `usize` suffices.
pub type SeqPos = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_reverse(self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

/// A candidate match between a query interval and a reference interval of
/// the same length.
///
/// The score is derived from the intervals and cannot be set directly; the
/// only way to move an anchor is [`Anchor::extended`], which returns the new
/// state with its score recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    q_start: SeqPos,
    q_end: SeqPos,
    r_start: SeqPos,
    r_end: SeqPos,
    strand: Strand,
    score: i64,
}

impl Anchor {
    pub fn new(q_start: SeqPos, q_end: SeqPos, r_start: SeqPos, r_end: SeqPos, strand: Strand) -> Self {
        debug_assert!(q_start <= q_end && r_start <= r_end);
        debug_assert_eq!(q_end - q_start, r_end - r_start);
        Self {
            q_start,
            q_end,
            r_start,
            r_end,
            strand,
            score: Self::score_for(q_end - q_start, r_end - r_start),
        }
    }

    /// Seed anchor of length `k` at the given query and reference offsets.
    pub fn seed(q_start: SeqPos, r_start: SeqPos, k: usize, strand: Strand) -> Self {
        Self::new(q_start, q_start + k, r_start, r_start + k, strand)
    }

    /// `floor(len * (1 + log2(1 + len)))` over the shorter of the two intervals.
    pub fn score_for(query_len: usize, ref_len: usize) -> i64 {
        let len = query_len.min(ref_len) as f64;
        (len * (1.0 + (1.0 + len).log2())).floor() as i64
    }

    /// Grow the anchor by `left` bases before the query start and `right`
    /// bases after the query end.
    ///
    /// On the forward strand the reference interval grows in the same
    /// direction. On the reverse strand query-left maps to reference-right,
    /// so `left` grows `r_end` and `right` shrinks `r_start`.
    pub fn extended(self, left: usize, right: usize) -> Self {
        let (r_start, r_end) = match self.strand {
            Strand::Forward => (self.r_start - left, self.r_end + right),
            Strand::Reverse => (self.r_start - right, self.r_end + left),
        };
        Self::new(self.q_start - left, self.q_end + right, r_start, r_end, self.strand)
    }

    pub fn q_start(&self) -> SeqPos {
        self.q_start
    }

    pub fn q_end(&self) -> SeqPos {
        self.q_end
    }

    pub fn r_start(&self) -> SeqPos {
        self.r_start
    }

    pub fn r_end(&self) -> SeqPos {
        self.r_end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn is_rc(&self) -> bool {
        self.strand.is_reverse()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn query_len(&self) -> usize {
        self.q_end - self.q_start
    }

    pub fn ref_len(&self) -> usize {
        self.r_end - self.r_start
    }

    /// True when the anchors overlap in both query and reference.
    pub fn overlaps(&self, other: &Anchor) -> bool {
        let q_overlap = self.q_end.min(other.q_end) as i64 - self.q_start.max(other.q_start) as i64;
        let r_overlap = self.r_end.min(other.r_end) as i64 - self.r_start.max(other.r_start) as i64;
        q_overlap > 0 && r_overlap > 0
    }
}

/// What a region of the final mapping represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// A chained anchor.
    Anchor { strand: Strand },
    /// Unanchored span before, between or after anchors.
    Gap,
}

/// One entry of the region list: a query range mapped onto a reference range.
///
/// A gap between two reverse-strand anchors keeps the reference bounds in
/// chain order, so its `ref_start` may exceed its `ref_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub query_start: SeqPos,
    pub query_end: SeqPos,
    pub ref_start: SeqPos,
    pub ref_end: SeqPos,
    pub kind: RegionKind,
}

impl Region {
    pub fn gap(query_start: SeqPos, query_end: SeqPos, ref_start: SeqPos, ref_end: SeqPos) -> Self {
        Self {
            query_start,
            query_end,
            ref_start,
            ref_end,
            kind: RegionKind::Gap,
        }
    }

    pub fn from_anchor(anchor: &Anchor) -> Self {
        Self {
            query_start: anchor.q_start(),
            query_end: anchor.q_end(),
            ref_start: anchor.r_start(),
            ref_end: anchor.r_end(),
            kind: RegionKind::Anchor {
                strand: anchor.strand(),
            },
        }
    }

    pub fn as_tuple(&self) -> (SeqPos, SeqPos, SeqPos, SeqPos) {
        (self.query_start, self.query_end, self.ref_start, self.ref_end)
    }

    pub fn query_len(&self) -> usize {
        self.query_end - self.query_start
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self.kind, RegionKind::Anchor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_score() {
        // 10 * (1 + log2(11)) = 44.59
        let anchor = Anchor::seed(0, 0, 10, Strand::Forward);
        assert_eq!(anchor.score(), 44);
        assert_eq!(anchor.query_len(), 10);
        assert_eq!(anchor.ref_len(), 10);
    }

    #[test]
    fn test_score_of_empty_interval() {
        assert_eq!(Anchor::score_for(0, 0), 0);
        assert_eq!(Anchor::score_for(1, 1), 2);
    }

    #[test]
    fn test_forward_extension() {
        let anchor = Anchor::seed(10, 20, 5, Strand::Forward).extended(3, 4);
        assert_eq!((anchor.q_start(), anchor.q_end()), (7, 19));
        assert_eq!((anchor.r_start(), anchor.r_end()), (17, 29));
        assert_eq!(anchor.score(), Anchor::score_for(12, 12));
    }

    #[test]
    fn test_reverse_extension_moves_reference_the_other_way() {
        let anchor = Anchor::seed(10, 20, 5, Strand::Reverse).extended(3, 4);
        assert_eq!((anchor.q_start(), anchor.q_end()), (7, 19));
        assert_eq!((anchor.r_start(), anchor.r_end()), (16, 28));
        assert!(anchor.is_rc());
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = Anchor::new(0, 10, 0, 10, Strand::Forward);
        let b = Anchor::new(5, 15, 20, 30, Strand::Forward);
        let c = Anchor::new(5, 15, 5, 15, Strand::Forward);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
