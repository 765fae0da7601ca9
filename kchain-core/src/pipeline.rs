//! End-to-end alignment of one query against one reference
//!
//! seed -> extend -> chain -> secondary seeding -> regions. The parallel
//! stages (index construction, extension) join before the next stage starts;
//! everything else runs on the calling thread.

use serde::Serialize;

use crate::chain::{Chain, ChainParams, Chainer};
use crate::error::AlignResult;
use crate::extend::extend_anchors;
use crate::format::format_regions;
use crate::params::AlignParams;
use crate::regions::build_regions;
use crate::secondary::refine_chain;
use crate::seed::finder::AnchorFinder;
use crate::seed::index::KmerIndex;
use crate::types::Region;

/// Summary numbers for one alignment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentStats {
    pub query_len: usize,
    pub ref_len: usize,
    /// Raw k-mer hits of the primary pass
    pub primary_seeds: usize,
    /// Primary anchors surviving extension and filtering
    pub primary_anchors: usize,
    /// Query bases inside chained anchors
    pub anchored_bases: usize,
}

impl AlignmentStats {
    pub fn anchored_fraction(&self) -> f64 {
        if self.query_len == 0 {
            0.0
        } else {
            self.anchored_bases as f64 / self.query_len as f64
        }
    }
}

/// Result of aligning a query against a reference
#[derive(Debug, Clone, Serialize)]
pub struct Alignment {
    pub regions: Vec<Region>,
    pub chain: Chain,
    pub primary_k: usize,
    /// k of the secondary pass, when it was enabled
    pub secondary_k: Option<usize>,
    pub stats: AlignmentStats,
}

impl Alignment {
    /// The region list in the bracketed tuple format.
    pub fn to_tuple_string(&self) -> String {
        format_regions(&self.regions)
    }
}

/// Seed-extend-chain aligner
pub struct Aligner {
    params: AlignParams,
    chainer: Chainer,
}

impl Aligner {
    pub fn new(params: AlignParams) -> AlignResult<Self> {
        params.validate()?;
        let chainer = Chainer::new(ChainParams::from(&params));
        Ok(Self { params, chainer })
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    pub fn align(&self, query: &[u8], reference: &[u8]) -> AlignResult<Alignment> {
        let params = &self.params;
        let k = params.primary_k(reference.len());
        log::debug!(
            "Aligning query ({} bp) against reference ({} bp) with k={} on {} workers",
            query.len(),
            reference.len(),
            k,
            params.worker_count()
        );

        let seeds = {
            let index = KmerIndex::build(reference, k, params.worker_count())?;
            log::debug!("Primary index: {} distinct {}-mers", index.len(), k);
            AnchorFinder::new(query, &index).find_all()
        };
        let primary_seeds = seeds.len();

        let anchors = if seeds.is_empty() {
            seeds
        } else {
            extend_anchors(seeds, query, reference, params)?
        };
        let primary_anchors = anchors.len();

        let mut chain = self.chainer.chain(anchors);
        log::debug!("Primary chain: {} anchors, score {}", chain.len(), chain.score);

        let secondary_k = params.secondary_pass.then(|| params.secondary_k(k));
        if params.secondary_pass {
            chain = refine_chain(chain, query, reference, k, &self.chainer, params)?;
            log::debug!("Final chain: {} anchors, score {}", chain.len(), chain.score);
        }

        let regions = build_regions(&chain.anchors, query.len(), reference.len());
        let stats = AlignmentStats {
            query_len: query.len(),
            ref_len: reference.len(),
            primary_seeds,
            primary_anchors,
            anchored_bases: chain.query_coverage(),
        };
        log::info!(
            "Aligned {} regions; {} of {} query bases anchored ({:.1}%)",
            regions.len(),
            stats.anchored_bases,
            stats.query_len,
            stats.anchored_fraction() * 100.0
        );

        Ok(Alignment {
            regions,
            chain,
            primary_k: k,
            secondary_k,
            stats,
        })
    }
}

/// Align with the given parameters.
pub fn align(query: &[u8], reference: &[u8], params: &AlignParams) -> AlignResult<Alignment> {
    Aligner::new(params.clone())?.align(query, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AlignParams {
        AlignParams {
            threads: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_sequences() -> AlignResult<()> {
        let seq = b"ACGTTGCAAGGCTTACCGATCGATTTAAACCCGGGTACAGTCAGTTGCAGGTCAAT";
        let alignment = align(seq, seq, &params())?;
        assert_eq!(alignment.primary_k, 10);
        assert_eq!(alignment.secondary_k, Some(6));
        assert_eq!(alignment.to_tuple_string(), format!("[(0,{0},0,{0})]", seq.len()));
        assert_eq!(alignment.stats.anchored_bases, seq.len());
        Ok(())
    }

    #[test]
    fn test_empty_inputs() -> AlignResult<()> {
        let seq = b"ACGTTGCAAGGCTTACCGATCG";
        assert_eq!(align(b"", seq, &params())?.to_tuple_string(), "[(0,0,0,22)]");
        assert_eq!(align(seq, b"", &params())?.to_tuple_string(), "[(0,22,0,0)]");
        assert_eq!(align(b"", b"", &params())?.to_tuple_string(), "[(0,0,0,0)]");
        Ok(())
    }

    #[test]
    fn test_invalid_params_rejected() {
        let bad = AlignParams {
            similarity_threshold: -0.1,
            ..params()
        };
        assert!(Aligner::new(bad).is_err());
    }

    #[test]
    fn test_secondary_pass_can_be_disabled() -> AlignResult<()> {
        let seq = b"ACGTTGCAAGGCTTACCGATCGATTTAAACCCGGG";
        let without = AlignParams {
            secondary_pass: false,
            ..params()
        };
        let alignment = align(seq, seq, &without)?;
        assert_eq!(alignment.secondary_k, None);
        assert_eq!(alignment.chain.len(), 1);
        Ok(())
    }
}
