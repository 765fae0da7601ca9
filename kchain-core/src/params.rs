//! Tunable alignment parameters
//!
//! Everything the pipeline can be tuned with lives in [`AlignParams`], which
//! is passed explicitly into every stage. There is no global state, so two
//! alignments with different settings can run side by side.

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult};

/// Parameters for the seed-extend-chain pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignParams {
    /// Primary k-mer size; chosen from the reference length when unset
    pub kmer_size: Option<usize>,
    /// Maximum number of bases an anchor may grow on each side
    pub max_extend: usize,
    /// Anchors shorter than this are dropped after extension
    pub min_anchor_length: usize,
    /// Mismatches tolerated per side before extension stops
    pub mismatch_tolerance: usize,
    /// Minimum fraction of matching bases for an extended anchor
    pub similarity_threshold: f64,
    /// Constant cost of joining two anchors in a chain
    pub gap_penalty_base: i64,
    /// Scale of the penalty on the query/reference gap difference
    pub gap_penalty_scale: f64,
    /// Secondary k is the primary k minus this amount...
    pub secondary_k_shrink: usize,
    /// ...but never below this floor
    pub secondary_k_floor: usize,
    /// Re-seed query ranges left uncovered by the primary chain
    pub secondary_pass: bool,
    /// Worker count for the parallel stages; hardware concurrency when unset
    pub threads: Option<usize>,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            kmer_size: None,
            max_extend: 200,
            min_anchor_length: 15,
            mismatch_tolerance: 3,
            similarity_threshold: 0.5,
            gap_penalty_base: 5,
            gap_penalty_scale: 0.1,
            secondary_k_shrink: 4,
            secondary_k_floor: 6,
            secondary_pass: true,
            threads: None,
        }
    }
}

impl AlignParams {
    pub fn validate(&self) -> AlignResult<()> {
        if self.kmer_size == Some(0) {
            return Err(AlignError::InvalidParams("k-mer size must be positive".to_string()));
        }
        if self.secondary_k_floor == 0 {
            return Err(AlignError::InvalidParams(
                "secondary k-mer floor must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(AlignError::InvalidParams(format!(
                "similarity threshold {} is outside [0, 1]",
                self.similarity_threshold
            )));
        }
        if !self.gap_penalty_scale.is_finite() || self.gap_penalty_scale < 0.0 {
            return Err(AlignError::InvalidParams(format!(
                "gap penalty scale {} must be a non-negative number",
                self.gap_penalty_scale
            )));
        }
        if self.threads == Some(0) {
            return Err(AlignError::InvalidParams("thread count must be positive".to_string()));
        }
        Ok(())
    }

    /// Primary k for a reference of the given length.
    pub fn primary_k(&self, ref_len: usize) -> usize {
        self.kmer_size.unwrap_or_else(|| select_kmer_size(ref_len))
    }

    /// Smaller k used to re-seed uncovered query ranges.
    pub fn secondary_k(&self, primary_k: usize) -> usize {
        primary_k
            .saturating_sub(self.secondary_k_shrink)
            .max(self.secondary_k_floor)
    }

    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Adaptive k-mer size: longer references get longer k-mers.
pub fn select_kmer_size(ref_len: usize) -> usize {
    match ref_len {
        0..=499 => 10,
        500..=1_999 => 12,
        2_000..=9_999 => 14,
        10_000..=49_999 => 16,
        50_000..=199_999 => 18,
        _ => 20,
    }
}
