//! Parallel k-mer index over the reference
//!
//! The reference is split into contiguous position ranges, one per worker.
//! A worker owns every k-mer that *starts* inside its range, so a window may
//! read up to `k - 1` bases past the range end and no k-mer is lost at a
//! chunk boundary. Workers fill a private map and merge it into the shared
//! one with a single lock acquisition.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AlignError, AlignResult};
use crate::parallel::map_ranges;
use crate::types::SeqPos;

/// Map from every k-length window of a sequence to its start offsets.
#[derive(Debug, Clone)]
pub struct KmerIndex<'a> {
    k: usize,
    positions: HashMap<&'a [u8], Vec<SeqPos>>,
}

impl<'a> KmerIndex<'a> {
    /// Build the index with `workers` threads.
    pub fn build(sequence: &'a [u8], k: usize, workers: usize) -> AlignResult<Self> {
        if k == 0 {
            return Err(AlignError::InvalidParams("k-mer size must be positive".to_string()));
        }

        let shared: Mutex<HashMap<&'a [u8], Vec<SeqPos>>> = Mutex::new(HashMap::new());
        let window_count = (sequence.len() + 1).saturating_sub(k);

        let merged = map_ranges(window_count, workers, |range| {
            let mut local: HashMap<&'a [u8], Vec<SeqPos>> = HashMap::new();
            for pos in range {
                let kmer: &'a [u8] = &sequence[pos..pos + k];
                local.entry(kmer).or_default().push(pos);
            }
            let mut map = shared.lock().map_err(|_| AlignError::IndexPoisoned)?;
            for (kmer, hits) in local {
                map.entry(kmer).or_default().extend(hits);
            }
            Ok::<(), AlignError>(())
        })?;
        merged.into_iter().collect::<AlignResult<Vec<()>>>()?;

        let mut positions = shared.into_inner().map_err(|_| AlignError::IndexPoisoned)?;
        // Workers merge in whatever order they finish.
        for hits in positions.values_mut() {
            hits.sort_unstable();
        }

        Ok(Self { k, positions })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Reference offsets of `kmer`, ascending. Empty when absent.
    pub fn lookup(&self, kmer: &[u8]) -> &[SeqPos] {
        self.positions.get(kmer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct k-mers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total number of indexed windows.
    pub fn occurrences(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }
}
