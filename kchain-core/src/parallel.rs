//! Fork-join helpers shared by the parallel pipeline stages
//!
//! Each call builds its own short-lived worker pool, splits the input into
//! contiguous ranges (one per worker), runs the worker function on every
//! range and joins before returning. Nothing outlives the call.

use std::ops::Range;

use rayon::prelude::*;

use crate::error::AlignResult;

/// Split `0..len` into at most `workers` contiguous, non-overlapping ranges.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let chunk = len.div_ceil(workers.max(1));
    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}

fn stage_pool(workers: usize) -> AlignResult<rayon::ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("kchain-worker-{}", i))
        .build()?)
}

/// Run `worker` over each range of `0..len` in parallel. Results come back
/// in range order.
pub fn map_ranges<R, F>(len: usize, workers: usize, worker: F) -> AlignResult<Vec<R>>
where
    R: Send,
    F: Fn(Range<usize>) -> R + Sync,
{
    let ranges = partition(len, workers);
    if ranges.len() <= 1 {
        return Ok(ranges.into_iter().map(worker).collect());
    }
    let pool = stage_pool(workers)?;
    Ok(pool.install(|| ranges.into_par_iter().map(&worker).collect()))
}

/// Run `worker` over contiguous mutable slices of `items` in parallel.
pub fn for_each_chunk_mut<T, F>(items: &mut [T], workers: usize, worker: F) -> AlignResult<()>
where
    T: Send,
    F: Fn(&mut [T]) + Sync,
{
    if items.is_empty() {
        return Ok(());
    }
    let chunk = items.len().div_ceil(workers.max(1));
    if chunk == items.len() {
        worker(items);
        return Ok(());
    }
    let pool = stage_pool(workers)?;
    pool.install(|| items.par_chunks_mut(chunk).for_each(|slice| worker(slice)));
    Ok(())
}
