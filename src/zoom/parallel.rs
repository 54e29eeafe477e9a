//! Row-parallel fill for large zoom outputs.
//!
//! Destination rows are write-disjoint and only read the immutable
//! source, so each worker expands its rows independently.

use alloc::vec::Vec;
use std::sync::OnceLock;

use enough::Stop;
use rayon::prelude::*;

use super::spans::expand_runs;
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Rows per cancellation check, matching the sequential loops.
const BAND_ROWS: usize = 16;

/// Below this many output pixels the pool overhead outweighs the split.
const PARALLEL_MIN_PIXELS: u64 = 262_144;

/// Smallest useful amount of work per worker.
const PARALLEL_MIN_CHUNK_PIXELS: u64 = 65_536;

pub(crate) fn should_parallelize(width: u32, height: u32) -> bool {
    let workers = workers();
    if workers <= 1 || height < 2 {
        return false;
    }
    let pixels = u64::from(width) * u64::from(height);
    let min_chunk_total = PARALLEL_MIN_CHUNK_PIXELS.saturating_mul(workers as u64);
    pixels >= PARALLEL_MIN_PIXELS.max(min_chunk_total)
}

/// Expand every destination row, checking `stop` once per band of rows.
pub(crate) fn fill_rows(
    source: &PixelBuffer,
    col_runs: &[usize],
    row_runs: &[usize],
    out: &mut PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let parent_rows: Vec<u32> = row_runs
        .iter()
        .enumerate()
        .flat_map(|(sy, &run)| core::iter::repeat_n(sy as u32, run))
        .collect();
    let stride = out.stride();
    log::debug!(
        target: "zenzoom::zoom",
        "Parallel fill of {} rows on {} workers",
        parent_rows.len(),
        workers()
    );
    out.as_bytes_mut()
        .par_chunks_mut(stride * BAND_ROWS)
        .zip(parent_rows.par_chunks(BAND_ROWS))
        .try_for_each(|(band, parents)| -> Result<(), BitmapError> {
            stop.check()?;
            for (row, &sy) in band.chunks_exact_mut(stride).zip(parents) {
                expand_runs(source.row(sy), col_runs, row);
            }
            Ok(())
        })
}

fn workers() -> usize {
    static WORKERS: OnceLock<usize> = OnceLock::new();
    *WORKERS.get_or_init(rayon::current_num_threads)
}
