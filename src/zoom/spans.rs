//! Run-length zoom.
//!
//! The index map along each axis is non-decreasing, so it collapses into
//! one run length per source pixel: `f - f/2` for the first, `f + f/2`
//! for the last (edge correction) and `f` in between. A destination row
//! is built by repeating each source pixel over its run, and each source
//! row is written once then copied over the rest of its run.

use alloc::vec::Vec;

use enough::Stop;

use super::{alloc_output, source_index_map};
use crate::error::BitmapError;
use crate::geometry::ScaleFactor;
use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

pub(crate) fn zoom_spans(
    source: &PixelBuffer,
    factor: ScaleFactor,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut out = alloc_output(source, factor)?;
    let col_runs = run_lengths(source.width(), factor.get())?;
    let row_runs = run_lengths(source.height(), factor.get())?;

    #[cfg(feature = "rayon")]
    {
        if super::parallel::should_parallelize(out.width(), out.height()) {
            super::parallel::fill_rows(source, &col_runs, &row_runs, &mut out, stop)?;
            return Ok(out);
        }
    }

    let stride = out.stride();
    let data = out.as_bytes_mut();
    let mut start = 0;
    for (sy, &run) in row_runs.iter().enumerate() {
        if sy % 16 == 0 {
            stop.check()?;
        }
        let (first, rest) = data[start..start + run * stride].split_at_mut(stride);
        expand_runs(source.row(sy as u32), &col_runs, first);
        for row in rest.chunks_exact_mut(stride) {
            row.copy_from_slice(first);
        }
        start += run * stride;
    }

    Ok(out)
}

/// Destination pixels per source pixel along an axis of `len` pixels.
pub(crate) fn run_lengths(len: u32, factor: u32) -> Result<Vec<usize>, BitmapError> {
    let mut runs = Vec::new();
    runs.try_reserve_exact(len as usize)
        .map_err(|_| BitmapError::OutOfMemory {
            bytes: len as usize * core::mem::size_of::<usize>(),
        })?;
    runs.resize(len as usize, 0);
    for s in source_index_map(len, factor)? {
        runs[s as usize] += 1;
    }
    Ok(runs)
}

/// Repeat each 3-byte source pixel `runs[i]` times into `dst`.
pub(crate) fn expand_runs(src: &[u8], runs: &[usize], dst: &mut [u8]) {
    let mut pos = 0;
    for (px, &run) in src.chunks_exact(BYTES_PER_PIXEL).zip(runs) {
        let end = pos + run * BYTES_PER_PIXEL;
        for d in dst[pos..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            d.copy_from_slice(px);
        }
        pos = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::zoom;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn run_lengths_match_closed_form() {
        assert_eq!(run_lengths(4, 3).unwrap(), vec![2, 3, 3, 4]);
        assert_eq!(run_lengths(4, 2).unwrap(), vec![1, 2, 2, 3]);
        assert_eq!(run_lengths(3, 1).unwrap(), vec![1, 1, 1]);
        assert_eq!(run_lengths(1, 4).unwrap(), vec![4]);
    }

    #[test]
    fn matches_reference() {
        let data: Vec<u8> = (0..6 * 5 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let src = PixelBuffer::from_vec(data, 6, 5).unwrap();
        for f in 1..=6 {
            let factor = ScaleFactor::new(f).unwrap();
            let expected = zoom(&src, factor, &Unstoppable).unwrap();
            let actual = zoom_spans(&src, factor, &Unstoppable).unwrap();
            assert_eq!(actual, expected, "factor {f}");
        }
    }
}
