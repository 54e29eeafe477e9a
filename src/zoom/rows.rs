//! Row-oriented zoom.
//!
//! One destination row is expanded per distinct parent row through a
//! precomputed column map; every other destination row with the same
//! parent is a whole-row copy of it.

use enough::Stop;

use super::{alloc_output, source_index_map};
use crate::error::BitmapError;
use crate::geometry::ScaleFactor;
use crate::pixel::PixelBuffer;

pub(crate) fn zoom_rows(
    source: &PixelBuffer,
    factor: ScaleFactor,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut out = alloc_output(source, factor)?;
    let f = factor.get();
    let col_map = source_index_map(source.width(), f)?;
    let row_map = source_index_map(source.height(), f)?;

    let stride = out.stride();
    let data = out.as_bytes_mut();
    let mut previous: Option<(u32, usize)> = None;
    for (dy, &sy) in row_map.iter().enumerate() {
        if dy % 16 == 0 {
            stop.check()?;
        }
        let start = dy * stride;
        match previous {
            Some((prev_sy, prev_start)) if prev_sy == sy => {
                data.copy_within(prev_start..prev_start + stride, start);
            }
            _ => {
                expand_row(source.row(sy), &col_map, &mut data[start..start + stride]);
                previous = Some((sy, start));
            }
        }
    }

    Ok(out)
}

/// `dst[i] = src[map[i]]` for 3-byte pixels.
#[cfg(not(feature = "simd"))]
fn expand_row(src: &[u8], map: &[u32], dst: &mut [u8]) {
    expand_row_portable(src, map, dst);
}

#[cfg(feature = "simd")]
fn expand_row(src: &[u8], map: &[u32], dst: &mut [u8]) {
    simd::expand_row(src, map, dst);
}

#[inline(always)]
fn expand_row_portable(src: &[u8], map: &[u32], dst: &mut [u8]) {
    for (d, &sx) in dst.chunks_exact_mut(3).zip(map) {
        let s = sx as usize * 3;
        d.copy_from_slice(&src[s..s + 3]);
    }
}

#[cfg(feature = "simd")]
mod simd {
    use archmage::incant;
    use archmage::prelude::*;

    fn expand_row_impl_scalar(_token: ScalarToken, src: &[u8], map: &[u32], dst: &mut [u8]) {
        super::expand_row_portable(src, map, dst);
    }

    // Same loop, compiled with AVX2 enabled so the gathers vectorize.
    #[cfg(target_arch = "x86_64")]
    #[arcane]
    fn expand_row_impl_v3(_token: X64V3Token, src: &[u8], map: &[u32], dst: &mut [u8]) {
        super::expand_row_portable(src, map, dst);
    }

    pub(super) fn expand_row(src: &[u8], map: &[u32], dst: &mut [u8]) {
        incant!(expand_row_impl(src, map, dst), [v3, scalar]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::zoom;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut state: u32 = 0x1234_5678;
        let data: Vec<u8> = (0..width * height * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();
        PixelBuffer::from_vec(data, width, height).unwrap()
    }

    #[test]
    fn matches_reference() {
        for (w, h) in [(1, 1), (2, 2), (3, 5), (7, 4)] {
            let src = noise(w, h);
            for f in 1..=5 {
                let factor = ScaleFactor::new(f).unwrap();
                let expected = zoom(&src, factor, &Unstoppable).unwrap();
                let actual = zoom_rows(&src, factor, &Unstoppable).unwrap();
                assert_eq!(actual, expected, "{w}x{h} factor {f}");
            }
        }
    }
}
