//! Nearest-neighbor integer-factor zoom.
//!
//! Every destination pixel `(dx, dy)` takes its color from the seeded
//! pixel at
//!
//! ```text
//! parent = d + f/2 - ((d + f/2) mod f)     (per axis, integer division)
//! parent -= f   if parent == scaled length
//! ```
//!
//! where seeded pixels sit at multiples of `f`. The rule rounds toward
//! the next block from the middle of each block onward, so it is not
//! plain block replication (`d / f`), for odd factors included. All
//! kernels reproduce [`zoom`] bit for bit.

mod rows;
mod scalar;
mod spans;

#[cfg(feature = "rayon")]
mod parallel;

pub(crate) use rows::zoom_rows;
pub(crate) use spans::zoom_spans;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::geometry::ScaleFactor;
use crate::pixel::PixelBuffer;

/// Upscale `source` by `factor`; the reference two-phase algorithm.
pub fn zoom(source: &PixelBuffer, factor: ScaleFactor, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
    scalar::zoom_scalar(source, factor, stop)
}

/// Seeded coordinate that destination coordinate `d` copies from.
#[inline]
pub fn parent_coordinate(d: u32, factor: u32, scaled_len: u32) -> u32 {
    let factor = u64::from(factor);
    let shifted = u64::from(d) + factor / 2;
    let parent = shifted - shifted % factor;
    if parent == u64::from(scaled_len) {
        (parent - factor) as u32
    } else {
        parent as u32
    }
}

/// Source index (`parent / factor`) for every destination coordinate
/// along an axis of `len` source pixels.
pub(crate) fn source_index_map(len: u32, factor: u32) -> Result<Vec<u32>, BitmapError> {
    let scaled = len
        .checked_mul(factor)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: len,
            height: factor,
        })?;
    let mut map = Vec::new();
    map.try_reserve_exact(scaled as usize)
        .map_err(|_| BitmapError::OutOfMemory {
            bytes: scaled as usize * core::mem::size_of::<u32>(),
        })?;
    map.extend((0..scaled).map(|d| parent_coordinate(d, factor, scaled) / factor));
    Ok(map)
}

/// Allocate the `w*f x h*f` destination.
pub(crate) fn alloc_output(source: &PixelBuffer, factor: ScaleFactor) -> Result<PixelBuffer, BitmapError> {
    let (width, height) = (source.width(), source.height());
    match (factor.apply(width), factor.apply(height)) {
        (Some(w), Some(h)) => {
            log::debug!(
                target: "zenzoom::zoom",
                "Zoom {width}x{height} by {} to {w}x{h}",
                factor.get()
            );
            PixelBuffer::new(w, h)
        }
        _ => Err(BitmapError::DimensionsTooLarge { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn parent_rounds_from_block_middle() {
        // factor 3, 2 source pixels -> 6 destination pixels
        let parents: Vec<u32> = (0..6).map(|d| parent_coordinate(d, 3, 6)).collect();
        assert_eq!(parents, vec![0, 0, 3, 3, 3, 3]);
    }

    #[test]
    fn even_factor_edge_correction() {
        // factor 2, 3 source pixels -> 6; d = 5 lands on 6 and is pulled back
        let parents: Vec<u32> = (0..6).map(|d| parent_coordinate(d, 2, 6)).collect();
        assert_eq!(parents, vec![0, 2, 2, 4, 4, 4]);
    }

    #[test]
    fn factor_one_is_identity_map() {
        assert_eq!(source_index_map(4, 1).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn index_map_covers_every_source_pixel() {
        for factor in 1..=7 {
            for len in 1..=6 {
                let map = source_index_map(len, factor).unwrap();
                assert_eq!(map.len(), (len * factor) as usize);
                assert!(map.windows(2).all(|w| w[0] <= w[1]));
                assert_eq!(map[0], 0);
                assert_eq!(*map.last().unwrap(), len - 1);
            }
        }
    }
}
