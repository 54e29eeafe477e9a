//! Reference zoom: seed every `factor`-th pixel, then fill from parents.

use enough::Stop;

use super::{alloc_output, parent_coordinate};
use crate::error::BitmapError;
use crate::geometry::ScaleFactor;
use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

pub(crate) fn zoom_scalar(
    source: &PixelBuffer,
    factor: ScaleFactor,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut out = alloc_output(source, factor)?;
    let f = factor.get();

    // Phase 1: source (px, py) -> destination (px*f, py*f).
    for py in 0..source.height() {
        if py % 16 == 0 {
            stop.check()?;
        }
        for px in 0..source.width() {
            log::trace!(
                target: "zenzoom::zoom",
                "Seed ({px}, {py}) -> ({}, {})",
                px * f,
                py * f
            );
            out.set_pixel(px * f, py * f, source.pixel(px, py));
        }
    }

    if f == 1 {
        return Ok(out);
    }

    // Phase 2: every pixel copies its parent. Parents are seeded pixels,
    // which copy onto themselves, so the traversal order is free.
    let (width, height) = (out.width(), out.height());
    let data = out.as_bytes_mut();
    for dx in 0..width {
        if dx % 16 == 0 {
            stop.check()?;
        }
        let parent_x = parent_coordinate(dx, f, width);
        for dy in 0..height {
            let parent_y = parent_coordinate(dy, f, height);
            let current = (dx as usize + dy as usize * width as usize) * BYTES_PER_PIXEL;
            let parent = (parent_x as usize + parent_y as usize * width as usize) * BYTES_PER_PIXEL;
            data.copy_within(parent..parent + BYTES_PER_PIXEL, current);
        }
    }

    Ok(out)
}
