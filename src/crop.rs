//! Window extraction: copy a rectangle out of a larger buffer.

use enough::Stop;

use crate::error::BitmapError;
use crate::geometry::Rect;
use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

/// Copy `rect` out of `source` into a new, independent buffer.
///
/// This is the per-pixel reference; [`crate::Variant`] selects faster
/// kernels with identical output.
pub fn crop(source: &PixelBuffer, rect: Rect, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
    let mut out = prepare(source, rect)?;
    let x = rect.x as usize;
    for row in 0..rect.height {
        if row % 16 == 0 {
            stop.check()?;
        }
        let src_row = source.row(rect.y + row);
        let dst_row = out.row_mut(row);
        for col in 0..rect.width as usize {
            let s = (x + col) * BYTES_PER_PIXEL;
            let d = col * BYTES_PER_PIXEL;
            dst_row[d] = src_row[s];
            dst_row[d + 1] = src_row[s + 1];
            dst_row[d + 2] = src_row[s + 2];
        }
    }
    Ok(out)
}

/// Row-at-a-time copy; each destination row is one slice copy.
pub(crate) fn crop_rows(
    source: &PixelBuffer,
    rect: Rect,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut out = prepare(source, rect)?;
    let start = rect.x as usize * BYTES_PER_PIXEL;
    let len = out.stride();
    let src_stride = source.stride();
    let src = source.as_bytes();
    for (row, dst_row) in out.as_bytes_mut().chunks_exact_mut(len).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let offset = (rect.y as usize + row) * src_stride + start;
        dst_row.copy_from_slice(&src[offset..offset + len]);
    }
    Ok(out)
}

/// Validate the window and allocate the destination.
fn prepare(source: &PixelBuffer, rect: Rect) -> Result<PixelBuffer, BitmapError> {
    rect.check_within(source.width(), source.height())?;
    log::debug!(
        target: "zenzoom::window",
        "Window offset {} : {}, dimensions {} : {}, source width {}",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        source.width()
    );
    PixelBuffer::new(rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                buf.set_pixel(x, y, [x as u8, y as u8, (x * 16 + y) as u8]);
            }
        }
        buf
    }

    #[test]
    fn window_origin_maps_to_offset() {
        let src = numbered(10, 10);
        let rect = Rect::new(2, 3, 4, 4);
        let out = crop(&src, rect, &Unstoppable).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        assert_eq!(out.pixel(0, 0), src.pixel(2, 3));
        assert_eq!(out.pixel(3, 3), src.pixel(5, 6));
    }

    #[test]
    fn full_window_is_identity() {
        let src = numbered(7, 5);
        let out = crop(&src, Rect::full(7, 5), &Unstoppable).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn row_kernel_matches_reference() {
        let src = numbered(9, 7);
        let rects = [
            Rect::new(0, 0, 9, 7),
            Rect::new(1, 2, 3, 4),
            Rect::new(8, 6, 1, 1),
            Rect::new(0, 6, 9, 1),
        ];
        for rect in rects {
            let a = crop(&src, rect, &Unstoppable).unwrap();
            let b = crop_rows(&src, rect, &Unstoppable).unwrap();
            assert_eq!(a, b, "{rect:?}");
        }
    }

    #[test]
    fn result_does_not_alias_source() {
        let mut src = numbered(4, 4);
        let out = crop(&src, Rect::new(1, 1, 2, 2), &Unstoppable).unwrap();
        let before: Vec<u8> = out.as_bytes().to_vec();
        src.set_pixel(1, 1, [255, 255, 255]);
        assert_eq!(out.as_bytes(), &before[..]);
    }

    #[test]
    fn out_of_bounds_window_is_rejected() {
        let src = numbered(10, 10);
        match crop(&src, Rect::new(8, 0, 4, 4), &Unstoppable) {
            Err(BitmapError::Validation(ValidationError::OutOfBounds { .. })) => {}
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }
}
