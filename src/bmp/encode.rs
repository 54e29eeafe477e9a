//! BMP encoder: uncompressed 24-bit, bottom-up, rows padded to 4 bytes.

use alloc::vec::Vec;

use enough::Stop;

use super::HeaderStyle;
use super::header::{BitmapHeader, HEADER_LEN, row_padding};
use crate::error::BitmapError;
use crate::pixel::buffer_len;

/// Encode `width x height` BGR pixels (already scaled) to BMP bytes.
///
/// Rows are written in buffer order, so a buffer decoded from a bottom-up
/// file comes back out in the same orientation.
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    style: HeaderStyle,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let expected = buffer_len(width, height)?;
    if pixels.len() < expected {
        return Err(BitmapError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }
    if pixels.len() != expected {
        return Err(BitmapError::BufferSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    stop.check()?;

    let header = match style {
        HeaderStyle::Reference => BitmapHeader::reference(width, height)?,
        HeaderStyle::Standard => BitmapHeader::standard(width, height)?,
    };

    let w = width as usize;
    let h = height as usize;
    let pad_bytes = row_padding(width);
    let total = (w * 3 + pad_bytes)
        .checked_mul(h)
        .and_then(|n| n.checked_add(HEADER_LEN))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    let mut out = Vec::new();
    out.try_reserve_exact(total)
        .map_err(|_| BitmapError::OutOfMemory { bytes: total })?;
    header.write_to(&mut out);

    if pad_bytes == 0 {
        log::debug!(target: "zenzoom::write", "Width is multiple of 4. No padding needed");
        out.extend_from_slice(pixels);
    } else {
        log::debug!(target: "zenzoom::write", "Padding per row: {pad_bytes}");
        for (y, row) in pixels.chunks_exact(w * 3).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            log::trace!(target: "zenzoom::write", "Write row: {y}");
            out.extend_from_slice(row);
            out.extend(core::iter::repeat_n(0u8, pad_bytes));
        }
        log::debug!(target: "zenzoom::write", "All rows finished");
    }

    Ok(out)
}
