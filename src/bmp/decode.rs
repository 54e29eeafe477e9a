//! 24-bit BMP decoder.

use alloc::format;

use enough::Stop;

use super::DecodeMode;
use super::header::{BitmapHeader, HEADER_LEN, padded_row_len};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer, buffer_len};

/// Validate the header fields the chosen mode relies on and return the
/// image dimensions.
pub(crate) fn check_header(header: &BitmapHeader, mode: DecodeMode) -> Result<(u32, u32), BitmapError> {
    if header.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "width {} is not positive",
            header.width
        )));
    }
    if header.height == 0 {
        return Err(BitmapError::InvalidHeader("height is zero".into()));
    }

    if mode == DecodeMode::Reference {
        // The header is trusted; only a size we cannot allocate is refused.
        if header.height < 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "height {} is not positive",
                header.height
            )));
        }
        return Ok((header.width as u32, header.height as u32));
    }

    if &header.magic != b"BM" {
        return Err(BitmapError::InvalidHeader(format!(
            "bad magic bytes {:02x?}",
            header.magic
        )));
    }
    if header.height < 0 {
        return Err(BitmapError::UnsupportedVariant(
            "top-down row order".into(),
        ));
    }
    if header.bits_per_pixel != 24 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "{} bits per pixel (only 24 is supported)",
            header.bits_per_pixel
        )));
    }
    if header.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "compression type {}",
            header.compression
        )));
    }
    if (header.data_offset as usize) < HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {} overlaps the header",
            header.data_offset
        )));
    }

    if mode == DecodeMode::Strict {
        if header.planes != 1 {
            return Err(BitmapError::InvalidHeader(format!(
                "planes is {}, expected 1",
                header.planes
            )));
        }
        if header.info_size < super::header::INFO_HEADER_LEN {
            return Err(BitmapError::InvalidHeader(format!(
                "info header size {} is smaller than 40",
                header.info_size
            )));
        }
    }

    Ok((header.width as u32, header.height as u32))
}

/// Decode the pixel array into an unpadded buffer in file row order.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BitmapHeader,
    mode: DecodeMode,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let (width, height) = check_header(header, mode)?;
    if let Some(limits) = limits {
        limits.check_bgr(width, height)?;
    }

    log::debug!(
        target: "zenzoom::read",
        "Input data dimensions: {width} : {height} ({mode:?})"
    );

    if mode == DecodeMode::Strict && header.file_size as usize != data.len() {
        return Err(BitmapError::InvalidHeader(format!(
            "file size field {} does not match actual size {}",
            header.file_size,
            data.len()
        )));
    }

    let len = buffer_len(width, height)?;
    stop.check()?;

    if mode == DecodeMode::Reference {
        // Rows are taken back to back from byte 54, padding or not.
        let src = data
            .get(HEADER_LEN..)
            .and_then(|d| d.get(..len))
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut out = PixelBuffer::new(width, height)?;
        out.as_bytes_mut().copy_from_slice(src);
        return Ok(out);
    }

    let src_stride = padded_row_len(width);
    let row_len = width as usize * BYTES_PER_PIXEL;
    let offset = header.data_offset as usize;
    // The last row may omit its trailing padding.
    let needed = src_stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(row_len))
        .and_then(|n| n.checked_add(offset))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut out = PixelBuffer::new(width, height)?;
    let pixel_data = &data[offset..];
    for (row, dst) in out.as_bytes_mut().chunks_exact_mut(row_len).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let start = row * src_stride;
        dst.copy_from_slice(&pixel_data[start..start + row_len]);
    }

    Ok(out)
}
