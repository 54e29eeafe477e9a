use alloc::vec::Vec;

use crate::error::BitmapError;

/// Bytes per pixel of every buffer in this crate (blue, green, red).
pub const BYTES_PER_PIXEL: usize = 3;

/// Owned, unpadded BGR pixel buffer.
///
/// Rows are stored in the order they appear in the bitmap file, so row 0
/// is the bottom scanline of a bottom-up BMP. `stride() == width * 3`
/// always holds; row padding only exists on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer, reporting allocation failure as
    /// [`BitmapError::OutOfMemory`].
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            data: try_alloc_zeroed(len)?,
            width,
            height,
        })
    }

    /// Wrap existing BGR bytes. `data.len()` must be exactly `width * height * 3`.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32) -> Result<Self, BitmapError> {
        let needed = buffer_len(width, height)?;
        if data.len() < needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        if data.len() != needed {
            return Err(BitmapError::BufferSizeMismatch {
                expected: needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// BGR bytes of pixel `(x, y)`. Panics if out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, bgr: [u8; 3]) {
        let i = self.index(x, y);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&bgr);
    }

    /// Row `y` as a byte slice of length `stride()`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        &self.data[y as usize * stride..][..stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        &mut self.data[y as usize * stride..][..stride]
    }

    /// Iterate rows in storage order.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride().max(1))
    }

    /// Copy the pixels out in RGB byte order.
    pub fn to_rgb(&self) -> Result<Vec<u8>, BitmapError> {
        let mut out = try_alloc_zeroed(self.data.len())?;
        bgr_to_rgb(&self.data, &mut out)?;
        Ok(out)
    }
}

#[cfg(feature = "simd")]
fn bgr_to_rgb(src: &[u8], dst: &mut [u8]) -> Result<(), BitmapError> {
    // garb rejects empty buffers.
    if src.is_empty() {
        return Ok(());
    }
    garb::bytes::bgr_to_rgb(src, dst).map_err(|_| BitmapError::BufferSizeMismatch {
        expected: src.len(),
        actual: dst.len(),
    })
}

#[cfg(not(feature = "simd"))]
fn bgr_to_rgb(src: &[u8], dst: &mut [u8]) -> Result<(), BitmapError> {
    if src.len() != dst.len() || src.len() % BYTES_PER_PIXEL != 0 {
        return Err(BitmapError::BufferSizeMismatch {
            expected: src.len(),
            actual: dst.len(),
        });
    }
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
    Ok(())
}

/// `width * height * 3`, or `DimensionsTooLarge` on overflow.
pub(crate) fn buffer_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// Zero-filled allocation that fails with `OutOfMemory` instead of aborting.
pub(crate) fn try_alloc_zeroed(bytes: usize) -> Result<Vec<u8>, BitmapError> {
    let mut v = Vec::new();
    v.try_reserve_exact(bytes)
        .map_err(|_| BitmapError::OutOfMemory { bytes })?;
    v.resize(bytes, 0);
    Ok(v)
}
