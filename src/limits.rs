/// Resource limits for decode and zoom operations.
///
/// All fields default to `None` (no limit). A service running several
/// jobs at once can bound each job's buffers with these.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for a single pixel buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), crate::BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Dimension and memory checks for a 3-byte-per-pixel buffer.
    pub(crate) fn check_bgr(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        self.check(width, height)?;
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(3))
            .ok_or(crate::BitmapError::DimensionsTooLarge { width, height })?;
        self.check_memory(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapError;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(usize::MAX).is_ok());
    }

    #[test]
    fn bgr_check_counts_three_bytes_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        assert!(limits.check_bgr(10, 10).is_ok());
        match limits.check_bgr(10, 11) {
            Err(BitmapError::LimitExceeded(_)) => {}
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }
}
