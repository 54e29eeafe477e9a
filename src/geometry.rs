//! Window rectangles and scale factors.

use core::num::NonZeroU32;

use crate::error::ValidationError;

/// A window in source-buffer coordinates.
///
/// `y` counts rows in storage order (see [`crate::PixelBuffer`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole `width x height` source.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Check that the window is non-empty and lies inside the source.
    ///
    /// Checks run in the order the original tool reported them: size
    /// first, then offset + size, then zero dimensions.
    pub fn check_within(&self, source_width: u32, source_height: u32) -> Result<(), ValidationError> {
        if self.width > source_width || self.height > source_height {
            return Err(ValidationError::WindowTooLarge {
                width: self.width,
                height: self.height,
                source_width,
                source_height,
            });
        }
        if self.right() > u64::from(source_width) || self.bottom() > u64::from(source_height) {
            return Err(ValidationError::OutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                source_width,
                source_height,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::ZeroDimension);
        }
        Ok(())
    }

    pub fn is_full(&self, source_width: u32, source_height: u32) -> bool {
        *self == Self::full(source_width, source_height)
    }
}

/// Integer upscale factor, at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleFactor(NonZeroU32);

impl ScaleFactor {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    pub fn new(factor: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(factor)
            .map(Self)
            .ok_or(ValidationError::ZeroScaleFactor)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// `dimension * factor`, or `None` on overflow.
    pub fn apply(self, dimension: u32) -> Option<u32> {
        dimension.checked_mul(self.get())
    }
}

impl Default for ScaleFactor {
    /// The original tool zoomed by 3 unless told otherwise.
    fn default() -> Self {
        Self(NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_checks_follow_reporting_order() {
        assert_eq!(
            Rect::new(0, 0, 11, 4).check_within(10, 10),
            Err(ValidationError::WindowTooLarge {
                width: 11,
                height: 4,
                source_width: 10,
                source_height: 10,
            })
        );
        assert!(matches!(
            Rect::new(7, 0, 4, 4).check_within(10, 10),
            Err(ValidationError::OutOfBounds { .. })
        ));
        assert_eq!(
            Rect::new(0, 0, 0, 4).check_within(10, 10),
            Err(ValidationError::ZeroDimension)
        );
        assert!(Rect::new(6, 6, 4, 4).check_within(10, 10).is_ok());
    }

    #[test]
    fn offset_overflow_is_out_of_bounds() {
        assert!(matches!(
            Rect::new(u32::MAX, 0, 1, 1).check_within(10, 10),
            Err(ValidationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn scale_factor_rejects_zero() {
        assert_eq!(ScaleFactor::new(0), Err(ValidationError::ZeroScaleFactor));
        assert_eq!(ScaleFactor::ONE.get(), 1);
        assert_eq!(ScaleFactor::default().get(), 3);
        assert_eq!(ScaleFactor::new(4).unwrap().apply(5), Some(20));
        assert_eq!(ScaleFactor::new(2).unwrap().apply(u32::MAX), None);
    }
}
