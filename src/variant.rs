//! Interchangeable window/zoom implementations.
//!
//! Every variant produces byte-identical output to the scalar reference;
//! they differ only in how the copies are organized.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use enough::Stop;

use crate::crop;
use crate::error::{BitmapError, ValidationError};
use crate::geometry::{Rect, ScaleFactor};
use crate::pixel::PixelBuffer;
use crate::zoom;

/// A window extractor plus a zoom engine.
pub trait Resampler {
    /// Copy `rect` out of `source`.
    fn crop(&self, source: &PixelBuffer, rect: Rect, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError>;

    /// Nearest-neighbor upscale by `factor`.
    fn zoom(&self, source: &PixelBuffer, factor: ScaleFactor, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError>;
}

/// Built-in implementations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Per-pixel reference: seed, then fill each pixel from its parent.
    Scalar,
    /// Row kernels over a precomputed column map; repeated rows are
    /// whole-row copies. Uses SIMD dispatch with the `simd` feature.
    #[default]
    Vectorized,
    /// Run-length row expansion; splits rows across threads with the
    /// `rayon` feature on large outputs.
    AlternateVectorized,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Self::Scalar, Self::Vectorized, Self::AlternateVectorized];

    /// Map the numeric execution modes of the original tool:
    /// 0 SIMD, 1 SISD, 2 C, 3 improved SIMD zoom.
    pub fn from_mode(mode: i64) -> Result<Self, ValidationError> {
        match mode {
            0 => Ok(Self::Vectorized),
            1 | 2 => Ok(Self::Scalar),
            3 => Ok(Self::AlternateVectorized),
            other => Err(ValidationError::UnknownVariant(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vectorized => "vectorized",
            Self::AlternateVectorized => "alternate-vectorized",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ValidationError;

    /// Accepts the variant names or the original numeric modes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(mode) = s.parse::<i64>() {
            return Self::from_mode(mode);
        }
        match s.to_ascii_lowercase().as_str() {
            "scalar" | "c" | "sisd" => Ok(Self::Scalar),
            "vectorized" | "simd" => Ok(Self::Vectorized),
            "alternate-vectorized" | "alternate" | "improved" => Ok(Self::AlternateVectorized),
            _ => Err(ValidationError::UnknownVariant(s.to_string())),
        }
    }
}

impl Resampler for Variant {
    fn crop(&self, source: &PixelBuffer, rect: Rect, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
        match self {
            Self::Scalar => crop::crop(source, rect, stop),
            // The improved variant only changes the zoom.
            Self::Vectorized | Self::AlternateVectorized => crop::crop_rows(source, rect, stop),
        }
    }

    fn zoom(&self, source: &PixelBuffer, factor: ScaleFactor, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
        match self {
            Self::Scalar => zoom::zoom(source, factor, stop),
            Self::Vectorized => zoom::zoom_rows(source, factor, stop),
            Self::AlternateVectorized => zoom::zoom_spans(source, factor, stop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    #[test]
    fn numeric_modes() {
        assert_eq!(Variant::from_mode(0), Ok(Variant::Vectorized));
        assert_eq!(Variant::from_mode(1), Ok(Variant::Scalar));
        assert_eq!(Variant::from_mode(2), Ok(Variant::Scalar));
        assert_eq!(Variant::from_mode(3), Ok(Variant::AlternateVectorized));
        assert_eq!(
            Variant::from_mode(4),
            Err(ValidationError::UnknownVariant("4".into()))
        );
        assert!(Variant::from_mode(-1).is_err());
    }

    #[test]
    fn parse_names() {
        assert_eq!("scalar".parse(), Ok(Variant::Scalar));
        assert_eq!(" SIMD ".parse(), Ok(Variant::Vectorized));
        assert_eq!("alternate-vectorized".parse(), Ok(Variant::AlternateVectorized));
        assert_eq!("3".parse(), Ok(Variant::AlternateVectorized));
        assert!("fast".parse::<Variant>().is_err());
        for v in Variant::ALL {
            assert_eq!(v.to_string().parse(), Ok(v));
        }
    }

    #[test]
    fn all_variants_agree() {
        let data: Vec<u8> = (0..11 * 9 * 3).map(|i| (i * 13 % 256) as u8).collect();
        let src = PixelBuffer::from_vec(data, 11, 9).unwrap();
        let rect = Rect::new(2, 1, 7, 6);
        let reference = {
            let window = Variant::Scalar.crop(&src, rect, &Unstoppable).unwrap();
            Variant::Scalar
                .zoom(&window, ScaleFactor::new(4).unwrap(), &Unstoppable)
                .unwrap()
        };
        for v in Variant::ALL {
            let window = v.crop(&src, rect, &Unstoppable).unwrap();
            let out = v.zoom(&window, ScaleFactor::new(4).unwrap(), &Unstoppable).unwrap();
            assert_eq!(out, reference, "{v}");
        }
    }
}
