//! Uncompressed 24-bit BMP decoder and encoder.
//!
//! Decoded buffers keep the file's row order (row 0 is the bottom
//! scanline) and carry no row padding. The encoder writes rows back in
//! the same order, padding each to a multiple of 4 bytes.

mod decode;
mod encode;
mod header;

pub use header::{BitmapHeader, HEADER_LEN, padded_row_len, row_padding};

use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::geometry::ScaleFactor;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Controls how much of the header the decoder trusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Everything in `Standard`, plus planes == 1, info header size >= 40
    /// and a file size field that matches the input length.
    Strict,

    /// Check magic, bit depth, compression and pixel offset; read rows
    /// honoring the on-disk 4-byte padding.
    #[default]
    Standard,

    /// Trust the header and read `width * height * 3` contiguous bytes
    /// from offset 54, ignoring row padding. Only correct for widths
    /// whose row byte count is already a multiple of 4; kept for
    /// byte-compatibility with the reference tool.
    Reference,
}

/// Which header bytes the encoder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// Byte-identical to the reference tool: file and image size fields
    /// count unpadded pixel bytes, horizontal resolution 0, vertical
    /// resolution 32.
    #[default]
    Reference,

    /// File and image size fields include row padding; 72 DPI resolution.
    Standard,
}

/// Builder for decoding BMP bytes.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    mode: DecodeMode,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            mode: DecodeMode::default(),
            limits: None,
        }
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
        let header = BitmapHeader::parse(self.data)?;
        decode::decode_pixels(self.data, &header, self.mode, self.limits, stop)
    }
}

/// Builder for encoding BMP bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    style: HeaderStyle,
    factor: Option<ScaleFactor>,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_style(mut self, style: HeaderStyle) -> Self {
        self.style = style;
        self
    }

    /// Declare that the pixels passed to [`encode`](Self::encode) are
    /// already zoomed by `factor`, so the given width and height are
    /// multiplied before being written.
    pub fn with_scale_factor(mut self, factor: ScaleFactor) -> Self {
        self.factor = Some(factor);
        self
    }

    /// Encode `pixels` as a BMP of `width * factor` by `height * factor`.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, BitmapError> {
        let (w, h) = self.output_dimensions(width, height)?;
        encode::encode_bmp(pixels, w, h, self.style, stop)
    }

    /// Encode a buffer at its own dimensions.
    pub fn encode_buffer(&self, buf: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
        encode::encode_bmp(buf.as_bytes(), buf.width(), buf.height(), self.style, stop)
    }

    /// Encode and write to `path`.
    #[cfg(feature = "std")]
    pub fn write(
        &self,
        path: impl AsRef<std::path::Path>,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        let bytes = self.encode(pixels, width, height, stop)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::debug!(target: "zenzoom::write", "Wrote {}", path.as_ref().display());
        Ok(())
    }

    fn output_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32), BitmapError> {
        let factor = self.factor.unwrap_or(ScaleFactor::ONE);
        match (factor.apply(width), factor.apply(height)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(BitmapError::DimensionsTooLarge { width, height }),
        }
    }
}

/// Parse the header without decoding pixels.
pub fn probe(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    BitmapHeader::parse(data)
}

/// Decode BMP bytes with the default (padding-aware) mode.
pub fn decode_bmp(data: &[u8], stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a buffer with reference-compatible header bytes.
pub fn encode_bmp(buf: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode_buffer(buf, stop)
}

/// Read a bitmap file with the default mode.
#[cfg(feature = "std")]
pub fn read(path: impl AsRef<std::path::Path>, stop: &dyn Stop) -> Result<PixelBuffer, BitmapError> {
    read_with(path, DecodeMode::default(), None, stop)
}

/// Read a bitmap file with an explicit mode and optional limits.
#[cfg(feature = "std")]
pub fn read_with(
    path: impl AsRef<std::path::Path>,
    mode: DecodeMode,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let data = std::fs::read(path.as_ref())?;
    let mut request = DecodeRequest::new(&data).with_mode(mode);
    if let Some(limits) = limits {
        request = request.with_limits(limits);
    }
    request.decode(stop)
}

/// Write `pixels` (already zoomed by `factor`) as a bitmap of
/// `width * factor` by `height * factor`.
#[cfg(feature = "std")]
pub fn write(
    path: impl AsRef<std::path::Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
    factor: ScaleFactor,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    EncodeRequest::new()
        .with_scale_factor(factor)
        .write(path, pixels, width, height, stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height * 3).map(|i| (i * 7 % 251) as u8).collect();
        PixelBuffer::from_vec(data, width, height).unwrap()
    }

    #[test]
    fn standard_roundtrip_unpadded_and_padded_widths() {
        for width in [1u32, 2, 3, 4, 5, 8, 13] {
            let buf = gradient(width, 3);
            let encoded = encode_bmp(&buf, &Unstoppable).unwrap();
            let decoded = decode_bmp(&encoded, &Unstoppable).unwrap();
            assert_eq!(decoded, buf, "width {width}");
        }
    }

    #[test]
    fn reference_mode_matches_standard_for_aligned_width() {
        let buf = gradient(8, 4);
        let encoded = encode_bmp(&buf, &Unstoppable).unwrap();
        let reference = DecodeRequest::new(&encoded)
            .with_mode(DecodeMode::Reference)
            .decode(&Unstoppable)
            .unwrap();
        assert_eq!(reference, buf);
    }

    #[test]
    fn reference_mode_ignores_padding() {
        // 1x2 image: row bytes [1,2,3,pad] [4,5,6,pad]
        let buf = PixelBuffer::from_vec(vec![1, 2, 3, 4, 5, 6], 1, 2).unwrap();
        let encoded = encode_bmp(&buf, &Unstoppable).unwrap();
        let reference = DecodeRequest::new(&encoded)
            .with_mode(DecodeMode::Reference)
            .decode(&Unstoppable)
            .unwrap();
        // Second pixel starts on the first row's padding byte.
        assert_eq!(reference.as_bytes(), &[1, 2, 3, 0, 4, 5]);
    }

    #[test]
    fn reference_mode_skips_magic_check() {
        let buf = gradient(4, 1);
        let mut encoded = encode_bmp(&buf, &Unstoppable).unwrap();
        encoded[0] = b'X';
        assert!(matches!(
            decode_bmp(&encoded, &Unstoppable),
            Err(BitmapError::InvalidHeader(_))
        ));
        let decoded = DecodeRequest::new(&encoded)
            .with_mode(DecodeMode::Reference)
            .decode(&Unstoppable)
            .unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn strict_mode_rejects_reference_size_field_on_padded_rows() {
        let buf = gradient(3, 2);
        let reference = encode_bmp(&buf, &Unstoppable).unwrap();
        assert!(matches!(
            DecodeRequest::new(&reference)
                .with_mode(DecodeMode::Strict)
                .decode(&Unstoppable),
            Err(BitmapError::InvalidHeader(_))
        ));

        let standard = EncodeRequest::new()
            .with_header_style(HeaderStyle::Standard)
            .encode_buffer(&buf, &Unstoppable)
            .unwrap();
        let decoded = DecodeRequest::new(&standard)
            .with_mode(DecodeMode::Strict)
            .decode(&Unstoppable)
            .unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn unsupported_bit_depth() {
        let mut encoded = encode_bmp(&gradient(4, 1), &Unstoppable).unwrap();
        encoded[28] = 32;
        assert!(matches!(
            decode_bmp(&encoded, &Unstoppable),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn truncated_pixels_are_eof() {
        let encoded = encode_bmp(&gradient(4, 4), &Unstoppable).unwrap();
        let cut = &encoded[..encoded.len() - 1];
        assert!(matches!(
            decode_bmp(cut, &Unstoppable),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn bare_header_with_huge_dimensions_is_eof() {
        let mut bare = Vec::new();
        BitmapHeader::reference(20_000, 20_000).unwrap().write_to(&mut bare);
        assert_eq!(bare.len(), HEADER_LEN);
        for mode in [DecodeMode::Standard, DecodeMode::Reference] {
            assert!(matches!(
                DecodeRequest::new(&bare).with_mode(mode).decode(&Unstoppable),
                Err(BitmapError::UnexpectedEof)
            ));
        }
    }

    #[test]
    fn limits_reject_large() {
        let encoded = encode_bmp(&gradient(4, 4), &Unstoppable).unwrap();
        let limits = Limits {
            max_pixels: Some(15),
            ..Default::default()
        };
        match DecodeRequest::new(&encoded)
            .with_limits(&limits)
            .decode(&Unstoppable)
        {
            Err(BitmapError::LimitExceeded(_)) => {}
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn scale_factor_multiplies_written_dimensions() {
        let pixels = vec![9u8; 2 * 2 * 4 * 4 * 3];
        let encoded = EncodeRequest::new()
            .with_scale_factor(ScaleFactor::new(4).unwrap())
            .encode(&pixels, 2, 2, &Unstoppable)
            .unwrap();
        let header = probe(&encoded).unwrap();
        assert_eq!((header.width, header.height), (8, 8));
    }
}
