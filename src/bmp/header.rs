//! The fixed 54-byte BMP header (BITMAPFILEHEADER + BITMAPINFOHEADER).

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Size of the file header plus the 40-byte info header.
pub const HEADER_LEN: usize = 54;
pub(crate) const FILE_HEADER_LEN: u32 = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;

/// Resolution written by [`super::HeaderStyle::Standard`] (72 DPI).
const STANDARD_PELS_PER_METER: i32 = 2835;

/// Vertical resolution byte written by the reference encoder (info-header
/// byte 28, file byte 42). The bit depth is unaffected.
const REFERENCE_Y_PELS_PER_METER: i32 = 32;

/// Parsed header fields, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    /// Positive for bottom-up row order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

// ── Cursor for reading little-endian fields ────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos += N;
        Ok(out)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

impl BitmapHeader {
    /// Read all 54 header bytes. Only length is checked here; what the
    /// fields must contain depends on the decode mode.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        if data.len() < HEADER_LEN {
            return Err(BitmapError::UnexpectedEof);
        }
        let mut c = Cursor::new(data);
        let magic = c.read_fixed_bytes::<2>()?;
        let file_size = c.get_u32_le()?;
        c.read_fixed_bytes::<4>()?; // reserved
        let data_offset = c.get_u32_le()?;
        Ok(Self {
            magic,
            file_size,
            data_offset,
            info_size: c.get_u32_le()?,
            width: c.get_i32_le()?,
            height: c.get_i32_le()?,
            planes: c.get_u16_le()?,
            bits_per_pixel: c.get_u16_le()?,
            compression: c.get_u32_le()?,
            image_size: c.get_u32_le()?,
            x_pels_per_meter: c.get_i32_le()?,
            y_pels_per_meter: c.get_i32_le()?,
            colors_used: c.get_u32_le()?,
            colors_important: c.get_u32_le()?,
        })
    }

    /// Header for a 24-bit bottom-up image as the reference encoder wrote
    /// it: size fields count unpadded pixel bytes and the vertical
    /// resolution is 32.
    pub(crate) fn reference(width: u32, height: u32) -> Result<Self, BitmapError> {
        let image_size = sized(width, height, width as usize * 3)?;
        Self::for_24bit(width, height, image_size, 0, REFERENCE_Y_PELS_PER_METER)
    }

    /// Header with padded size fields and 72 DPI resolution.
    pub(crate) fn standard(width: u32, height: u32) -> Result<Self, BitmapError> {
        let image_size = sized(width, height, padded_row_len(width))?;
        Self::for_24bit(
            width,
            height,
            image_size,
            STANDARD_PELS_PER_METER,
            STANDARD_PELS_PER_METER,
        )
    }

    fn for_24bit(
        width: u32,
        height: u32,
        image_size: u32,
        x_pels_per_meter: i32,
        y_pels_per_meter: i32,
    ) -> Result<Self, BitmapError> {
        let too_large = BitmapError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large)?;
        let h = i32::try_from(height)
            .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        let file_size = image_size
            .checked_add(HEADER_LEN as u32)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            magic: *b"BM",
            file_size,
            data_offset: HEADER_LEN as u32,
            info_size: INFO_HEADER_LEN,
            width: w,
            height: h,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size,
            x_pels_per_meter,
            y_pels_per_meter,
            colors_used: 0,
            colors_important: 0,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&self.data_offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&self.info_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// Zero bytes appended to each on-disk row of a 24-bit image.
pub fn row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// On-disk bytes per row, padded to a multiple of 4.
pub fn padded_row_len(width: u32) -> usize {
    width as usize * 3 + row_padding(width)
}

fn sized(width: u32, height: u32, row_len: usize) -> Result<u32, BitmapError> {
    row_len
        .checked_mul(height as usize)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_reaches_next_multiple_of_four() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
        assert_eq!(padded_row_len(5), 16);
    }

    #[test]
    fn reference_header_bytes() {
        let mut out = Vec::new();
        BitmapHeader::reference(3, 2).unwrap().write_to(&mut out);
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(&out[0..2], b"BM");
        // 3*2*3 = 18 unpadded bytes + 54
        assert_eq!(&out[2..6], &72u32.to_le_bytes());
        assert_eq!(&out[10..14], &54u32.to_le_bytes());
        assert_eq!(&out[14..18], &40u32.to_le_bytes());
        assert_eq!(&out[18..22], &3i32.to_le_bytes());
        assert_eq!(&out[22..26], &2i32.to_le_bytes());
        assert_eq!(&out[26..28], &1u16.to_le_bytes());
        assert_eq!(&out[28..30], &24u16.to_le_bytes());
        assert_eq!(&out[34..38], &18u32.to_le_bytes());
        assert_eq!(out[42], 32);
        assert!(out[38..42].iter().all(|&b| b == 0));
        assert!(out[43..54].iter().all(|&b| b == 0));
    }

    #[test]
    fn standard_header_counts_padding() {
        let header = BitmapHeader::standard(3, 2).unwrap();
        assert_eq!(header.image_size, 24);
        assert_eq!(header.file_size, 78);
        assert_eq!(header.y_pels_per_meter, 2835);
    }

    #[test]
    fn parse_roundtrips_written_header() {
        let header = BitmapHeader::standard(7, 5).unwrap();
        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(BitmapHeader::parse(&out).unwrap(), header);
    }

    #[test]
    fn short_header_is_eof() {
        assert!(matches!(
            BitmapHeader::parse(&[0u8; 53]),
            Err(BitmapError::UnexpectedEof)
        ));
    }
}
