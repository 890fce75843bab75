//! IHDR data model and derived scanline geometry.

use crate::error::{Error, Result};

/// Maximum accepted dimension per side (16 million pixels). Larger
/// headers are rejected before any buffer is sized from them.
const MAX_DIMENSION: u32 = 1 << 24;

/// PNG color type values from the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    /// One grayscale channel.
    Grayscale = 0,
    /// Red, green, blue.
    Rgb = 2,
    /// One palette-index channel (indices are returned as-is; palette
    /// expansion is out of scope).
    Indexed = 3,
    /// Grayscale plus alpha.
    GrayscaleAlpha = 4,
    /// Red, green, blue, alpha.
    Rgba = 6,
}

impl ColorType {
    /// Number of channels carried per pixel.
    pub fn channels(self) -> usize {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ColorType::Grayscale),
            2 => Ok(ColorType::Rgb),
            3 => Ok(ColorType::Indexed),
            4 => Ok(ColorType::GrayscaleAlpha),
            6 => Ok(ColorType::Rgba),
            _ => Err(Error::UnsupportedColorType(value)),
        }
    }
}

/// Decoded IHDR chunk fields. Immutable once parsed.
#[derive(Debug, Clone, Copy)]
pub struct ImageHeader {
    /// Image width in pixels (> 0).
    pub width: u32,
    /// Image height in pixels (> 0).
    pub height: u32,
    /// Bits per channel (8 or 16 for the types this decoder accepts).
    pub bit_depth: u8,
    /// Color type.
    pub color_type: ColorType,
    /// Compression method (always 0 for zlib/DEFLATE).
    pub compression_method: u8,
    /// Filter method (always 0).
    pub filter_method: u8,
    /// Interlace method (0 = none; Adam7 is rejected).
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Decode and validate the 13 IHDR data bytes.
    pub(crate) fn from_ihdr(data: &[u8]) -> Result<Self> {
        if data.len() != 13 {
            return Err(Error::InvalidHeaderLength(data.len()));
        }

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let bit_depth = data[8];
        let color_type = ColorType::try_from(data[9])?;

        let header = ImageHeader {
            width,
            height,
            bit_depth,
            color_type,
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }

        // Byte-addressable depths only: sub-byte packing would silently
        // truncate in the bytes-per-pixel arithmetic below.
        let valid_depth = match self.color_type {
            ColorType::Indexed => self.bit_depth == 8,
            _ => matches!(self.bit_depth, 8 | 16),
        };
        if !valid_depth {
            return Err(Error::UnsupportedBitDepth {
                bit_depth: self.bit_depth,
                color_type: self.color_type as u8,
            });
        }

        if self.compression_method != 0 {
            return Err(Error::Unsupported(format!(
                "compression method {}",
                self.compression_method
            )));
        }
        if self.filter_method != 0 {
            return Err(Error::Unsupported(format!(
                "filter method {}",
                self.filter_method
            )));
        }
        if self.interlace_method != 0 {
            return Err(Error::Unsupported(
                "Adam7 interlaced images".to_string(),
            ));
        }
        Ok(())
    }

    /// Bytes per pixel in the filtered and reconstructed buffers.
    pub fn bytes_per_pixel(&self) -> usize {
        self.bit_depth as usize * self.color_type.channels() / 8
    }

    /// Bytes per reconstructed scanline (no filter byte).
    ///
    /// Saturates rather than wraps; [`filtered_len`](Self::filtered_len)
    /// turns a saturated value into an error.
    pub fn scanline_len(&self) -> usize {
        (self.width as usize).saturating_mul(self.bytes_per_pixel())
    }

    /// Exact decompressed size of the IDAT payload:
    /// one filter byte plus one scanline, per row.
    ///
    /// Checked arithmetic: a header whose geometry does not fit in
    /// `usize` is an error, never a panic.
    pub fn filtered_len(&self) -> Result<usize> {
        self.scanline_len()
            .checked_add(1)
            .and_then(|row_len| row_len.checked_mul(self.height as usize))
            .ok_or(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
    }
}
