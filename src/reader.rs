//! Top-level PNG reader: decode pipeline and pixel access.

use std::path::Path;

use log::debug;

use crate::chunk;
use crate::error::Result;
use crate::filter;
use crate::header::{ColorType, ImageHeader};
use crate::inflate;

/// A fully decoded PNG raster.
///
/// Construction runs the whole pipeline — container parse, inflate,
/// scanline reconstruction — to completion; on any failure no partial
/// buffer is exposed. Once built, the reader is immutable and may be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct PngReader {
    header: ImageHeader,
    pixels: Vec<u8>,
}

impl PngReader {
    /// Decode a PNG image from an in-memory byte stream.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let (header, payload) = chunk::parse(data)?;
        let filtered = inflate::inflate_exact(&payload, header.filtered_len()?)?;
        let pixels = filter::reconstruct(&filtered, &header)?;
        debug!(
            "decoded {}x{} image, {} pixel bytes",
            header.width,
            header.height,
            pixels.len()
        );
        Ok(PngReader { header, pixels })
    }

    /// Read and decode a PNG file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Bits per channel.
    pub fn bit_depth(&self) -> u8 {
        self.header.bit_depth
    }

    /// Color type.
    pub fn color_type(&self) -> ColorType {
        self.header.color_type
    }

    /// Compression method from the header (always 0 once decoded).
    pub fn compression_method(&self) -> u8 {
        self.header.compression_method
    }

    /// Filter method from the header (always 0 once decoded).
    pub fn filter_method(&self) -> u8 {
        self.header.filter_method
    }

    /// Interlace method from the header (always 0 once decoded).
    pub fn interlace_method(&self) -> u8 {
        self.header.interlace_method
    }

    /// The parsed header.
    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// The channel bytes of the pixel at `(x, y)`, or `None` when the
    /// flat index falls outside the buffer.
    ///
    /// Out-of-range coordinates are a soft failure, not an error: this
    /// is a query-time miss, distinct from structural decode failures.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let bpp = self.header.bytes_per_pixel();
        // Checked arithmetic: coordinates whose flat index does not
        // even fit in usize are just another miss.
        let start = (y as usize)
            .checked_mul(self.header.width as usize)?
            .checked_add(x as usize)?
            .checked_mul(bpp)?;
        let end = start.checked_add(bpp)?;
        self.pixels.get(start..end)
    }

    /// The whole reconstructed pixel buffer: `height * scanline_len`
    /// bytes, row-major, no filter bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
