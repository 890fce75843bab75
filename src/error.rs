//! Error types for the pngraw library.

use thiserror::Error;

/// Result type alias for pngraw operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a PNG stream.
///
/// All variants are fatal to the decode in progress; there are no
/// retries. Out-of-range pixel queries are *not* errors — they return
/// `None` from [`PngReader::get_pixel`](crate::PngReader::get_pixel).
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first 8 bytes are not the PNG signature.
    #[error("not a PNG file: bad signature")]
    BadSignature,

    /// The stream ended before the first chunk.
    #[error("stream ends after the PNG signature; no IHDR chunk")]
    MissingHeader,

    /// The first chunk is not IHDR.
    #[error("first chunk is {}, expected IHDR", print_tag(.0))]
    UnexpectedFirstChunk([u8; 4]),

    /// IHDR chunk data is not the fixed 13 bytes.
    #[error("IHDR data length is {0}, expected 13")]
    InvalidHeaderLength(usize),

    /// A chunk's declared length runs past the end of the stream.
    #[error("truncated chunk: declared length runs past end of stream")]
    TruncatedChunk,

    /// Zero width or height in the header.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },

    /// Dimensions exceed the decoder's per-side cap.
    #[error("image {width}x{height} exceeds maximum dimension {max}")]
    ImageTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Maximum supported dimension per side.
        max: u32,
    },

    /// Color type byte outside {0, 2, 3, 4, 6}.
    #[error("unsupported PNG color type: {0}")]
    UnsupportedColorType(u8),

    /// Bit depth this decoder cannot address byte-wise.
    #[error("unsupported bit depth {bit_depth} for color type {color_type}")]
    UnsupportedBitDepth {
        /// Declared bit depth.
        bit_depth: u8,
        /// Color type it was declared for.
        color_type: u8,
    },

    /// A header feature this decoder rejects rather than mis-decode.
    #[error("unsupported PNG feature: {0}")]
    Unsupported(String),

    /// No IDAT chunk was found before end-of-stream.
    #[error("no IDAT chunks found")]
    MissingPayload,

    /// A scanline's filter-type byte is outside {0..=4}.
    #[error("unsupported scanline filter type: {0}")]
    UnsupportedFilterType(u8),

    /// The zlib decompressor failed or produced the wrong byte count.
    #[error("decompression failed: {0}")]
    Decompression(String),
}

/// Render a chunk tag for error messages; tags are ASCII in practice
/// but arbitrary bytes in a corrupt stream.
fn print_tag(tag: &[u8; 4]) -> String {
    if tag.iter().all(|b| b.is_ascii_graphic()) {
        String::from_utf8_lossy(tag).into_owned()
    } else {
        format!("{tag:02x?}")
    }
}
