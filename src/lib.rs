//! # pngraw
//!
//! A minimal PNG raster decoder.
//!
//! Decodes the raster portion of a PNG file into a flat buffer of pixel
//! bytes: signature verification, IHDR parsing, IDAT aggregation, zlib
//! inflation, and scanline reconstruction (defiltering) including the
//! Paeth predictor.
//!
//! Out of scope: encoding, Adam7 interlacing (interlaced files are
//! rejected), palette expansion, color management, and ancillary chunk
//! semantics (unknown chunks are skipped).
//!
//! ## Example
//!
//! ```no_run
//! use pngraw::PngReader;
//!
//! let png = PngReader::open("image.png")?;
//! println!("{}x{}", png.width(), png.height());
//! if let Some(pixel) = png.get_pixel(0, 0) {
//!     println!("top-left channels: {pixel:?}");
//! }
//! # Ok::<(), pngraw::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunk;
pub mod error;
pub mod filter;
pub mod header;
pub mod inflate;
mod reader;

pub use error::{Error, Result};
pub use header::{ColorType, ImageHeader};
pub use reader::PngReader;
