//! zlib decompression adapter for the IDAT payload.
//!
//! DEFLATE itself is delegated to `miniz_oxide`; this module only
//! enforces the exact-length contract the reconstructor relies on:
//! the filtered buffer must be exactly `(1 + scanline_len) * height`
//! bytes, not merely at least that many.

use miniz_oxide::inflate::decompress_slice_iter_to_slice;

use crate::error::{Error, Result};

/// Inflate `payload` into exactly `expected_len` bytes.
///
/// Fails with [`Error::Decompression`] if the decompressor reports any
/// error or if the stream does not produce exactly `expected_len`
/// bytes.
pub fn inflate_exact(payload: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; expected_len];
    let written =
        decompress_slice_iter_to_slice(&mut out, std::iter::once(payload), true, true)
            .map_err(|status| Error::Decompression(format!("inflate failed: {status:?}")))?;
    if written != expected_len {
        return Err(Error::Decompression(format!(
            "short output: {written} of {expected_len} bytes"
        )));
    }
    Ok(out)
}
