//! Scanline reconstruction (PNG defiltering).
//!
//! Each decompressed row is one filter-type byte followed by the
//! filtered scanline. Reconstruction reverses the per-row prediction:
//! for byte `j` of row `i`, the predictors `a` (left), `b` (up) and
//! `c` (upper-left) are read from the *reconstructed* buffer, yielding
//! 0 when out of range. Rows must be processed in increasing order and
//! bytes in increasing order within a row, because every result feeds
//! forward as a later neighbor.

use log::debug;

use crate::error::{Error, Result};
use crate::header::ImageHeader;

/// Filter type bytes as defined by the PNG specification.
const FILTER_NONE: u8 = 0;
const FILTER_SUB: u8 = 1;
const FILTER_UP: u8 = 2;
const FILTER_AVERAGE: u8 = 3;
const FILTER_PAETH: u8 = 4;

/// Reconstruct the pixel buffer from the decompressed scanline data.
///
/// `data` must be exactly [`ImageHeader::filtered_len`] bytes, as
/// guaranteed by the decompression adapter. The output is
/// `height * scanline_len` bytes, row-major, with no filter bytes.
pub fn reconstruct(data: &[u8], header: &ImageHeader) -> Result<Vec<u8>> {
    let height = header.height as usize;
    let scanline_len = header.scanline_len();
    let bpp = header.bytes_per_pixel();

    let expected = header.filtered_len()?;
    if data.len() != expected {
        return Err(Error::Decompression(format!(
            "filtered data is {} bytes, expected {expected}",
            data.len()
        )));
    }

    // Fits: height * scanline_len < filtered_len, which was just
    // computed with checked arithmetic.
    let mut out = vec![0u8; height * scanline_len];
    for i in 0..height {
        let row_start = i * (1 + scanline_len);
        let filter = data[row_start];
        let raw = &data[row_start + 1..row_start + 1 + scanline_len];

        // Split so the current row is written while the previous
        // reconstructed row stays readable.
        let (done, rest) = out.split_at_mut(i * scanline_len);
        let prev = if i == 0 {
            &[] as &[u8]
        } else {
            &done[(i - 1) * scanline_len..]
        };
        unfilter_row(filter, raw, &mut rest[..scanline_len], prev, bpp)?;
    }

    debug!("reconstructed {} scanlines of {} bytes", height, scanline_len);
    Ok(out)
}

/// Reverse one row's filter.
///
/// `raw` is the filtered scanline, `out` the row being reconstructed,
/// `prev` the previous reconstructed row (empty for row 0). All
/// additions wrap modulo 256.
fn unfilter_row(filter: u8, raw: &[u8], out: &mut [u8], prev: &[u8], bpp: usize) -> Result<()> {
    match filter {
        FILTER_NONE => out.copy_from_slice(raw),
        FILTER_SUB => {
            for j in 0..raw.len() {
                let a = if j >= bpp { out[j - bpp] } else { 0 };
                out[j] = raw[j].wrapping_add(a);
            }
        }
        FILTER_UP => {
            for j in 0..raw.len() {
                let b = prev.get(j).copied().unwrap_or(0);
                out[j] = raw[j].wrapping_add(b);
            }
        }
        FILTER_AVERAGE => {
            for j in 0..raw.len() {
                let a = if j >= bpp { out[j - bpp] as u16 } else { 0 };
                let b = prev.get(j).copied().unwrap_or(0) as u16;
                // Floor division; the sum never exceeds 510.
                out[j] = raw[j].wrapping_add(((a + b) / 2) as u8);
            }
        }
        FILTER_PAETH => {
            for j in 0..raw.len() {
                let a = if j >= bpp { out[j - bpp] } else { 0 };
                let b = prev.get(j).copied().unwrap_or(0);
                let c = if j >= bpp {
                    prev.get(j - bpp).copied().unwrap_or(0)
                } else {
                    0
                };
                out[j] = raw[j].wrapping_add(paeth_predictor(a, b, c));
            }
        }
        other => return Err(Error::UnsupportedFilterType(other)),
    }
    Ok(())
}

/// Paeth predictor: pick whichever of left/up/upper-left is closest to
/// `a + b - c`, preferring `a`, then `b`, on ties.
#[inline]
pub(crate) fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i32 + b as i32 - c as i32;
    let pa = (p - a as i32).abs();
    let pb = (p - b as i32).abs();
    let pc = (p - c as i32).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
