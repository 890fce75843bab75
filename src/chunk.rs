//! PNG container parsing: signature check and chunk framing.
//!
//! A PNG stream is the 8-byte signature followed by chunks framed as
//! `[u32 BE length][4-byte type tag][data][4-byte CRC]`. This module
//! validates the signature, decodes the leading IHDR chunk, and
//! concatenates all IDAT data in file order; every other chunk type is
//! skipped by its declared length without interpretation (CRCs
//! included).

use log::debug;

use crate::error::{Error, Result};
use crate::header::ImageHeader;

/// PNG file signature (magic bytes).
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Header chunk tag.
pub const IHDR: [u8; 4] = *b"IHDR";

/// Raster payload chunk tag.
pub const IDAT: [u8; 4] = *b"IDAT";

/// One framed chunk, borrowing its data from the input stream.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// 4-byte type tag, compared as raw bytes.
    pub tag: [u8; 4],
    /// Chunk data (CRC excluded).
    pub data: &'a [u8],
}

/// Iterator over the chunks following the signature.
///
/// Yields `Err(TruncatedChunk)` when a declared length overruns the
/// stream; ends when fewer bytes than a chunk frame remain.
#[derive(Debug)]
pub struct Chunks<'a> {
    rest: &'a [u8],
}

impl<'a> Chunks<'a> {
    /// Frame the byte stream positioned just past the signature.
    pub fn new(rest: &'a [u8]) -> Self {
        Chunks { rest }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        // length + tag + CRC is the minimum frame.
        if self.rest.len() < 12 {
            return None;
        }
        let length =
            u32::from_be_bytes([self.rest[0], self.rest[1], self.rest[2], self.rest[3]]) as usize;
        let tag = [self.rest[4], self.rest[5], self.rest[6], self.rest[7]];

        let Some(frame_len) = length.checked_add(12) else {
            return Some(Err(Error::TruncatedChunk));
        };
        if frame_len > self.rest.len() {
            return Some(Err(Error::TruncatedChunk));
        }

        let data = &self.rest[8..8 + length];
        // Skip the 4 CRC bytes; they are not verified.
        self.rest = &self.rest[frame_len..];
        Some(Ok(Chunk { tag, data }))
    }
}

/// Parse a PNG stream into its header and concatenated IDAT payload.
///
/// IDAT chunk boundaries carry no meaning: the fragments are
/// reassembled in arrival order into one compressed stream. A missing
/// IEND is tolerated; parsing simply stops at end-of-stream.
pub fn parse(data: &[u8]) -> Result<(ImageHeader, Vec<u8>)> {
    let stream = data
        .strip_prefix(&PNG_SIGNATURE)
        .ok_or(Error::BadSignature)?;

    let mut chunks = Chunks::new(stream);
    let first = chunks.next().ok_or(Error::MissingHeader)??;
    if first.tag != IHDR {
        return Err(Error::UnexpectedFirstChunk(first.tag));
    }
    let header = ImageHeader::from_ihdr(first.data)?;
    debug!(
        "IHDR: {}x{}, bit depth {}, color type {:?}",
        header.width, header.height, header.bit_depth, header.color_type
    );

    let mut payload = Vec::new();
    for chunk in chunks {
        let chunk = chunk?;
        if chunk.tag == IDAT {
            payload.extend_from_slice(chunk.data);
        }
    }
    if payload.is_empty() {
        return Err(Error::MissingPayload);
    }
    debug!("aggregated {} bytes of IDAT payload", payload.len());

    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Append one framed chunk; the CRC field is filled with zeros
    /// since the parser never inspects it.
    fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(tag);
        out.extend_from_slice(data);
        out.extend_from_slice(&[0u8; 4]);
    }

    fn ihdr_data(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
        let mut data = Vec::with_capacity(13);
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.push(bit_depth);
        data.push(color_type);
        data.extend_from_slice(&[0, 0, 0]);
        data
    }

    #[test]
    fn test_chunks_iterates_frames() {
        let mut stream = Vec::new();
        push_chunk(&mut stream, b"aaaa", &[1, 2, 3]);
        push_chunk(&mut stream, b"bbbb", &[]);

        let chunks: Vec<_> = Chunks::new(&stream).collect::<Result<_>>().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].tag, *b"aaaa");
        assert_eq!(chunks[0].data, &[1, 2, 3]);
        assert_eq!(chunks[1].tag, *b"bbbb");
        assert!(chunks[1].data.is_empty());
    }

    #[test]
    fn test_chunks_stops_on_trailing_garbage_shorter_than_a_frame() {
        let mut stream = Vec::new();
        push_chunk(&mut stream, b"aaaa", &[9]);
        stream.extend_from_slice(&[0, 0, 0]);

        let mut chunks = Chunks::new(&stream);
        assert!(chunks.next().unwrap().is_ok());
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_chunks_errors_on_overrunning_length() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&100u32.to_be_bytes());
        stream.extend_from_slice(b"IDAT");
        stream.extend_from_slice(&[0u8; 20]);

        let mut chunks = Chunks::new(&stream);
        assert!(matches!(chunks.next(), Some(Err(Error::TruncatedChunk))));
    }

    #[test]
    fn test_parse_rejects_bad_signature() {
        let result = parse(b"not a PNG file at all");
        assert!(matches!(result, Err(Error::BadSignature)));
    }

    #[test]
    fn test_parse_rejects_signature_only() {
        let result = parse(&PNG_SIGNATURE);
        assert!(matches!(result, Err(Error::MissingHeader)));
    }

    #[test]
    fn test_parse_rejects_wrong_first_chunk() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut stream, b"IDAT", &[0, 1, 2]);

        let result = parse(&stream);
        assert!(matches!(
            result,
            Err(Error::UnexpectedFirstChunk(tag)) if tag == *b"IDAT"
        ));
    }

    #[test]
    fn test_parse_rejects_missing_payload() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut stream, &IHDR, &ihdr_data(1, 1, 8, 0));
        push_chunk(&mut stream, b"IEND", &[]);

        let result = parse(&stream);
        assert!(matches!(result, Err(Error::MissingPayload)));
    }

    #[test]
    fn test_parse_concatenates_idat_in_order_and_skips_others() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut stream, &IHDR, &ihdr_data(4, 4, 8, 6));
        push_chunk(&mut stream, b"gAMA", &[0, 0, 0xB1, 0x8F]);
        push_chunk(&mut stream, &IDAT, &[1, 2, 3]);
        push_chunk(&mut stream, b"tEXt", b"comment");
        push_chunk(&mut stream, &IDAT, &[4, 5]);
        push_chunk(&mut stream, b"IEND", &[]);

        let (header, payload) = parse(&stream).unwrap();
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 4);
        assert_eq!(payload, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_tolerates_missing_iend() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut stream, &IHDR, &ihdr_data(1, 1, 8, 0));
        push_chunk(&mut stream, &IDAT, &[7, 7]);

        let (_, payload) = parse(&stream).unwrap();
        assert_eq!(payload, vec![7, 7]);
    }

    #[test]
    fn test_parse_propagates_color_type_error() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut stream, &IHDR, &ihdr_data(1, 1, 8, 5));
        push_chunk(&mut stream, &IDAT, &[0]);

        let result = parse(&stream);
        assert!(matches!(result, Err(Error::UnsupportedColorType(5))));
    }
}
