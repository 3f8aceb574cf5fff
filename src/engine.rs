use crate::deflate::{DeflateParser, Inflator};
use crate::error::{Error, Result};
use crate::gzip::{GzipHeader, GzipTrailer};
use std::io::{Read, Write};

/// Outcome of inflating one gzip member's body: uncompressed byte count
/// and the CRC32 computed over it.
#[derive(Debug, Clone, Copy)]
pub struct InflateStats {
    pub bytes_written: u64,
    pub crc32: u32,
}

/// Outcome of a complete `inflate` call: the filename and mtime recovered
/// from the header, plus the body's stats.
#[derive(Debug, Clone)]
pub struct InflateReport {
    pub filename: Option<String>,
    pub mtime: u32,
    pub bytes_written: u64,
    pub crc32: u32,
}

/// Parse the gzip header and hand back a parser positioned at the first
/// payload bit. Splitting header recovery from body inflation lets a
/// caller learn the output filename before it needs to open a sink.
pub fn read_header<R: Read>(mut input: R) -> Result<(GzipHeader, DeflateParser<R>)> {
    let header = GzipHeader::parse(&mut input)?;
    Ok((header, DeflateParser::new(input)))
}

/// Drive `parser` through every DEFLATE block to `sink`, then verify the
/// trailer against what was actually produced.
pub fn inflate_body<R: Read, W: Write>(mut parser: DeflateParser<R>, sink: &mut W) -> Result<InflateStats> {
    let mut inflator = Inflator::new();

    loop {
        match parser.parse_block()? {
            Some(block) => {
                let is_final = block.is_final;
                inflator.apply_block(&block, sink)?;
                if is_final {
                    break;
                }
            }
            None => break,
        }
    }

    sink.flush()?;

    let mut bits = parser.into_inner();
    let trailer = GzipTrailer::parse_from_bits(&mut bits)?;

    let bytes_written = inflator.bytes_written();
    let expected_len = (bytes_written % (1u64 << 32)) as u32;
    if trailer.isize != expected_len {
        return Err(Error::LengthMismatch { expected: trailer.isize, found: expected_len });
    }

    let computed_crc = inflator.crc32();
    if trailer.crc32 != computed_crc {
        return Err(Error::Crc32Mismatch { expected: trailer.crc32, found: computed_crc });
    }

    if has_trailing_data(&mut bits)? {
        return Err(Error::TrailingGarbage);
    }

    Ok(InflateStats { bytes_written, crc32: computed_crc })
}

/// Inflate a single gzip member from `input`, writing the decompressed
/// bytes to `sink`. Convenience wrapper over [`read_header`] and
/// [`inflate_body`] for callers (tests, in-memory use) that don't need to
/// pick the sink based on the recovered filename.
pub fn inflate<R: Read, W: Write>(input: R, sink: &mut W) -> Result<InflateReport> {
    let (header, parser) = read_header(input)?;
    let stats = inflate_body(parser, sink)?;
    Ok(InflateReport {
        filename: header.filename,
        mtime: header.mtime,
        bytes_written: stats.bytes_written,
        crc32: stats.crc32,
    })
}

/// Multi-member concatenation is out of scope: any byte beyond the trailer
/// is rejected. `bits` may already have buffered bytes past the trailer
/// from its own internal read-ahead, so check that before touching the
/// underlying reader.
fn has_trailing_data<R: Read>(bits: &mut crate::bits::BitReader<R>) -> Result<bool> {
    if bits.bits_available() > 0 {
        return Ok(true);
    }
    match bits.read_bits(8) {
        Ok(_) => Ok(true),
        Err(Error::UnexpectedEof) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::{Compression, GzBuilder};
    use std::io::Cursor;
    use std::io::Write as _;

    fn gzip_bytes(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn gzip_bytes_named(data: &[u8], filename: &str) -> Vec<u8> {
        let mut encoder =
            GzBuilder::new().filename(filename).write(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_inflate_roundtrip_no_filename() {
        let compressed = gzip_bytes(b"Hello, World!");
        let mut out = Vec::new();
        let report = inflate(Cursor::new(compressed), &mut out).unwrap();
        assert_eq!(out, b"Hello, World!");
        assert_eq!(report.bytes_written, 13);
    }

    #[test]
    fn test_inflate_recovers_filename() {
        let compressed = gzip_bytes_named(b"data", "greeting.txt");
        let mut out = Vec::new();
        let report = inflate(Cursor::new(compressed), &mut out).unwrap();
        assert_eq!(out, b"data");
        assert_eq!(report.filename.as_deref(), Some("greeting.txt"));
    }

    #[test]
    fn test_inflate_empty_member() {
        let compressed = gzip_bytes(b"");
        let mut out = Vec::new();
        let report = inflate(Cursor::new(compressed), &mut out).unwrap();
        assert_eq!(out, b"");
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut compressed = gzip_bytes(b"hi");
        compressed.push(0xAA);
        let mut out = Vec::new();
        let result = inflate(Cursor::new(compressed), &mut out);
        assert!(matches!(result, Err(Error::TrailingGarbage)));
    }

    #[test]
    fn test_truncated_input_mid_header() {
        let compressed = vec![0x1f, 0x8b, 0x08];
        let mut out = Vec::new();
        let result = inflate(Cursor::new(compressed), &mut out);
        assert!(matches!(result, Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_single_literal_stored_block() {
        // Minimal gzip header + stored block "01 01 00 FE FF 41" + trailer
        let mut data = vec![
            0x1f, 0x8b, 0x08, 0x00, // magic, method, flags
            0x00, 0x00, 0x00, 0x00, // mtime
            0x00, 0xff, // xfl, os
        ];
        data.extend_from_slice(&[0x01, 0x01, 0x00, 0xfe, 0xff, 0x41]);
        let crc = crc32fast::hash(b"A");
        data.extend_from_slice(&crc.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());

        let mut out = Vec::new();
        let report = inflate(Cursor::new(data), &mut out).unwrap();
        assert_eq!(out, b"A");
        assert_eq!(report.bytes_written, 1);
    }

    #[test]
    fn test_length_mismatch_detected() {
        let mut data =
            vec![0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];
        data.extend_from_slice(&[0x01, 0x01, 0x00, 0xfe, 0xff, 0x41]);
        let crc = crc32fast::hash(b"A");
        data.extend_from_slice(&crc.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes()); // wrong ISIZE

        let mut out = Vec::new();
        let result = inflate(Cursor::new(data), &mut out);
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }
}
