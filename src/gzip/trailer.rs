use crate::bits::BitReader;
use crate::error::{Error, Result};
use std::io::Read;

/// Gzip trailer (8 bytes immediately following the final DEFLATE block):
/// CRC32 of the uncompressed data, then its length mod 2^32, both
/// little-endian.
#[derive(Debug, Clone)]
pub struct GzipTrailer {
    pub crc32: u32,
    pub isize: u32,
}

impl GzipTrailer {
    /// Parse a gzip trailer from a plain byte reader.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf).map_err(|_| Error::UnexpectedEof)?;

        let crc32 = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let isize = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);

        Ok(GzipTrailer { crc32, isize })
    }

    /// Parse a gzip trailer through a [`BitReader`], so any bytes it has
    /// already buffered ahead of the deflate stream's logical end are
    /// consumed from the same place rather than lost to the underlying
    /// reader's position.
    pub fn parse_from_bits<R: Read>(bits: &mut BitReader<R>) -> Result<Self> {
        let crc32 = bits.read_u32_le()?;
        let isize = bits.read_u32_le()?;
        Ok(GzipTrailer { crc32, isize })
    }
}
