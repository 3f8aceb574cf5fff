use crate::error::{Error, Result};
use std::io::Read;

/// Gzip header flags (RFC 1952)
const FTEXT: u8 = 1 << 0;
const FHCRC: u8 = 1 << 1;
const FEXTRA: u8 = 1 << 2;
const FNAME: u8 = 1 << 3;
const FCOMMENT: u8 = 1 << 4;

/// Maximum number of filename bytes accepted before the terminating NUL.
const MAX_FNAME_LEN: usize = 99;

/// Parsed gzip header (RFC 1952), restricted to the fields this design
/// supports: CM=8 and at most the FNAME optional field.
#[derive(Debug, Clone)]
pub struct GzipHeader {
    pub compression_method: u8,
    pub flags: u8,
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
    pub filename: Option<String>,
}

impl GzipHeader {
    /// Parse a gzip header from a reader.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 10];
        reader.read_exact(&mut buf).map_err(|_| Error::UnexpectedEof)?;

        let magic = u16::from_le_bytes([buf[0], buf[1]]);
        if magic != 0x8b1f {
            return Err(Error::InvalidGzipMagic(magic));
        }

        let compression_method = buf[2];
        if compression_method != 8 {
            return Err(Error::UnsupportedCompressionMethod(compression_method));
        }

        let flags = buf[3];
        let mtime = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let extra_flags = buf[8];
        let os = buf[9];

        if !matches!(extra_flags, 0 | 2 | 4) {
            return Err(Error::UnsupportedExtraFlags(extra_flags));
        }

        let unsupported_flags = flags & (FEXTRA | FCOMMENT | FHCRC);
        if unsupported_flags != 0 {
            return Err(Error::UnsupportedFlag(unsupported_flags));
        }

        let filename =
            if flags & FNAME != 0 { Some(read_null_terminated_filename(reader)?) } else { None };

        Ok(GzipHeader { compression_method, flags, mtime, extra_flags, os, filename })
    }

    /// Check if the FTEXT flag is set
    pub fn is_text(&self) -> bool {
        self.flags & FTEXT != 0
    }

    /// Check if the FNAME flag is set
    pub fn has_filename(&self) -> bool {
        self.flags & FNAME != 0
    }
}

/// Read a NUL-terminated filename, rejecting anything over `MAX_FNAME_LEN`
/// content bytes. Gzip filenames are ISO-8859-1; we decode byte-for-byte
/// into `char` rather than assuming UTF-8.
fn read_null_terminated_filename<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        reader.read_exact(&mut byte).map_err(|_| Error::UnexpectedEof)?;
        if byte[0] == 0 {
            break;
        }
        if bytes.len() >= MAX_FNAME_LEN {
            return Err(Error::FilenameTooLong { max: MAX_FNAME_LEN });
        }
        bytes.push(byte[0]);
    }

    Ok(bytes.iter().map(|&b| b as char).collect())
}
