use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Gzip container errors
    #[error("Invalid gzip magic bytes: expected 0x1f8b, got 0x{0:04x}")]
    InvalidGzipMagic(u16),

    #[error("Unsupported compression method: {0} (only DEFLATE/8 supported)")]
    UnsupportedCompressionMethod(u8),

    #[error("Unsupported extra flags: {0} (only 0, 2, 4 supported)")]
    UnsupportedExtraFlags(u8),

    #[error("Unsupported gzip flag bits: 0x{0:02x} (only FNAME is supported)")]
    UnsupportedFlag(u8),

    #[error("Gzip filename exceeds {max} bytes before NUL")]
    FilenameTooLong { max: usize },

    #[error("Trailing data found after gzip trailer")]
    TrailingGarbage,

    #[error("Trailer length mismatch: trailer says {expected}, decoder produced {found}")]
    LengthMismatch { expected: u32, found: u32 },

    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    Crc32Mismatch { expected: u32, found: u32 },

    // DEFLATE block errors
    #[error("Invalid DEFLATE block type: {0}")]
    InvalidBlockType(u8),

    #[error("Stored block length mismatch: LEN={len}, NLEN={nlen}")]
    StoredBlockLengthMismatch { len: u16, nlen: u16 },

    // Huffman errors
    #[error("Invalid Huffman code length: {0} (max 15)")]
    InvalidCodeLength(u8),

    #[error("Huffman code oversubscribed: more codes than possible for bit length")]
    HuffmanOversubscribed,

    #[error("Huffman code incomplete: not all codes assigned")]
    HuffmanIncomplete,

    #[error("Invalid Huffman symbol: {0}")]
    InvalidHuffmanSymbol(u16),

    #[error("Huffman symbol 16 (repeat previous) encountered with no previous length")]
    RepeatAtStart,

    // LZ77 errors
    #[error("Invalid length code: {0}")]
    InvalidLengthCode(u16),

    #[error("Invalid distance code: {0}")]
    InvalidDistanceCode(u16),

    #[error("Back-reference distance {distance} exceeds {available} bytes written so far")]
    DistanceTooFar { distance: u16, available: u64 },

    // Internal / EOF
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
