pub mod bits;
pub mod deflate;
pub mod engine;
pub mod error;
pub mod gzip;
pub mod huffman;
pub mod metadata;

pub use deflate::tokens::LZ77Token;
pub use engine::{inflate, inflate_body, read_header, InflateReport, InflateStats};
pub use error::{Error, Result};
pub use gzip::{GzipHeader, GzipTrailer};
