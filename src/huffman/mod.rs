pub mod decoder;
pub mod tables;

pub use decoder::HuffmanDecoder;
