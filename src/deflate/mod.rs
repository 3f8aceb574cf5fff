pub mod inflator;
pub mod parser;
pub mod tables;
pub mod tokens;
pub mod window;

pub use inflator::Inflator;
pub use parser::DeflateParser;
pub use tokens::{LZ77Block, LZ77Token};
pub use window::SlidingWindow;
