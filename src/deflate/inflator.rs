use super::tokens::{LZ77Block, LZ77Token};
use super::window::SlidingWindow;
use crate::error::{Error, Result};
use std::io::Write;

/// Drives LZ77 reconstruction: turns the token stream a [`super::parser::DeflateParser`]
/// produces into the original byte stream, maintaining the 32 KiB sliding
/// window across blocks and the running CRC32/length used by the gzip
/// trailer check.
pub struct Inflator {
    window: SlidingWindow,
    crc: crc32fast::Hasher,
    bytes_written: u64,
}

impl Inflator {
    pub fn new() -> Self {
        Self { window: SlidingWindow::new(), crc: crc32fast::Hasher::new(), bytes_written: 0 }
    }

    /// Apply one decoded block's tokens, writing literal bytes to `sink` and
    /// updating the window and running checksum as it goes.
    pub fn apply_block<W: Write>(&mut self, block: &LZ77Block, sink: &mut W) -> Result<()> {
        for token in &block.tokens {
            match token {
                LZ77Token::Literal(byte) => {
                    self.window.push_byte(*byte);
                    sink.write_all(std::slice::from_ref(byte))?;
                    self.crc.update(std::slice::from_ref(byte));
                    self.bytes_written += 1;
                }
                LZ77Token::Copy { length, distance } => {
                    let available = self.window.total_written();
                    if *distance == 0 || *distance as u64 > available {
                        return Err(Error::DistanceTooFar { distance: *distance, available });
                    }

                    let bytes = self.window.get(*distance, *length);
                    sink.write_all(&bytes)?;
                    self.crc.update(&bytes);
                    self.window.push_bytes(&bytes);
                    self.bytes_written += *length as u64;
                }
                LZ77Token::EndOfBlock => {}
            }
        }
        Ok(())
    }

    /// Total uncompressed bytes emitted so far in this member.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Finalize and return the CRC32 over every byte emitted so far.
    pub fn crc32(&self) -> u32 {
        self.crc.clone().finalize()
    }
}

impl Default for Inflator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deflate::tokens::LZ77Block;

    #[test]
    fn test_literals_only() {
        let mut inflator = Inflator::new();
        let block = LZ77Block::new(
            vec![LZ77Token::Literal(b'H'), LZ77Token::Literal(b'i'), LZ77Token::EndOfBlock],
            true,
            1,
        );
        let mut out = Vec::new();
        inflator.apply_block(&block, &mut out).unwrap();
        assert_eq!(out, b"Hi");
        assert_eq!(inflator.bytes_written(), 2);
    }

    #[test]
    fn test_run_length_extension() {
        let mut inflator = Inflator::new();
        let block = LZ77Block::new(
            vec![
                LZ77Token::Literal(b'Z'),
                LZ77Token::Copy { length: 99, distance: 1 },
                LZ77Token::EndOfBlock,
            ],
            true,
            1,
        );
        let mut out = Vec::new();
        inflator.apply_block(&block, &mut out).unwrap();
        assert_eq!(out.len(), 100);
        assert!(out.iter().all(|&b| b == b'Z'));
    }

    #[test]
    fn test_cross_block_window_reuse() {
        let mut inflator = Inflator::new();
        let mut out = Vec::new();

        let block1 = LZ77Block::new(
            vec![
                LZ77Token::Literal(b'A'),
                LZ77Token::Literal(b'B'),
                LZ77Token::Literal(b'C'),
                LZ77Token::Literal(b'D'),
                LZ77Token::EndOfBlock,
            ],
            false,
            1,
        );
        inflator.apply_block(&block1, &mut out).unwrap();

        let block2 = LZ77Block::new(
            vec![LZ77Token::Copy { length: 4, distance: 4 }, LZ77Token::EndOfBlock],
            true,
            1,
        );
        inflator.apply_block(&block2, &mut out).unwrap();

        assert_eq!(out, b"ABCDABCD");
    }

    #[test]
    fn test_distance_too_far_rejected() {
        let mut inflator = Inflator::new();
        let block = LZ77Block::new(
            vec![LZ77Token::Literal(b'A'), LZ77Token::Copy { length: 1, distance: 5 }],
            true,
            1,
        );
        let mut out = Vec::new();
        let result = inflator.apply_block(&block, &mut out);
        assert!(matches!(result, Err(Error::DistanceTooFar { .. })));
    }
}
