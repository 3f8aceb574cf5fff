use super::tables::{CODE_LENGTH_ORDER, DISTANCE_TABLE, LENGTH_TABLE};
use super::tokens::{LZ77Block, LZ77Token};
use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::huffman::HuffmanDecoder;
use std::io::Read;

/// Parses DEFLATE blocks and extracts the LZ77 token stream (literals,
/// copies, end-of-block markers), one block at a time.
pub struct DeflateParser<R: Read> {
    bits: BitReader<R>,
    /// Whether we've seen the final block
    finished: bool,
}

impl<R: Read> DeflateParser<R> {
    pub fn new(reader: R) -> Self {
        Self { bits: BitReader::new(reader), finished: false }
    }

    /// Parse the next DEFLATE block, returning its LZ77 tokens.
    /// Returns None once the final block has already been consumed.
    pub fn parse_block(&mut self) -> Result<Option<LZ77Block>> {
        if self.finished {
            return Ok(None);
        }

        let is_final = self.bits.read_bit()?;
        let block_type = self.bits.read_bits(2)? as u8;

        let block = match block_type {
            0 => self.parse_stored_block(is_final)?,
            1 => self.parse_fixed_block(is_final)?,
            2 => self.parse_dynamic_block(is_final)?,
            _ => return Err(Error::InvalidBlockType(block_type)),
        };

        if is_final {
            self.finished = true;
        }

        Ok(Some(block))
    }

    /// Parse a stored (uncompressed) block
    fn parse_stored_block(&mut self, is_final: bool) -> Result<LZ77Block> {
        self.bits.align_to_byte();

        let len = self.bits.read_u16_le()?;
        let nlen = self.bits.read_u16_le()?;

        if len != !nlen {
            return Err(Error::StoredBlockLengthMismatch { len, nlen });
        }

        let mut tokens = Vec::with_capacity(len as usize + 1);
        for _ in 0..len {
            let byte = self.bits.read_bits(8)? as u8;
            tokens.push(LZ77Token::Literal(byte));
        }
        tokens.push(LZ77Token::EndOfBlock);

        Ok(LZ77Block::new(tokens, is_final, 0))
    }

    /// Parse a block with fixed Huffman codes
    fn parse_fixed_block(&mut self, is_final: bool) -> Result<LZ77Block> {
        let lit_decoder = HuffmanDecoder::fixed_literal_length();
        let dist_decoder = HuffmanDecoder::fixed_distance();

        let tokens = self.decode_symbols(&lit_decoder, Some(&dist_decoder))?;
        Ok(LZ77Block::new(tokens, is_final, 1))
    }

    /// Parse a block with dynamic Huffman codes
    fn parse_dynamic_block(&mut self, is_final: bool) -> Result<LZ77Block> {
        let hlit = self.bits.read_bits(5)? as usize + 257; // # of literal/length codes
        let hdist = self.bits.read_bits(5)? as usize + 1; // # of distance codes
        let hclen = self.bits.read_bits(4)? as usize + 4; // # of code length codes

        let mut code_length_lengths = [0u8; 19];
        for i in 0..hclen {
            code_length_lengths[CODE_LENGTH_ORDER[i]] = self.bits.read_bits(3)? as u8;
        }

        let code_length_decoder = HuffmanDecoder::from_code_lengths(&code_length_lengths)?;

        let total_codes = hlit + hdist;
        let mut all_lengths = Vec::with_capacity(total_codes);

        while all_lengths.len() < total_codes {
            let sym = code_length_decoder.decode(&mut self.bits)?;

            match sym {
                0..=15 => all_lengths.push(sym as u8),
                16 => {
                    let repeat = self.bits.read_bits(2)? as usize + 3;
                    let prev = *all_lengths.last().ok_or(Error::RepeatAtStart)?;
                    for _ in 0..repeat {
                        all_lengths.push(prev);
                    }
                }
                17 => {
                    let repeat = self.bits.read_bits(3)? as usize + 3;
                    all_lengths.resize(all_lengths.len() + repeat, 0);
                }
                18 => {
                    let repeat = self.bits.read_bits(7)? as usize + 11;
                    all_lengths.resize(all_lengths.len() + repeat, 0);
                }
                _ => return Err(Error::InvalidHuffmanSymbol(sym)),
            }
        }

        let literal_lengths: Vec<u8> = all_lengths[..hlit].to_vec();
        let distance_lengths: Vec<u8> = all_lengths[hlit..].to_vec();

        let lit_decoder = HuffmanDecoder::from_code_lengths(&literal_lengths)?;
        let dist_decoder = if distance_lengths.iter().all(|&l| l == 0) {
            // No distance codes - valid for blocks with only literals
            None
        } else {
            Some(HuffmanDecoder::from_code_lengths(&distance_lengths)?)
        };

        let tokens = self.decode_symbols(&lit_decoder, dist_decoder.as_ref())?;

        Ok(LZ77Block::new(tokens, is_final, 2))
    }

    /// Decode symbols, optionally using a distance decoder (None is only
    /// valid as long as no length code is ever produced).
    fn decode_symbols(
        &mut self,
        lit_decoder: &HuffmanDecoder,
        dist_decoder: Option<&HuffmanDecoder>,
    ) -> Result<Vec<LZ77Token>> {
        let mut tokens = Vec::with_capacity(1024);

        loop {
            let sym = lit_decoder.decode(&mut self.bits)?;

            match sym {
                0..=255 => {
                    tokens.push(LZ77Token::Literal(sym as u8));
                }
                256 => {
                    tokens.push(LZ77Token::EndOfBlock);
                    break;
                }
                257..=285 => {
                    let len_idx = (sym - 257) as usize;
                    let (base_len, extra_bits) = LENGTH_TABLE[len_idx];
                    let extra = if extra_bits > 0 { self.bits.read_bits(extra_bits)? } else { 0 };
                    let length = base_len + extra as u16;

                    let dist_decoder = dist_decoder.ok_or(Error::InvalidDistanceCode(0))?;
                    let dist_sym = dist_decoder.decode(&mut self.bits)?;
                    if dist_sym > 29 {
                        return Err(Error::InvalidDistanceCode(dist_sym));
                    }

                    let (base_dist, dist_extra_bits) = DISTANCE_TABLE[dist_sym as usize];
                    let dist_extra = if dist_extra_bits > 0 {
                        self.bits.read_bits(dist_extra_bits)?
                    } else {
                        0
                    };
                    let distance = base_dist + dist_extra as u16;

                    tokens.push(LZ77Token::Copy { length, distance });
                }
                _ => {
                    return Err(Error::InvalidLengthCode(sym));
                }
            }
        }

        Ok(tokens)
    }

    /// Bytes consumed from the compressed stream so far (approximate, for
    /// error reporting).
    pub fn bytes_read(&self) -> u64 {
        self.bits.bytes_read()
    }

    /// Whether the final block (BFINAL=1) has already been parsed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reclaim the underlying bit reader, e.g. to read the gzip trailer.
    pub fn into_inner(mut self) -> BitReader<R> {
        self.bits.align_to_byte();
        self.bits
    }
}
