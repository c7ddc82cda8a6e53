//! Canonical Huffman table construction and symbol decoding.
//!
//! Builds the decode table the straightforward way spec.md §4.2 describes —
//! a length histogram, an over-subscription check, and a stable sort of
//! symbols by `(code length, symbol index)` — rather than the multi-level
//! fast-lookup tables the teacher builds in `decompress_utils.rs`
//! (`build_litlen_decode_table` et al.) and consumes through
//! `FastDecodeEntry`. spec.md is explicit that this crate should not chase
//! that speed: "not building Huffman tables faster than the straightforward
//! canonical construction" is in scope, a faster one is not.
//!
//! `original_source/src/deflate.c`'s `deflate_huffman_table_construct`
//! (around line 127) runs the same three-step algorithm: histogram, the
//! `left_value` over-subscription walk, then the symbol placement pass.

use crate::deflate_constants::NUM_LITLEN_SYMS;
use crate::error::{DeflateError, Stage};

pub const MAX_CODE_LEN: usize = 15;

/// A canonical Huffman decode table: per-length code counts plus symbols
/// sorted by `(length, original index)`.
///
/// `max_bits == 0` is the distinguished "empty table" state from spec.md
/// §4.2 (every code length was zero). Decoding from an empty table always
/// fails with `BadCode`, since no codeword is defined.
#[derive(Clone)]
pub struct HuffmanTable {
    max_bits: u8,
    count: [u16; MAX_CODE_LEN + 1],
    symbols: [u16; NUM_LITLEN_SYMS],
}

impl HuffmanTable {
    pub fn is_empty(&self) -> bool {
        self.max_bits == 0
    }

    /// Builds a canonical decode table from a vector of per-symbol code
    /// lengths (`0` meaning "symbol absent").
    pub fn build(lens: &[u8], stage: Stage) -> Result<HuffmanTable, DeflateError> {
        debug_assert!(lens.len() <= NUM_LITLEN_SYMS);

        let mut count = [0u16; MAX_CODE_LEN + 1];
        for &len in lens {
            count[len as usize] += 1;
        }

        if count[0] as usize == lens.len() {
            return Ok(HuffmanTable {
                max_bits: 0,
                count,
                symbols: [0u16; NUM_LITLEN_SYMS],
            });
        }

        // Over-subscription check: left = 2*left - count[len], must stay >= 0.
        let mut left: i32 = 1;
        let mut max_bits = 0u8;
        for len in 1..=MAX_CODE_LEN {
            left = 2 * left - count[len] as i32;
            if left < 0 {
                return Err(DeflateError::OverSubscribed { stage });
            }
            if count[len] != 0 {
                max_bits = len as u8;
            }
        }

        // Starting offsets per length, then a stable placement pass.
        let mut offsets = [0u16; MAX_CODE_LEN + 2];
        for len in 1..=MAX_CODE_LEN {
            offsets[len + 1] = offsets[len] + count[len];
        }

        let mut symbols = [0u16; NUM_LITLEN_SYMS];
        for (sym, &len) in lens.iter().enumerate() {
            if len != 0 {
                let offset = &mut offsets[len as usize];
                symbols[*offset as usize] = sym as u16;
                *offset += 1;
            }
        }

        Ok(HuffmanTable {
            max_bits,
            count,
            symbols,
        })
    }

    /// Decodes the next symbol from `bitstream`, per spec.md §4.3: shift one
    /// bit at a time into `code`, and at each length check whether `code`
    /// falls within the range of codes assigned to that length.
    pub fn decode_symbol(
        &self,
        bitstream: &mut crate::bitstream::BitStream,
        stage: Stage,
    ) -> Result<u16, DeflateError> {
        let mut code: u32 = 0;
        let mut first_code: u32 = 0;
        let mut index: usize = 0;

        for len in 1..=(self.max_bits as usize) {
            let bit = bitstream.get_bit(stage)?;
            code = (code << 1) | bit;

            let count = self.count[len] as u32;
            if code.wrapping_sub(first_code) < count {
                return Ok(self.symbols[index + (code - first_code) as usize]);
            }
            first_code = (first_code + count) << 1;
            index += count as usize;
        }

        Err(DeflateError::BadCode { stage })
    }
}
