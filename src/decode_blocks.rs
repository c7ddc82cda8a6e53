//! The block state machine: reads the 3-bit block header, dispatches on
//! `BTYPE`, and runs the literal/length/distance decode loop.
//!
//! Grounded in the teacher's `decode_blocks.rs` (`decode_huffman_block`,
//! `decode_dynamic_huffman_block`, `decode_uncompressed_block`,
//! `load_static_huffman_block`) and cross-checked against the block loop in
//! `original_source/src/deflate.c`'s `deflate_decompress`. Unlike the
//! teacher, table construction here always produces a plain
//! [`crate::huffman::HuffmanTable`] rather than the multi-level fast decode
//! tables `build_litlen_decode_table`/`build_fast_decode_table` build —
//! spec.md's Non-goals exclude that speed work.

use crate::bitstream::BitStream;
use crate::deflate_constants::{
    self, DIST_TABLE, END_OF_BLOCK, LENGTH_TABLE, MAX_HCLEN, MAX_HDIST, MAX_HLIT,
    NUM_PRECODE_SYMS,
};
use crate::error::{DeflateError, Stage};
use crate::huffman::HuffmanTable;
use crate::output::OutputCursor;

const BTYPE_STORED: u32 = 0;
const BTYPE_FIXED: u32 = 1;
const BTYPE_DYNAMIC: u32 = 2;
const BTYPE_RESERVED: u32 = 3;

/// Runs the full block loop for one zlib/DEFLATE payload: reads blocks
/// until `BFINAL`, dispatching stored / fixed / dynamic decoding for each,
/// writing literals and back-references into `out`.
pub fn run(bitstream: &mut BitStream, out: &mut OutputCursor) -> Result<(), DeflateError> {
    let fixed_litlen = HuffmanTable::build(&deflate_constants::fixed_litlen_lens(), Stage::HuffmanBuild)?;
    let fixed_dist = HuffmanTable::build(&deflate_constants::fixed_dist_lens(), Stage::HuffmanBuild)?;

    loop {
        let bfinal = bitstream.get_bit(Stage::BlockHeader)?;
        let btype = bitstream.get_bits(2, Stage::BlockHeader)?;

        match btype {
            BTYPE_STORED => decode_stored_block(bitstream, out)?,
            BTYPE_FIXED => decode_huffman_block(bitstream, out, &fixed_litlen, &fixed_dist)?,
            BTYPE_DYNAMIC => {
                let (litlen, dist) = build_dynamic_tables(bitstream)?;
                decode_huffman_block(bitstream, out, &litlen, &dist)?;
            }
            BTYPE_RESERVED => return Err(DeflateError::InvalidBlockType),
            _ => unreachable!("get_bits(2) only returns 0..=3"),
        }

        if bfinal != 0 {
            return Ok(());
        }
    }
}

fn decode_stored_block(bitstream: &mut BitStream, out: &mut OutputCursor) -> Result<(), DeflateError> {
    bitstream.align_to_byte();

    let mut len_bytes = [0u8; 2];
    bitstream.read_bytes(&mut len_bytes, Stage::StoredBlock)?;
    let len = u16::from_le_bytes(len_bytes);

    let mut nlen_bytes = [0u8; 2];
    bitstream.read_bytes(&mut nlen_bytes, Stage::StoredBlock)?;
    let nlen = u16::from_le_bytes(nlen_bytes);

    if nlen != !len {
        return Err(DeflateError::LengthMismatch { len, nlen });
    }

    if len == 0 {
        return Ok(());
    }

    // Copy via a stack buffer instead of borrowing directly from the
    // bitstream's slice, keeping the output writer's bounds check in one
    // place (`OutputCursor::push_slice`).
    let mut remaining = len as usize;
    let mut chunk = [0u8; 4096];
    while remaining > 0 {
        let take = remaining.min(chunk.len());
        bitstream.read_bytes(&mut chunk[..take], Stage::StoredBlock)?;
        out.push_slice(&chunk[..take])?;
        remaining -= take;
    }

    Ok(())
}

fn decode_huffman_block(
    bitstream: &mut BitStream,
    out: &mut OutputCursor,
    litlen: &HuffmanTable,
    dist: &HuffmanTable,
) -> Result<(), DeflateError> {
    loop {
        let symbol = litlen.decode_symbol(bitstream, Stage::LiteralDecode)?;

        if symbol < 256 {
            out.push(symbol as u8)?;
            continue;
        }
        if symbol as u16 == END_OF_BLOCK {
            return Ok(());
        }
        let code_offset = symbol as usize - 257;
        let (base, extra_bits) = *LENGTH_TABLE.get(code_offset).ok_or(DeflateError::BadSymbol {
            symbol: symbol as u32,
            stage: Stage::LiteralDecode,
        })?;
        let extra = bitstream.get_bits(extra_bits as u32, Stage::LiteralDecode)?;
        let length = base as usize + extra as usize;

        let dsymbol = dist.decode_symbol(bitstream, Stage::BackReference)?;
        let (dbase, dextra_bits) =
            *DIST_TABLE
                .get(dsymbol as usize)
                .ok_or(DeflateError::BadSymbol {
                    symbol: dsymbol as u32,
                    stage: Stage::BackReference,
                })?;
        let dextra = bitstream.get_bits(dextra_bits as u32, Stage::BackReference)?;
        let distance = dbase as usize + dextra as usize;

        out.copy_match(distance, length)?;
    }
}

/// Reads the HLIT/HDIST/HCLEN header, decodes the code-length alphabet,
/// runs the run-length expansion, and builds the literal/length and
/// distance tables, per spec.md §4.4.6.
fn build_dynamic_tables(bitstream: &mut BitStream) -> Result<(HuffmanTable, HuffmanTable), DeflateError> {
    let hlit = bitstream.get_bits(5, Stage::BlockHeader)? as usize + 257;
    let hdist = bitstream.get_bits(5, Stage::BlockHeader)? as usize + 1;
    let hclen = bitstream.get_bits(4, Stage::BlockHeader)? as usize + 4;

    if hlit > MAX_HLIT || hdist > MAX_HDIST || hclen > MAX_HCLEN {
        return Err(DeflateError::BadDynamicTableSize { hlit, hdist, hclen });
    }

    let mut precode_lens = [0u8; NUM_PRECODE_SYMS];
    for i in 0..hclen {
        let len = bitstream.get_bits(3, Stage::HuffmanBuild)? as u8;
        precode_lens[deflate_constants::PRECODE_LENS_PERMUTATION[i] as usize] = len;
    }
    let precode_table = HuffmanTable::build(&precode_lens, Stage::HuffmanBuild)?;

    let total = hlit + hdist;
    let mut lens = vec![0u8; total];
    let mut i = 0usize;
    while i < total {
        let symbol = precode_table.decode_symbol(bitstream, Stage::HuffmanBuild)?;
        match symbol {
            0..=15 => {
                lens[i] = symbol as u8;
                i += 1;
            }
            16 => {
                if i == 0 {
                    return Err(DeflateError::BadRepeat {
                        offset: i,
                        total,
                    });
                }
                let rep = 3 + bitstream.get_bits(2, Stage::HuffmanBuild)? as usize;
                if i + rep > total {
                    return Err(DeflateError::BadRepeat { offset: i, total });
                }
                let prev = lens[i - 1];
                for slot in &mut lens[i..i + rep] {
                    *slot = prev;
                }
                i += rep;
            }
            17 => {
                let rep = 3 + bitstream.get_bits(3, Stage::HuffmanBuild)? as usize;
                if i + rep > total {
                    return Err(DeflateError::BadRepeat { offset: i, total });
                }
                i += rep;
            }
            18 => {
                let rep = 11 + bitstream.get_bits(7, Stage::HuffmanBuild)? as usize;
                if i + rep > total {
                    return Err(DeflateError::BadRepeat { offset: i, total });
                }
                i += rep;
            }
            _ => {
                return Err(DeflateError::BadSymbol {
                    symbol: symbol as u32,
                    stage: Stage::HuffmanBuild,
                })
            }
        }
    }

    if lens[END_OF_BLOCK as usize] == 0 {
        return Err(DeflateError::MissingEndOfBlock);
    }

    let litlen = HuffmanTable::build(&lens[0..hlit], Stage::HuffmanBuild)?;
    let dist = HuffmanTable::build(&lens[hlit..], Stage::HuffmanBuild)?;

    Ok((litlen, dist))
}
