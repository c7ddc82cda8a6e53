//! LSB-first bit stream reader over an in-memory byte slice.
//!
//! Mirrors the bitbuffer variables `deflate_bit_stream_t` carries in
//! `original_source/src/deflate.c` (`byte_stream`, `byte_stream_offset`,
//! `bit_buffer`, `bit_buffer_size`) and the refill/consume split the
//! teacher's `BitStream` uses in `bitstream.rs` (`bitbuf`/`bitsleft`,
//! `bits`/`remove_bits`/`pop_bits`). Unlike the teacher, this reader borrows
//! a plain `&[u8]` rather than a generic streaming `DeflateInput` — spec's
//! Non-goals exclude multi-chunk streaming, so there is always a whole
//! buffer to index into directly.
//!
//! The register is 64 bits wide, one word wider than the C source's 32-bit
//! `bit_buffer`. That sidesteps the `n == 32` shift-undefined-behavior
//! workaround the C implementation needs (masking a 32-bit register with a
//! 32-bit shift is UB); with a 64-bit register the general formula below is
//! well-defined for every `n` in `0..=32` and, unlike the "zero everything"
//! workaround, never discards bits the caller didn't ask for.

use crate::error::{DeflateError, Stage};

pub struct BitStream<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bitbuf: u64,
    bit_count: u32,
}

impl<'a> BitStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bitbuf: 0,
            bit_count: 0,
        }
    }

    /// Returns the next `n` bits (`0..=32`), LSB-first: the first bit read
    /// from the stream becomes bit 0 of the result.
    pub fn get_bits(&mut self, n: u32, stage: Stage) -> Result<u32, DeflateError> {
        debug_assert!(n <= 32);
        while self.bit_count < n {
            if self.byte_pos >= self.data.len() {
                return Err(DeflateError::Truncated { stage });
            }
            let byte = self.data[self.byte_pos] as u64;
            self.byte_pos += 1;
            self.bitbuf |= byte << self.bit_count;
            self.bit_count += 8;
        }
        if n == 0 {
            return Ok(0);
        }
        let mask = (1u64 << n) - 1;
        let result = (self.bitbuf & mask) as u32;
        self.bitbuf >>= n;
        self.bit_count -= n;
        Ok(result)
    }

    /// Reads a single bit; shorthand used throughout Huffman symbol decode.
    #[inline]
    pub fn get_bit(&mut self, stage: Stage) -> Result<u32, DeflateError> {
        self.get_bits(1, stage)
    }

    /// Drops any bits left over in the current byte, so the next read comes
    /// from a byte boundary of the underlying slice.
    pub fn align_to_byte(&mut self) {
        let partial = self.bit_count % 8;
        if partial != 0 {
            self.bitbuf >>= partial;
            self.bit_count -= partial;
        }
        // Any whole bytes still buffered (from a refill that over-fetched)
        // must be un-consumed so the byte-aligned reads below see them.
        while self.bit_count >= 8 {
            self.byte_pos -= 1;
            self.bit_count -= 8;
        }
        self.bitbuf = 0;
    }

    /// Reads `buf.len()` raw bytes directly from the underlying slice.
    /// Must only be called when byte-aligned (after [`align_to_byte`]).
    pub fn read_bytes(&mut self, buf: &mut [u8], stage: Stage) -> Result<(), DeflateError> {
        debug_assert_eq!(self.bit_count, 0);
        let end = self.byte_pos + buf.len();
        if end > self.data.len() {
            return Err(DeflateError::Truncated { stage });
        }
        buf.copy_from_slice(&self.data[self.byte_pos..end]);
        self.byte_pos = end;
        Ok(())
    }

    /// Bytes remaining in the underlying slice, ignoring any buffered bits.
    pub fn bytes_remaining(&self) -> usize {
        self.data.len() - self.byte_pos
    }
}
