//! Adler-32, the checksum the zlib trailer stores.
//!
//! `original_source/src/deflate.c` exposes `deflate_calculate_adler32` as a
//! standalone function (not an inlined step of `deflate_decompress`) so a
//! caller that reconstructed a buffer some other way can still verify it.
//! This module keeps that split: [`Adler32`] is the incremental
//! accumulator the block decoder feeds as it writes output, and
//! [`checksum`] is the one-shot convenience wrapper spec.md §4.4.7
//! describes.

const MOD_ADLER: u32 = 65521;
/// Largest number of bytes that can be summed into `hi` before it risks
/// overflowing `u32` against the modulus, per spec.md §4.4.7.
const NMAX: usize = 5552;

/// Incremental Adler-32 accumulator, seeded per spec.md §3 (`lo = 1, hi = 0`).
#[derive(Debug, Clone, Copy)]
pub struct Adler32 {
    lo: u32,
    hi: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self { lo: 1, hi: 0 }
    }
}

impl Adler32 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `data` into the running checksum, batching the modulo
    /// reduction every [`NMAX`] bytes as spec.md §4.4.7 recommends.
    pub fn update(&mut self, data: &[u8]) {
        let mut lo = self.lo;
        let mut hi = self.hi;
        for chunk in data.chunks(NMAX) {
            for &byte in chunk {
                lo += byte as u32;
                hi += lo;
            }
            lo %= MOD_ADLER;
            hi %= MOD_ADLER;
        }
        self.lo = lo;
        self.hi = hi;
    }

    pub fn finish(self) -> u32 {
        (self.hi << 16) | self.lo
    }
}

/// One-shot Adler-32 of a complete buffer.
pub fn checksum(data: &[u8]) -> u32 {
    let mut adler = Adler32::new();
    adler.update(data);
    adler.finish()
}
