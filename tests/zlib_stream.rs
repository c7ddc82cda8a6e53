//! Whole-stream (zlib-in, bytes-out) integration scenarios, exercising the
//! full pipeline (header, block loop, trailer) against hand-assembled
//! byte sequences rather than any single module in isolation.

use deflate_forensic_core::{decompress_zlib, DeflateError};

#[test]
fn stored_block_roundtrips_all_256_byte_values() {
    let mut input = vec![0x78, 0x9c];
    input.push(0b0000_0001); // BFINAL=1, BTYPE=00 (stored), byte-aligned
    input.extend_from_slice(&256u16.to_le_bytes()); // LEN
    input.extend_from_slice(&(!256u16).to_le_bytes()); // NLEN
    let data: Vec<u8> = (0..=255u8).collect();
    input.extend_from_slice(&data);
    // Adler-32 of bytes 0..=255, computed independently of this crate.
    input.extend_from_slice(&[0xAD, 0xF6, 0x7F, 0x81]);

    let mut out = [0u8; 256];
    let n = decompress_zlib(&input, &mut out).unwrap();
    assert_eq!(n, 256);
    assert_eq!(&out[..], &data[..]);
}

#[test]
fn fixed_huffman_block_expands_a_back_reference() {
    // One fixed-Huffman block: literal 'a', then a length-9/distance-1
    // back-reference, producing "aaaaaaaaaa" (spec.md §8's "repeating
    // pattern" scenario, encoded with fixed rather than dynamic codes).
    let input: [u8; 10] = [
        0x78, 0x9c, // zlib header
        0x4B, 0x84, 0x03, 0x00, // fixed-Huffman block payload
        0x14, 0xE1, 0x03, 0xCB, // Adler-32 of "aaaaaaaaaa"
    ];

    let mut out = [0u8; 16];
    let n = decompress_zlib(&input, &mut out).unwrap();
    assert_eq!(&out[..n], b"aaaaaaaaaa");
}

#[test]
fn truncated_stream_mid_block_is_reported() {
    // Valid header, but the payload cuts off inside the fixed-Huffman
    // block from the scenario above.
    let input = [0x78, 0x9c, 0x4B, 0x84];
    let mut out = [0u8; 16];
    assert!(decompress_zlib(&input, &mut out).is_err());
}

#[test]
fn dynamic_huffman_block_expands_a_back_reference() {
    // spec.md §8 scenario 3, encoded for real with BTYPE=2 (dynamic): one
    // dynamic-Huffman block carrying a 3-symbol literal/length alphabet
    // (literal 'a', the length-9 code, end-of-block) and a 1-symbol
    // distance alphabet (distance 1), with the 265-entry code-length
    // vector built via the 17/18 run-length codes (HLIT=264, HDIST=1,
    // HCLEN=18). Exercises `build_dynamic_tables` end to end: the
    // HLIT/HDIST/HCLEN header, the precode table, and the 17/18 run-length
    // symbols placing 97+138+20+6 zero-length entries around the four
    // symbols that actually carry a code.
    let input: [u8; 21] = [
        0x78, 0x9c, // zlib header
        0x3D, 0xC0, 0x21, 0x01, 0x00, 0x00, 0x00, 0x80, 0xA0, 0xAD, 0xFC, 0x3F,
        0x61, 0x13, 0x0B, // dynamic-Huffman block payload
        0x14, 0xE1, 0x03, 0xCB, // Adler-32 of "aaaaaaaaaa"
    ];

    let mut out = [0u8; 16];
    let n = decompress_zlib(&input, &mut out).unwrap();
    assert_eq!(&out[..n], b"aaaaaaaaaa");
}

#[test]
fn dynamic_huffman_block_missing_end_of_block_is_rejected() {
    // A dynamic block (HLIT=257, HDIST=1, HCLEN=4) whose 258-entry
    // code-length vector is produced entirely by two run-length-18 codes
    // (138 + 120 zeros): symbol 256 (end-of-block) never gets a nonzero
    // length, which spec.md §4.4.6 step 5 requires to fail
    // `MissingEndOfBlock` rather than silently building a table that could
    // never terminate a block.
    let input: [u8; 8] = [
        0x78, 0x9c, // zlib header
        0x05, 0x00, 0x80, 0xC0, 0x5F, 0x1B, // dynamic block header + all-zero code lengths
    ];

    let mut out = [0u8; 16];
    let err = decompress_zlib(&input, &mut out).unwrap_err();
    assert!(matches!(err, DeflateError::MissingEndOfBlock));
}
