//! A self-contained zlib/DEFLATE decompressor.
//!
//! Extracted from a small collection of forensic decompression utilities
//! (the bundle also contained an ASCII-7 unpacker and Microsoft Search's
//! run-length/byte-indexed formats — neither travelled into this crate).
//! Of that bundle, this was the one with real engineering depth: a
//! bit-stream reader, canonical Huffman table construction, and a
//! three-mode DEFLATE block decoder that reproduces RFC 1950/1951
//! semantics and validates the Adler-32 trailer.
//!
//! ```
//! let compressed = [0x78, 0x9c, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01];
//! let mut out = [0u8; 0];
//! let n = deflate_forensic_core::decompress_zlib(&compressed, &mut out).unwrap();
//! assert_eq!(n, 0);
//! ```

#[macro_use]
extern crate static_assertions;

pub mod adler32;
pub mod bitstream;
mod decode_blocks;
pub mod deflate_constants;
pub mod error;
pub mod huffman;
pub mod options;
pub mod output;
mod zlib;

pub use error::DeflateError;
pub use options::DecompressOptions;

use bitstream::BitStream;
use error::Stage;
use output::OutputCursor;

/// Decompresses a zlib-wrapped DEFLATE stream into `output`, using default
/// options (tolerant trailer, no header check-bits enforcement — see
/// [`DecompressOptions`]).
///
/// Returns the number of bytes written on success.
pub fn decompress_zlib(input: &[u8], output: &mut [u8]) -> Result<usize, DeflateError> {
    decompress_zlib_with_options(input, output, &DecompressOptions::default())
}

/// Decompresses a zlib-wrapped DEFLATE stream into `output` with explicit
/// options. See spec.md §6 for the wire format and §4.5 for the failure
/// taxonomy every error variant here corresponds to.
pub fn decompress_zlib_with_options(
    input: &[u8],
    output: &mut [u8],
    options: &DecompressOptions,
) -> Result<usize, DeflateError> {
    let (_header, header_len) = zlib::read_header(input, options)?;

    #[cfg(feature = "trace")]
    log::debug!(
        "zlib header parsed ok, {} bytes of payload follow",
        input.len() - header_len
    );

    let payload = &input[header_len..];
    let mut bitstream = BitStream::new(payload);
    let mut out = OutputCursor::new(output);

    decode_blocks::run(&mut bitstream, &mut out)?;

    verify_trailer(&mut bitstream, &out, options)?;

    Ok(out.len())
}

fn verify_trailer(
    bitstream: &mut BitStream,
    out: &OutputCursor,
    options: &DecompressOptions,
) -> Result<(), DeflateError> {
    bitstream.align_to_byte();

    if bitstream.bytes_remaining() < 4 {
        return if options.strict_trailer {
            Err(DeflateError::Truncated {
                stage: Stage::Checksum,
            })
        } else {
            #[cfg(feature = "trace")]
            log::debug!("trailer shorter than 4 bytes, skipping checksum (non-strict mode)");
            Ok(())
        };
    }

    let mut trailer = [0u8; 4];
    bitstream.read_bytes(&mut trailer, Stage::Checksum)?;
    let stored = u32::from_be_bytes(trailer);

    // `out` only exposes the written prefix through `len()`; the decoder
    // never reads past it, so this recomputes the checksum over exactly
    // the bytes that were actually produced.
    let calculated = adler32::checksum(out.written());
    if stored != calculated {
        return Err(DeflateError::ChecksumMismatch { stored, calculated });
    }

    #[cfg(feature = "trace")]
    log::trace!("Adler-32 verified: 0x{calculated:08x}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream() {
        // spec.md §8 scenario 1.
        let input = [0x78, 0x9c, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut out = [0u8; 0];
        let n = decompress_zlib(&input, &mut out).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn single_literal_a() {
        // spec.md §8 scenario 2.
        let input = [0x78, 0x9c, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];
        let mut out = [0u8; 4];
        let n = decompress_zlib(&input, &mut out).unwrap();
        assert_eq!(&out[..n], &[0x41]);
    }

    #[test]
    fn corrupt_checksum_is_rejected() {
        let mut input = [0x78, 0x9c, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];
        *input.last_mut().unwrap() ^= 0xff;
        let mut out = [0u8; 4];
        let err = decompress_zlib(&input, &mut out).unwrap_err();
        assert!(matches!(err, DeflateError::ChecksumMismatch { .. }));
    }

    #[test]
    fn output_too_small_fails_without_oob_write() {
        let input = [0x78, 0x9c, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];
        let mut out: [u8; 0] = [];
        let err = decompress_zlib(&input, &mut out).unwrap_err();
        assert!(matches!(err, DeflateError::OutputOverflow { .. }));
    }

    #[test]
    fn truncated_header_is_reported() {
        let input = [0x78];
        let mut out = [0u8; 4];
        let err = decompress_zlib(&input, &mut out).unwrap_err();
        assert!(matches!(
            err,
            DeflateError::Truncated {
                stage: Stage::Header
            }
        ));
    }

    #[test]
    fn unsupported_method_is_reported() {
        let input = [0x79, 0x9c];
        let mut out = [0u8; 4];
        let err = decompress_zlib(&input, &mut out).unwrap_err();
        assert!(matches!(err, DeflateError::UnsupportedMethod { method: 9 }));
    }
}
