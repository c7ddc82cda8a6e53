//! RFC 1950 zlib wrapper: the 2-byte header and the optional preset
//! dictionary identifier. Field layout and validation order follow
//! `original_source/src/deflate.c`'s `deflate_decompress` (lines
//! ~1580-1680): `CMF` low nibble is the compression method, `CMF` high
//! nibble is `CINFO`; `FLG` bit 5 is `FDICT`, bits 6-7 the advisory
//! compression level.

use crate::error::{DeflateError, Stage};
use crate::options::DecompressOptions;

pub struct Header {
    /// `log2(window_size) - 8`; the window itself is not otherwise used
    /// since this decoder holds the whole output buffer at once.
    pub cinfo: u8,
}

/// Parses the 2-byte header (and, if `FDICT` is set, the 4-byte big-endian
/// dictionary id) from the front of `input`. Returns the header and the
/// number of bytes consumed.
pub fn read_header(
    input: &[u8],
    options: &DecompressOptions,
) -> Result<(Header, usize), DeflateError> {
    if input.len() < 2 {
        return Err(DeflateError::Truncated {
            stage: Stage::Header,
        });
    }
    let cmf = input[0];
    let flg = input[1];

    let method = cmf & 0x0f;
    if method != 8 {
        return Err(DeflateError::UnsupportedMethod { method });
    }

    let cinfo = cmf >> 4;
    if cinfo > 7 {
        return Err(DeflateError::UnsupportedWindow { cinfo });
    }

    if options.enforce_header_check_bits {
        let header_value = ((cmf as u16) << 8) | flg as u16;
        if header_value % 31 != 0 {
            return Err(DeflateError::BadHeader { cmf, flg });
        }
    }

    let fdict = (flg & 0x20) != 0;

    if fdict {
        if input.len() < 6 {
            return Err(DeflateError::Truncated {
                stage: Stage::Header,
            });
        }
        let id = u32::from_be_bytes([input[2], input[3], input[4], input[5]]);
        #[cfg(feature = "trace")]
        log::trace!("zlib stream requires preset dictionary 0x{id:08x}");
        return Err(DeflateError::PresetDictionaryRequired { id });
    }

    Ok((Header { cinfo }, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_deflate_method() {
        let options = DecompressOptions::default();
        let err = read_header(&[0x79, 0x9c], &options).unwrap_err();
        assert!(matches!(err, DeflateError::UnsupportedMethod { method: 9 }));
    }

    #[test]
    fn rejects_oversized_window() {
        let options = DecompressOptions::default();
        // cinfo = 8 (high nibble) -> unsupported window.
        let err = read_header(&[0x88, 0x9c], &options).unwrap_err();
        assert!(matches!(err, DeflateError::UnsupportedWindow { cinfo: 8 }));
    }

    #[test]
    fn accepts_standard_header() {
        let options = DecompressOptions::default();
        let (header, consumed) = read_header(&[0x78, 0x9c], &options).unwrap();
        assert_eq!(header.cinfo, 7);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn preset_dictionary_is_reported_then_rejected() {
        let options = DecompressOptions::default();
        let input = [0x78, 0x20 | 0x08, 0x00, 0x00, 0x00, 0x01];
        let err = read_header(&input, &options).unwrap_err();
        assert!(matches!(
            err,
            DeflateError::PresetDictionaryRequired { id: 1 }
        ));
    }

    #[test]
    fn strict_header_check_bits() {
        let options = DecompressOptions::strict();
        // 0x78 0x9c is a real multiple-of-31 header (0x789c = 30876 = 31*996).
        assert!(read_header(&[0x78, 0x9c], &options).is_ok());
        // Flip a check bit to break divisibility.
        let err = read_header(&[0x78, 0x9d], &options).unwrap_err();
        assert!(matches!(err, DeflateError::BadHeader { .. }));
    }
}
