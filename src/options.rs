//! Per-call decoder options.
//!
//! The source this crate was extracted from gates its verbose tracing
//! facility behind a process-global `libcnotify_verbose` flag. A global is
//! the wrong shape in Rust: two concurrent decompress calls would fight over
//! it. This struct carries the same two knobs as ordinary call parameters
//! instead.

/// Tuning knobs for [`crate::decompress_zlib_with_options`].
///
/// The `Default` impl matches the behavior actually observed in
/// `original_source/src/deflate.c`: the header check-bits test is written up
/// in a comment but never wired in, and a short (or absent) trailer is
/// silently tolerated rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressOptions {
    /// Require exactly 4 trailer bytes and fail `Truncated` if fewer remain.
    /// When `false`, a missing or short trailer skips checksum verification
    /// entirely, matching the tolerant behavior of the original source.
    pub strict_trailer: bool,

    /// Enforce that the 16-bit big-endian zlib header is a multiple of 31
    /// (the `FCHECK` bits), failing `BadHeader` otherwise.
    pub enforce_header_check_bits: bool,
}

impl Default for DecompressOptions {
    fn default() -> Self {
        Self {
            strict_trailer: false,
            enforce_header_check_bits: false,
        }
    }
}

impl DecompressOptions {
    /// Options for strict RFC 1950 conformance: both checks enabled.
    pub fn strict() -> Self {
        Self {
            strict_trailer: true,
            enforce_header_check_bits: true,
        }
    }
}
