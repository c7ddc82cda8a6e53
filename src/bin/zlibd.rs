//! Thin demonstration binary around `deflate_forensic_core`. Mirrors the
//! shape of the teacher's `src/bin/gzipd.rs`: a `structopt` argument struct,
//! a whole-file read, a call into the library, a whole-file write. No
//! streaming, no verbose tracing flag — those live in the library itself
//! now (see `options::DecompressOptions` and the `trace` feature).

use deflate_forensic_core::{decompress_zlib, DeflateError};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "Decompress a zlib-wrapped DEFLATE file")]
struct ZlibdParams {
    /// Path to the zlib-compressed input file.
    input: PathBuf,

    /// Where to write the decompressed bytes. Defaults to `input` with its
    /// extension stripped.
    output: Option<PathBuf>,
}

/// Output buffers start at this size and double on `OutputOverflow`, per
/// spec.md §7's guidance that `OutputOverflow` is the one error a caller
/// should retry, with a larger buffer.
const INITIAL_CAPACITY: usize = 1 << 16;

fn main() -> ExitCode {
    #[cfg(feature = "trace")]
    env_logger::init();

    let params = ZlibdParams::from_args();

    let compressed = match fs::read(&params.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("zlibd: reading {}: {e}", params.input.display());
            return ExitCode::FAILURE;
        }
    };

    let decompressed = match decompress_with_retry(&compressed) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("zlibd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let output_path = params
        .output
        .unwrap_or_else(|| params.input.with_extension(""));
    if let Err(e) = fs::write(&output_path, &decompressed) {
        eprintln!("zlibd: writing {}: {e}", output_path.display());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn decompress_with_retry(compressed: &[u8]) -> Result<Vec<u8>, DeflateError> {
    let mut capacity = INITIAL_CAPACITY;
    loop {
        let mut buf = vec![0u8; capacity];
        match decompress_zlib(compressed, &mut buf) {
            Ok(written) => {
                buf.truncate(written);
                return Ok(buf);
            }
            Err(DeflateError::OutputOverflow { .. }) if capacity < (1 << 30) => {
                capacity *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}
