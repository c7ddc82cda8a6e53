//! The caller-owned output buffer: a fixed-capacity slice plus a write
//! cursor, per spec.md §3 ("Output Buffer").

use crate::error::DeflateError;

pub struct OutputCursor<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> OutputCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// The bytes written so far, i.e. `buf[0..len]`.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Appends a single literal byte.
    pub fn push(&mut self, byte: u8) -> Result<(), DeflateError> {
        if self.len >= self.buf.len() {
            return Err(DeflateError::OutputOverflow {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Copies `buf.len()` literal bytes straight from a stored block.
    pub fn push_slice(&mut self, data: &[u8]) -> Result<(), DeflateError> {
        if self.len + data.len() > self.buf.len() {
            return Err(DeflateError::OutputOverflow {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
        Ok(())
    }

    /// Expands an LZ77 back-reference: copies `length` bytes from
    /// `distance` bytes before the write cursor. Copies one byte at a time,
    /// as spec.md §4.4.5 and the "Design Notes — Cyclic / back-reference
    /// semantics" section require — a block `memmove` would not reproduce
    /// the repeating pattern DEFLATE prescribes when `distance < length`.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<(), DeflateError> {
        if distance == 0 || distance > self.len {
            return Err(DeflateError::BadDistance {
                distance,
                produced: self.len,
            });
        }
        if self.len + length > self.buf.len() {
            return Err(DeflateError::OutputOverflow {
                capacity: self.buf.len(),
            });
        }
        let mut src = self.len - distance;
        for _ in 0..length {
            let byte = self.buf[src];
            self.buf[self.len] = byte;
            self.len += 1;
            src += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_copy_produces_run_length_pattern() {
        let mut buf = [0u8; 10];
        let mut out = OutputCursor::new(&mut buf);
        out.push(b'a').unwrap();
        out.copy_match(1, 9).unwrap();
        assert_eq!(&buf, b"aaaaaaaaaa");
    }

    #[test]
    fn distance_past_start_is_bad_distance() {
        let mut buf = [0u8; 4];
        let mut out = OutputCursor::new(&mut buf);
        let err = out.copy_match(1, 1).unwrap_err();
        assert!(matches!(err, DeflateError::BadDistance { .. }));
    }

    #[test]
    fn overflow_is_rejected_without_partial_write() {
        let mut buf = [0u8; 2];
        let mut out = OutputCursor::new(&mut buf);
        out.push(1).unwrap();
        out.push(2).unwrap();
        assert!(out.push(3).is_err());
    }
}
