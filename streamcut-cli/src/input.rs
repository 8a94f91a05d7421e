//! Fragment sources for simulated streaming

use std::io::{self, Read};

/// Default fragment size when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// Turns any reader into a sequence of UTF-8 fragments of roughly
/// `chunk_size` bytes.
///
/// Reads that split a multi-byte character carry the partial bytes into the
/// next fragment, so every yielded fragment is valid UTF-8.
pub struct FragmentReader<R: Read> {
    inner: R,
    chunk_size: usize,
    carry: Vec<u8>,
    done: bool,
}

impl<R: Read> FragmentReader<R> {
    /// Create a fragment reader over `inner`
    pub fn new(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            chunk_size: chunk_size.max(1),
            carry: Vec::new(),
            done: false,
        }
    }
}

impl<R: Read> Iterator for FragmentReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done && self.carry.is_empty() {
                return None;
            }

            let mut buf = std::mem::take(&mut self.carry);
            if !self.done {
                let mut chunk = vec![0u8; self.chunk_size];
                loop {
                    match self.inner.read(&mut chunk) {
                        Ok(0) => {
                            self.done = true;
                            break;
                        }
                        Ok(read) => {
                            buf.extend_from_slice(&chunk[..read]);
                            break;
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    }
                }
            }

            if buf.is_empty() {
                return None;
            }

            match String::from_utf8(buf) {
                Ok(text) => return Some(Ok(text)),
                Err(err) => {
                    let utf8_err = err.utf8_error();
                    // A char split across reads is recoverable; a genuinely
                    // invalid sequence, or a split with no input left, is not.
                    if utf8_err.error_len().is_some() || self.done {
                        return Some(Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "input is not valid UTF-8",
                        )));
                    }
                    let valid = utf8_err.valid_up_to();
                    let mut bytes = err.into_bytes();
                    self.carry = bytes.split_off(valid);
                    match String::from_utf8(bytes) {
                        Ok(text) if !text.is_empty() => return Some(Ok(text)),
                        _ => continue,
                    }
                }
            }
        }
    }
}
