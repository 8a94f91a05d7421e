//! Transcript-replay backend
//!
//! Streams a recorded response back in fixed-size fragments. Useful for
//! offline runs, demos, and exercising downstream segmentation without a
//! generation source.

use std::fs;
use std::path::PathBuf;

use crate::backend::{CompletionBackend, CompletionRequest, FragmentStream};
use crate::error::Result;

/// Backend that replays a transcript file as a fragment stream
#[derive(Debug, Clone)]
pub struct ReplayBackend {
    path: PathBuf,
    fragment_bytes: usize,
}

impl ReplayBackend {
    /// Default fragment size, roughly the size of a few streamed tokens
    pub const DEFAULT_FRAGMENT_BYTES: usize = 24;

    /// Create a replay backend reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fragment_bytes: Self::DEFAULT_FRAGMENT_BYTES,
        }
    }

    /// Override the fragment size (minimum one byte)
    pub fn with_fragment_bytes(mut self, bytes: usize) -> Self {
        self.fragment_bytes = bytes.max(1);
        self
    }
}

impl CompletionBackend for ReplayBackend {
    fn name(&self) -> &str {
        "replay"
    }

    fn stream_completion(&self, _request: &CompletionRequest) -> Result<FragmentStream> {
        let text = fs::read_to_string(&self.path)?;
        log::debug!(
            "replaying {} bytes from {} in {}-byte fragments",
            text.len(),
            self.path.display(),
            self.fragment_bytes,
        );
        Ok(Box::new(chunk_fragments(&text, self.fragment_bytes).into_iter()))
    }
}

/// Split text into fragments of roughly `size` bytes, snapped forward to
/// char boundaries.
fn chunk_fragments(text: &str, size: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + size).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        fragments.push(text[start..end].to_string());
        start = end;
    }
    fragments
}
