//! Incremental re-segmentation of streamed text
//!
//! This crate turns a sequence of arbitrarily split text fragments, as
//! produced by a streaming generation source, back into meaningful units:
//! free-form sentences routed to a general callback, and regions delimited
//! by caller-supplied start/end marker pairs routed to per-marker callbacks
//! with the marker tokens stripped from the stream.

#![warn(missing_docs)]

pub mod error;
pub mod marker;
pub mod segmenter;
mod splitter;

// Re-export key types
pub use error::{Result, SegmenterError};
pub use marker::{MarkerRule, MarkerSpec, RegionCallback};
pub use segmenter::{SentenceCallback, StreamSegmenter, StreamSegmenterBuilder};

/// Split a complete text into sentence units using the streaming rules.
///
/// Convenience wrapper over [`StreamSegmenter`] for text that is already
/// fully available.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let segmenter = StreamSegmenter::builder()
        .sentence_callback(|sentence| sentences.push(sentence.to_string()))
        .build()
        .expect("builder without marker rules cannot fail");
    segmenter.run([text]);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sentences_on_complete_text() {
        let sentences = split_sentences("First point. Second point! Third?");
        assert_eq!(sentences, vec!["First point.", "Second point!", "Third?"]);
    }

    #[test]
    fn split_sentences_flushes_trailing_text() {
        let sentences = split_sentences("Done. And one more without an end");
        assert_eq!(sentences, vec!["Done.", "And one more without an end"]);
    }
}
