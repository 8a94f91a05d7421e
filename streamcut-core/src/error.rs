//! Error types for the segmentation engine

use thiserror::Error;

/// Errors surfaced while building a segmenter
///
/// The running engine itself has no error states: unmatched markers are
/// discarded at end of stream and missing terminators are resolved by the
/// final flush.
#[derive(Error, Debug)]
pub enum SegmenterError {
    /// A marker rule was supplied with an empty start or end token
    #[error("marker tokens must be non-empty (start: {start:?}, end: {end:?})")]
    EmptyMarkerToken {
        /// The start token as supplied
        start: String,
        /// The end token as supplied
        end: String,
    },
}

/// Result type for segmenter construction
pub type Result<T> = std::result::Result<T, SegmenterError>;
