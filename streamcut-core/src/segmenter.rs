//! The incremental segmentation engine
//!
//! [`StreamSegmenter`] owns all mutable scanning state: the working buffer,
//! the verbatim full-text accumulator, and the ordered set of currently open
//! markers. Each arriving fragment is appended and then a consume loop runs
//! until no extraction rule matches the buffered text, at which point the
//! engine waits for more input. Running out of matches is the normal idle
//! state, not an error.

use smallvec::SmallVec;

use crate::error::Result;
use crate::marker::{MarkerRule, MarkerSpec};
use crate::splitter::unit_prefix_len;

/// Callback invoked with each completed sentence unit
///
/// Receives the unit with surrounding whitespace trimmed; never invoked with
/// empty text.
pub type SentenceCallback<'a> = Box<dyn FnMut(&str) + 'a>;

/// Incremental segmentation engine over one fragment stream
///
/// Feed fragments with [`push_fragment`](Self::push_fragment) and close the
/// stream with [`finish`](Self::finish), or hand an entire fragment sequence
/// to [`run`](Self::run). Callbacks fire synchronously, in buffer order,
/// while fragments are being consumed.
///
/// ```
/// use streamcut_core::StreamSegmenter;
///
/// let mut sentences = Vec::new();
/// let full = StreamSegmenter::builder()
///     .sentence_callback(|s| sentences.push(s.to_string()))
///     .build()
///     .unwrap()
///     .run(["Hello wo", "rld. How are", " you?"]);
///
/// assert_eq!(sentences, vec!["Hello world.", "How are you?"]);
/// assert_eq!(full, "Hello world. How are you?");
/// ```
pub struct StreamSegmenter<'a> {
    specs: Vec<MarkerSpec<'a>>,
    sentence: Option<SentenceCallback<'a>>,
    buffer: String,
    full_text: String,
    /// Indices into `specs` in open order; only the oldest entry is drained.
    active: SmallVec<[usize; 2]>,
}

impl<'a> StreamSegmenter<'a> {
    /// Create a builder
    pub fn builder() -> StreamSegmenterBuilder<'a> {
        StreamSegmenterBuilder::new()
    }

    /// Feed one fragment and scan until no more units can be extracted
    pub fn push_fragment(&mut self, fragment: &str) {
        self.full_text.push_str(fragment);
        self.buffer.push_str(fragment);
        self.pump();
    }

    /// Close the stream, flush leftover text, and return the full input
    ///
    /// Unterminated markers are dropped without invoking their callbacks;
    /// their buffered content, and any other remaining text, goes to the
    /// sentence callback whole (trimmed) when non-empty. The returned string
    /// is the byte-for-byte concatenation of every fragment pushed,
    /// regardless of what the callbacks saw.
    pub fn finish(mut self) -> String {
        self.flush();
        self.full_text
    }

    /// Consume an entire fragment sequence and return the full input
    pub fn run<I>(mut self, fragments: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for fragment in fragments {
            self.push_fragment(fragment.as_ref());
        }
        self.finish()
    }

    /// Full verbatim input consumed so far
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Buffered text not yet emitted or discarded
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Whether a marker region is currently open
    pub fn in_region(&self) -> bool {
        !self.active.is_empty()
    }

    fn pump(&mut self) {
        while !self.buffer.is_empty() {
            let progressed = if self.active.is_empty() {
                self.open_marker() || self.emit_sentence()
            } else {
                self.drain_markers()
            };
            if !progressed {
                break;
            }
        }
    }

    /// Close the oldest open marker whose end token has arrived.
    ///
    /// Closure does not depend on the enclosed content; only the callback
    /// invocation is skipped for whitespace-only regions.
    fn drain_markers(&mut self) -> bool {
        for slot in 0..self.active.len() {
            let spec_idx = self.active[slot];
            let found = {
                let end = self.specs[spec_idx].rule.end.as_str();
                self.buffer.find(end).map(|at| (at, end.len()))
            };
            let Some((at, end_len)) = found else {
                continue;
            };
            let enclosed = self.buffer[..at].to_string();
            self.buffer.drain(..at + end_len);
            self.active.remove(slot);
            if !enclosed.trim().is_empty() {
                if let Some(callback) = self.specs[spec_idx].callback.as_mut() {
                    callback(&enclosed);
                }
            }
            return true;
        }
        false
    }

    /// Open the first registered marker whose start token has arrived.
    ///
    /// Text ahead of the start token is dropped, not routed anywhere. Opens
    /// are only attempted while no marker is active, so nesting reduces to
    /// draining one region at a time.
    fn open_marker(&mut self) -> bool {
        for (idx, spec) in self.specs.iter().enumerate() {
            if let Some(at) = self.buffer.find(spec.rule.start.as_str()) {
                self.buffer.drain(..at + spec.rule.start.len());
                self.active.push(idx);
                return true;
            }
        }
        false
    }

    /// Extract one completed sentence unit from the front of the buffer.
    fn emit_sentence(&mut self) -> bool {
        let Some(len) = unit_prefix_len(&self.buffer) else {
            return false;
        };
        let unit = self.buffer[..len].to_string();
        self.buffer.drain(..len);
        let trimmed = unit.trim();
        if !trimmed.is_empty() {
            if let Some(callback) = self.sentence.as_mut() {
                callback(trimmed);
            }
        }
        true
    }

    fn flush(&mut self) {
        while !self.buffer.is_empty() {
            if self.active.is_empty() {
                let trimmed = self.buffer.trim();
                if !trimmed.is_empty() {
                    if let Some(callback) = self.sentence.as_mut() {
                        callback(trimmed);
                    }
                }
                self.buffer.clear();
                break;
            }
            self.active.remove(0);
        }
    }
}

/// Builder for [`StreamSegmenter`]
///
/// Marker registration order defines priority: when several start tokens are
/// present in the buffer at once, the earliest-registered rule wins.
pub struct StreamSegmenterBuilder<'a> {
    specs: Vec<MarkerSpec<'a>>,
    sentence: Option<SentenceCallback<'a>>,
}

impl Default for StreamSegmenterBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StreamSegmenterBuilder<'a> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            sentence: None,
        }
    }

    /// Set the callback receiving completed sentence units
    pub fn sentence_callback(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.sentence = Some(Box::new(callback));
        self
    }

    /// Register a marker pair routing enclosed text to `callback`
    pub fn marker(
        self,
        start: impl Into<String>,
        end: impl Into<String>,
        callback: impl FnMut(&str) + 'a,
    ) -> Self {
        self.marker_spec(MarkerSpec::new(MarkerRule::new(start, end), callback))
    }

    /// Register a marker pair whose enclosed text is consumed silently
    pub fn silent_marker(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.marker_spec(MarkerSpec::silent(MarkerRule::new(start, end)))
    }

    /// Register a pre-built marker spec
    pub fn marker_spec(mut self, spec: MarkerSpec<'a>) -> Self {
        self.specs.push(spec);
        self
    }

    /// Validate the marker rules and build the engine
    pub fn build(self) -> Result<StreamSegmenter<'a>> {
        for spec in &self.specs {
            spec.rule().validate()?;
        }
        Ok(StreamSegmenter {
            specs: self.specs,
            sentence: self.sentence,
            buffer: String::new(),
            full_text: String::new(),
            active: SmallVec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_marker_token_fails_build() {
        let result = StreamSegmenter::builder()
            .silent_marker("", "</tag>")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn no_callbacks_still_returns_full_text() {
        let full = StreamSegmenter::builder()
            .build()
            .unwrap()
            .run(["one ", "two ", "three"]);
        assert_eq!(full, "one two three");
    }

    #[test]
    fn pending_reflects_unextracted_text() {
        let mut segmenter = StreamSegmenter::builder().build().unwrap();
        segmenter.push_fragment("Complete. Partial tai");
        assert_eq!(segmenter.pending(), "Partial tai");
        assert_eq!(segmenter.full_text(), "Complete. Partial tai");
    }

    #[test]
    fn whitespace_only_region_closes_without_callback() {
        let mut regions = Vec::new();
        let mut sentences = Vec::new();
        StreamSegmenter::builder()
            .sentence_callback(|s| sentences.push(s.to_string()))
            .marker("<r>", "</r>", |r| regions.push(r.to_string()))
            .build()
            .unwrap()
            .run(["<r>  </r>after."]);
        assert!(regions.is_empty());
        assert_eq!(sentences, vec!["after."]);
    }

    #[test]
    fn region_text_is_delivered_untrimmed() {
        let mut regions = Vec::new();
        StreamSegmenter::builder()
            .marker("<r>", "</r>", |r| regions.push(r.to_string()))
            .build()
            .unwrap()
            .run(["<r> padded </r>"]);
        assert_eq!(regions, vec![" padded "]);
    }

    #[test]
    fn in_region_tracks_open_markers() {
        let mut segmenter = StreamSegmenter::builder()
            .silent_marker("<r>", "</r>")
            .build()
            .unwrap();
        segmenter.push_fragment("<r>open");
        assert!(segmenter.in_region());
        segmenter.push_fragment("ed</r>");
        assert!(!segmenter.in_region());
    }

    #[test]
    fn marker_priority_follows_registration_order() {
        let mut hits = Vec::new();
        {
            let log = std::cell::RefCell::new(&mut hits);
            StreamSegmenter::builder()
                .marker("<a>", "</a>", |t| log.borrow_mut().push(format!("a:{t}")))
                .marker("<b>", "</b>", |t| log.borrow_mut().push(format!("b:{t}")))
                .build()
                .unwrap()
                .run(["<b>late</b><a>early</a>"]);
        }
        // "<a>" is registered first, so it opens even though "<b>" appears
        // earlier in the buffer; the text ahead of it is dropped.
        assert_eq!(hits, vec!["a:early".to_string()]);
    }
}
