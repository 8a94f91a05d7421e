//! Marker pair definitions
//!
//! A marker pair delimits a region of the stream that is routed to its own
//! callback instead of the general sentence callback. The rule half is plain
//! data so configuration files can carry ordered rule lists; the spec half
//! couples a rule with the callback that receives the enclosed text.

use std::fmt;

use crate::error::{Result, SegmenterError};

/// A start/end token pair delimiting a routed region
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerRule {
    /// Token that opens the region
    pub start: String,
    /// Token that closes the region
    pub end: String,
}

impl MarkerRule {
    /// Create a rule from a start/end token pair
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Reject rules that could never close, or would match everywhere
    pub(crate) fn validate(&self) -> Result<()> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(SegmenterError::EmptyMarkerToken {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok(())
    }
}

/// Callback invoked with the text enclosed by a marker pair
///
/// Receives the enclosed text exactly as buffered, marker tokens stripped,
/// surrounding whitespace preserved. Never invoked with whitespace-only
/// content.
pub type RegionCallback<'a> = Box<dyn FnMut(&str) + 'a>;

/// A marker rule coupled with its optional region callback
pub struct MarkerSpec<'a> {
    pub(crate) rule: MarkerRule,
    pub(crate) callback: Option<RegionCallback<'a>>,
}

impl<'a> MarkerSpec<'a> {
    /// Create a spec whose enclosed text is consumed without a callback
    pub fn silent(rule: MarkerRule) -> Self {
        Self {
            rule,
            callback: None,
        }
    }

    /// Create a spec routing enclosed text to `callback`
    pub fn new(rule: MarkerRule, callback: impl FnMut(&str) + 'a) -> Self {
        Self {
            rule,
            callback: Some(Box::new(callback)),
        }
    }

    /// The underlying start/end token pair
    pub fn rule(&self) -> &MarkerRule {
        &self.rule
    }
}

impl fmt::Debug for MarkerSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerSpec")
            .field("rule", &self.rule)
            .field("callback", &self.callback.as_ref().map(|_| "FnMut(&str)"))
            .finish()
    }
}
