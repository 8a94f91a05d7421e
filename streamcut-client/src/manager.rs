//! Completion manager
//!
//! Owns the configured backend and applies the request-side policies: the
//! token budget on the outgoing history, and the logged-or-verbose handling
//! of backend failures. Backend errors never propagate out of the manager;
//! they are reported through the log and collapse into `None`. Panics from
//! segmentation callbacks are not caught.

use streamcut_core::StreamSegmenter;

use crate::backend::{backend_for, CompletionBackend, CompletionRequest, FragmentStream};
use crate::budget::TokenBudget;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::message::Message;

/// Dispatch layer between a message history and a fragment-producing backend
pub struct CompletionManager {
    backend: Box<dyn CompletionBackend>,
    budget: TokenBudget,
    verbose: bool,
}

impl CompletionManager {
    /// Build a manager from configuration, instantiating the selected backend
    pub fn from_config(config: &ClientConfig, verbose: bool) -> Result<Self> {
        Ok(Self {
            backend: backend_for(config)?,
            budget: TokenBudget::new(config.max_tokens),
            verbose,
        })
    }

    /// Build a manager around an already-constructed backend
    pub fn with_backend(
        backend: Box<dyn CompletionBackend>,
        budget: TokenBudget,
        verbose: bool,
    ) -> Self {
        Self {
            backend,
            budget,
            verbose,
        }
    }

    /// Request a completion stream
    ///
    /// The history is budget-trimmed first. Backend failures are logged and
    /// collapse into `None`.
    pub fn stream(&self, mut messages: Vec<Message>, model: &str) -> Option<FragmentStream> {
        self.budget.clamp(&mut messages);
        let request = CompletionRequest::new(messages, model);
        match self.backend.stream_completion(&request) {
            Ok(stream) => Some(stream),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Request a completion and accumulate the whole response
    pub fn complete(&self, messages: Vec<Message>, model: &str) -> Option<String> {
        let stream = self.stream(messages, model)?;
        Some(stream.collect())
    }

    /// Stream a completion through a segmentation engine
    ///
    /// Callbacks registered on `segmenter` fire as the backend produces
    /// fragments. Returns the full unmodified response text, or `None` when
    /// the backend failed.
    pub fn stream_segmented(
        &self,
        messages: Vec<Message>,
        model: &str,
        segmenter: StreamSegmenter<'_>,
    ) -> Option<String> {
        let stream = self.stream(messages, model)?;
        Some(segmenter.run(stream))
    }

    fn report(&self, err: &ClientError) {
        if self.verbose {
            log::error!("{} completion request failed: {err:?}", self.backend.name());
        } else {
            log::error!("{} completion request failed: {err}", self.backend.name());
        }
    }
}
