//! Completion backend capability interface
//!
//! A backend is anything that can turn a message history into a stream of
//! text fragments. Which backend runs is decided once, at startup, by the
//! [`BackendKind`] carried in the configuration; the rest of the system only
//! ever talks to the [`CompletionBackend`] trait.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backends::{CommandBackend, ReplayBackend};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::message::Message;

/// Fragments produced by a streaming backend
pub type FragmentStream = Box<dyn Iterator<Item = String> + Send>;

/// Options forwarded to a backend with each request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Sampling temperature, interpreted by the backend
    pub temperature: Option<f32>,
    /// Hard cap on generated tokens, interpreted by the backend
    pub max_completion_tokens: Option<usize>,
}

/// A completion request: history, model, options
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Message history, already budget-trimmed
    pub messages: Vec<Message>,
    /// Model identifier forwarded to the backend
    pub model: String,
    /// Per-request options
    pub options: CompletionOptions,
}

impl CompletionRequest {
    /// Create a request with default options
    pub fn new(messages: Vec<Message>, model: impl Into<String>) -> Self {
        Self {
            messages,
            model: model.into(),
            options: CompletionOptions::default(),
        }
    }
}

/// Capability interface over a text-generation source
pub trait CompletionBackend: Send {
    /// Backend identifier used in logs
    fn name(&self) -> &str;

    /// Produce a stream of text fragments for the request
    fn stream_completion(&self, request: &CompletionRequest) -> Result<FragmentStream>;
}

/// Backend selector, parsed from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Stream a recorded transcript from a file
    Replay,
    /// Spawn a local generation process and stream its stdout
    Command,
}

impl BackendKind {
    /// Configuration key for this kind
    pub fn code(&self) -> &'static str {
        match self {
            BackendKind::Replay => "replay",
            BackendKind::Command => "command",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ClientError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "replay" => Ok(BackendKind::Replay),
            "command" => Ok(BackendKind::Command),
            other => Err(ClientError::UnsupportedBackend {
                name: other.to_string(),
            }),
        }
    }
}

/// Instantiate the backend selected by the configuration
pub fn backend_for(config: &ClientConfig) -> Result<Box<dyn CompletionBackend>> {
    match config.backend {
        BackendKind::Replay => {
            let path = config.transcript.clone().ok_or_else(|| {
                ClientError::Config("replay backend requires a transcript path".to_string())
            })?;
            Ok(Box::new(ReplayBackend::new(path)))
        }
        BackendKind::Command => {
            let argv = config
                .command
                .clone()
                .filter(|argv| !argv.is_empty())
                .ok_or_else(|| {
                    ClientError::Config("command backend requires a command line".to_string())
                })?;
            Ok(Box::new(CommandBackend::new(argv)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_names() {
        assert_eq!("replay".parse::<BackendKind>().unwrap(), BackendKind::Replay);
        assert_eq!(
            "command".parse::<BackendKind>().unwrap(),
            BackendKind::Command
        );
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = "openai".parse::<BackendKind>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported completion backend: openai");
    }

    #[test]
    fn code_round_trips() {
        for kind in [BackendKind::Replay, BackendKind::Command] {
            assert_eq!(kind.code().parse::<BackendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn replay_without_transcript_is_a_config_error() {
        let config = ClientConfig {
            backend: BackendKind::Replay,
            transcript: None,
            ..ClientConfig::default()
        };
        assert!(matches!(
            backend_for(&config),
            Err(ClientError::Config(_))
        ));
    }
}
