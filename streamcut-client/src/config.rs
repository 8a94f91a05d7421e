//! Client configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;
use crate::error::{ClientError, Result};

fn default_model() -> String {
    "local".to_string()
}

fn default_max_tokens() -> usize {
    4096
}

/// Client configuration, usually the `[completion]` section of a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Which backend variant to instantiate
    pub backend: BackendKind,
    /// Model identifier forwarded with each request
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum history size in estimated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Transcript path, required by the replay backend
    #[serde(default)]
    pub transcript: Option<PathBuf>,
    /// Command line for the command backend; `{model}` expands to the model
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Replay,
            model: default_model(),
            max_tokens: default_max_tokens(),
            transcript: None,
            command: None,
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| ClientError::Config(err.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = ClientConfig::from_toml_str("backend = \"command\"").unwrap();
        assert_eq!(config.backend, BackendKind::Command);
        assert_eq!(config.model, "local");
        assert_eq!(config.max_tokens, 4096);
        assert!(config.command.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config = ClientConfig::from_toml_str(
            r#"
            backend = "command"
            model = "llama3"
            max_tokens = 2048
            command = ["ollama", "run", "{model}"]
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(
            config.command.as_deref(),
            Some(["ollama", "run", "{model}"].map(String::from).as_slice())
        );
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let err = ClientConfig::from_toml_str("backend = \"perplexity\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
