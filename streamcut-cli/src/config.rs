//! Configuration file support

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use streamcut_client::ClientConfig;

/// Marker pair with a routing label for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Label attached to routed regions in the output
    pub name: String,
    /// Token that opens the region
    pub start: String,
    /// Token that closes the region
    pub end: String,
}

/// Segmenter section of the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Fragment size in bytes when simulating a stream from static input
    pub chunk_size: Option<usize>,
    /// Marker pairs, matched in the order they appear
    pub markers: Vec<MarkerConfig>,
}

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Segmenter settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    /// Completion backend settings, required by the `complete` command
    pub completion: Option<ClientConfig>,
}

impl CliConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Documented sample configuration
    pub fn sample() -> &'static str {
        SAMPLE_CONFIG
    }
}

const SAMPLE_CONFIG: &str = r#"# streamcut configuration

[segmenter]
# Fragment size in bytes when simulating a stream from static input.
chunk_size = 48

# Marker pairs are matched in the order they appear here; text between a
# pair is routed to its own output label instead of the sentence stream.
[[segmenter.markers]]
name = "clipboard"
start = "<clipboard>"
end = "</clipboard>"

# Used by the `complete` command. The `replay` backend streams a recorded
# transcript; the `command` backend spawns a local generation process and
# streams its stdout ("{model}" expands to the model below).
[completion]
backend = "command"
model = "llama3"
max_tokens = 4096
command = ["ollama", "run", "{model}"]
"#;
