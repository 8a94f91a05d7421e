//! Output formatting module

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single sentence unit
    fn sentence(&mut self, text: &str) -> Result<()>;

    /// Format and output a routed marker region
    fn region(&mut self, label: &str, text: &str) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one unit per line
    Text,
    /// JSON array of units with routing labels
    Json,
}

/// Build a formatter for `format` writing to `output`, or stdout when `None`
pub fn formatter(format: OutputFormat, output: Option<&Path>) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?),
        None => Box::new(io::stdout()),
    };
    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    })
}
