//! Plain text output formatter

use std::io::Write;

use anyhow::Result;

use super::OutputFormatter;

/// Plain text formatter - one unit per line, regions prefixed with their label
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn sentence(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    fn region(&mut self, label: &str, text: &str) -> Result<()> {
        writeln!(self.writer, "[{label}] {}", text.trim())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
