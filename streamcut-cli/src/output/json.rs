//! JSON output formatter

use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::OutputFormatter;

/// JSON formatter - outputs units as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    units: Vec<UnitData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct UnitData {
    /// Unit kind: `"sentence"` or `"region"`
    pub kind: String,
    /// Marker label, present only for region units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The unit text
    pub text: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            units: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn sentence(&mut self, text: &str) -> Result<()> {
        self.units.push(UnitData {
            kind: "sentence".to_string(),
            label: None,
            text: text.to_string(),
        });
        Ok(())
    }

    fn region(&mut self, label: &str, text: &str) -> Result<()> {
        self.units.push(UnitData {
            kind: "region".to_string(),
            label: Some(label.to_string()),
            text: text.trim().to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.units)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_parseable_array() {
        let mut out = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut out);
            formatter.sentence("Hello there.").unwrap();
            formatter.region("note", "remember this").unwrap();
            formatter.finish().unwrap();
        }
        let units: Vec<UnitData> = serde_json::from_slice(&out).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].kind, "sentence");
        assert!(units[0].label.is_none());
        assert_eq!(units[1].label.as_deref(), Some("note"));
    }

    #[test]
    fn empty_run_still_closes_the_array() {
        let mut out = Vec::new();
        JsonFormatter::new(&mut out).finish().unwrap();
        let units: Vec<UnitData> = serde_json::from_slice(&out).unwrap();
        assert!(units.is_empty());
    }
}
