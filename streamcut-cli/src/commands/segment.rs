//! Segment command implementation

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;

use crate::commands::{init_logging, routed_segmenter, UnitCounters};
use crate::config::CliConfig;
use crate::input::{FragmentReader, DEFAULT_CHUNK_SIZE};
use crate::output::{self, OutputFormat};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Fragment size in bytes for the simulated stream
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let chunk_size = self
            .chunk_size
            .or(config.segmenter.chunk_size)
            .unwrap_or(DEFAULT_CHUNK_SIZE);
        ensure!(chunk_size > 0, "chunk size must be greater than 0");

        let reader: Box<dyn Read> = match &self.input {
            Some(path) => Box::new(File::open(path).with_context(|| {
                format!("failed to open input file {}", path.display())
            })?),
            None => Box::new(io::stdin()),
        };

        log::info!("segmenting in {chunk_size}-byte fragments");
        let sink = RefCell::new(output::formatter(self.format, self.output.as_deref())?);
        let counters = UnitCounters::default();
        let failure = RefCell::new(None);
        let mut segmenter =
            routed_segmenter(&config.segmenter.markers, &sink, &counters, &failure)?;

        for fragment in FragmentReader::new(reader, chunk_size) {
            segmenter.push_fragment(&fragment.context("failed to read input")?);
        }
        let full = segmenter.finish();

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        sink.borrow_mut().finish()?;
        log::info!(
            "segmented {} bytes into {} sentences and {} routed regions",
            full.len(),
            counters.sentences.get(),
            counters.regions.get(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn args(input: PathBuf, output: PathBuf, config: Option<PathBuf>) -> SegmentArgs {
        SegmentArgs {
            input: Some(input),
            output: Some(output),
            format: OutputFormat::Text,
            chunk_size: Some(8),
            config,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn segments_a_file_into_sentences() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("input.txt");
        let output = temp.path().join("output.txt");
        fs::write(&input, "Hello world. How are you?").unwrap();

        args(input, output.clone(), None).execute().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "Hello world.\nHow are you?\n");
    }

    #[test]
    fn config_markers_route_regions() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("input.txt");
        let output = temp.path().join("output.txt");
        let config = temp.path().join("streamcut.toml");
        fs::write(&input, "<note>aside</note>Carry on.").unwrap();
        fs::write(
            &config,
            "[[segmenter.markers]]\nname = \"note\"\nstart = \"<note>\"\nend = \"</note>\"\n",
        )
        .unwrap();

        args(input, output.clone(), Some(config)).execute().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "[note] aside\nCarry on.\n");
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("input.txt");
        fs::write(&input, "text").unwrap();
        let mut args = args(input, temp.path().join("out.txt"), None);
        args.chunk_size = Some(0);

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = args(
            temp.path().join("no-such-file.txt"),
            temp.path().join("out.txt"),
            None,
        );
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("failed to open input file"));
    }
}
