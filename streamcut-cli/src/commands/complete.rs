//! Complete command implementation

use std::cell::RefCell;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use streamcut_client::{CompletionManager, Message};

use crate::commands::{init_logging, routed_segmenter, UnitCounters};
use crate::config::CliConfig;
use crate::output::{self, OutputFormat};

/// Arguments for the complete command
#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Prompt text (default: read from stdin)
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Configuration file with a [completion] section
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// System instructions prepended to the history
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Override the configured model
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CompleteArgs {
    /// Execute the complete command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        let config = CliConfig::load(&self.config)?;
        let completion = config
            .completion
            .as_ref()
            .with_context(|| {
                format!(
                    "config file {} has no [completion] section",
                    self.config.display()
                )
            })?;
        let manager = CompletionManager::from_config(completion, self.verbose > 0)?;

        let prompt = match &self.prompt {
            Some(text) => text.clone(),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read prompt from stdin")?;
                text
            }
        };
        let mut messages = Vec::new();
        if let Some(system) = &self.system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));
        let model = self.model.as_deref().unwrap_or(&completion.model);

        let sink = RefCell::new(output::formatter(self.format, self.output.as_deref())?);
        let counters = UnitCounters::default();
        let failure = RefCell::new(None);
        let segmenter = routed_segmenter(&config.segmenter.markers, &sink, &counters, &failure)?;

        let Some(full) = manager.stream_segmented(messages, model, segmenter) else {
            bail!("completion request failed; re-run with -v for details");
        };

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        sink.borrow_mut().finish()?;
        log::info!(
            "received {} bytes: {} sentences, {} routed regions",
            full.len(),
            counters.sentences.get(),
            counters.regions.get(),
        );
        Ok(())
    }
}
