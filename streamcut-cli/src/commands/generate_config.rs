//! Generate config command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        let Some(path) = &self.output else {
            print!("{}", CliConfig::sample());
            return Ok(());
        };

        fs::write(path, CliConfig::sample())
            .with_context(|| format!("Failed to write to {}", path.display()))?;

        println!("✓ Sample configuration written to {}", path.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the marker pairs and completion backend to match your setup");
        println!("2. Segment a file with it:");
        println!("   streamcut segment -i input.txt -c {}", path.display());
        println!("3. Or drive a live completion:");
        println!("   streamcut complete -c {} \"your prompt\"", path.display());

        Ok(())
    }
}
