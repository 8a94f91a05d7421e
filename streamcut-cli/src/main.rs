//! Command-line entry point for streamcut

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod input;
mod output;

/// Re-segment streamed text into sentences and routed marker regions
#[derive(Debug, Parser)]
#[command(name = "streamcut", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Re-segment a file or stdin as a simulated fragment stream
    Segment(commands::segment::SegmentArgs),
    /// Drive a configured completion backend and segment its live output
    Complete(commands::complete::CompleteArgs),
    /// Print a documented sample configuration file
    GenerateConfig(commands::generate_config::GenerateConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Segment(args) => args.execute(),
        Commands::Complete(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    }
}
