//! Command-line interface for pinmerge

use clap::Parser;

mod commands;
mod config;
mod error;
mod input;
mod output;
mod progress;

use commands::Commands;
use error::CliResult;

/// Align context-free and context-aware pinyin for mixed-script text
#[derive(Debug, Parser)]
#[command(name = "pinmerge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
