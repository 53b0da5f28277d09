//! Filter command implementation

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pinmerge_core::RepetitionFilter;
use rayon::prelude::*;

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::output::open_writer;

/// Arguments for the filter command
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "PINMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// N-gram window in characters (overrides the config)
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Occurrences tolerated per pattern (overrides the config)
    #[arg(short = 'n', long)]
    pub tolerance: Option<usize>,

    /// Print the repetitive lines instead of the clean ones
    #[arg(long)]
    pub invert: bool,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl FilterArgs {
    /// Execute the filter command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let config = CliConfig::load(self.config.as_deref())?;
        let filter = self.filter(&config);
        log::debug!("Repetition filter: {:?}", filter);

        let files = resolve_patterns(&self.input)?;
        let mut writer = open_writer(self.output.as_deref())?;

        let (mut kept, mut total) = (0, 0);
        for path in &files {
            let lines = FileReader::read_lines(path)?;
            let selected = select_lines(&lines, filter, self.invert);
            for line in &selected {
                writeln!(writer, "{line}")?;
            }
            kept += selected.len();
            total += lines.len();
        }
        writer.flush()?;

        log::info!("Kept {} of {} lines", kept, total);
        Ok(())
    }

    fn filter(&self, config: &CliConfig) -> RepetitionFilter {
        let mut filter = config.core.repetition_filter();
        if let Some(window) = self.window {
            filter.window = window;
        }
        if let Some(tolerance) = self.tolerance {
            filter.tolerance = tolerance;
        }
        filter
    }
}

/// Lines that pass the gate, or the ones that fail it when `invert` is set.
/// Input order is kept.
fn select_lines(lines: &[String], filter: RepetitionFilter, invert: bool) -> Vec<&str> {
    lines
        .par_iter()
        .filter(|line| filter.accepts(line) != invert)
        .map(String::as_str)
        .collect()
}
