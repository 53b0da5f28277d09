//! Output formatting module

use anyhow::{Context, Result};
use pinmerge_engine::LineReport;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One converted line and where it came from
#[derive(Debug, Clone, Copy)]
pub struct LineRecord<'a> {
    /// Input file the line was read from
    pub source: &'a str,
    /// 1-based line number within the file
    pub line_number: usize,
    /// Original line text
    pub text: &'a str,
    /// Conversion result for the line
    pub report: &'a LineReport,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single converted line
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Boxed writer for the output destination
pub type OutputWriter = Box<dyn Write + Send + Sync>;

/// Open `path` for writing, or stdout when no path is given
pub fn open_writer(path: Option<&Path>) -> Result<OutputWriter> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
