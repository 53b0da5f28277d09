//! JSON output formatter

use super::{LineRecord, OutputFormatter};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs converted lines as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    lines: Vec<LineData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct LineData {
    /// Input file
    pub source: String,
    /// 1-based line number
    pub line: usize,
    /// Original text
    pub text: String,
    /// Final token sequence
    pub tokens: Vec<String>,
    /// Whether the two streams lined up
    pub aligned: bool,
    /// Whether context-free readings were returned
    pub fell_back: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            lines: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()> {
        self.lines.push(LineData {
            source: record.source.to_string(),
            line: record.line_number,
            text: record.text.to_string(),
            tokens: record.report.tokens.clone(),
            aligned: record.report.aligned,
            fell_back: record.report.fell_back,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.lines)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.lines)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
