//! Plain text output formatter

use super::{LineRecord, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one token sequence per line
pub struct TextFormatter<W: Write> {
    writer: W,
    separator: String,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter joining tokens with `separator`
    pub fn new(writer: W, separator: impl Into<String>) -> Self {
        Self {
            writer,
            separator: separator.into(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()> {
        writeln!(
            self.writer,
            "{}",
            record.report.tokens.join(&self.separator)
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmerge_engine::LineReport;

    fn report(tokens: &[&str]) -> LineReport {
        LineReport {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            consumed: 1,
            expected: 1,
            aligned: true,
            fell_back: false,
        }
    }

    #[test]
    fn test_joins_tokens_with_separator() {
        let mut out = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut out, "|");
            let report = report(&["o", "k", " ", "hang2"]);
            formatter
                .format_line(&LineRecord {
                    source: "a.txt",
                    line_number: 1,
                    text: "ok行",
                    report: &report,
                })
                .unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "o|k| |hang2\n");
    }
}
