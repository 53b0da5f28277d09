//! Convert command implementation

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use pinmerge_core::ReconciliationPolicy;
use pinmerge_engine::{
    ExecutionMode, JiebaSegmenter, PhraseRomanizer, PinyinConverter, PinyinConverterBuilder,
};

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{open_writer, JsonFormatter, LineRecord, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "PINMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// How mismatched lines of a file are resolved (overrides the config)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Walk every segment character by character
    #[arg(long)]
    pub no_polyphone: bool,

    /// Phrase dictionary replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub phrases: Option<PathBuf>,

    /// Heteronym table used with --phrases
    #[arg(long, value_name = "FILE", requires = "phrases")]
    pub heteronyms: Option<PathBuf>,

    /// Extra jieba dictionary for word segmentation
    #[arg(long, value_name = "FILE")]
    pub user_dict: Option<PathBuf>,

    /// Token separator for text output (overrides the config)
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Force parallel processing even for small files
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Log every alignment step (implies -vv)
    #[arg(long)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line of separated tokens per input line
    Text,
    /// JSON array of lines with alignment status
    Json,
}

/// Reconciliation policy names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    /// Only mismatched lines fall back
    PerLine,
    /// A mismatch on a file's last line makes the whole file fall back
    Batch,
}

impl From<PolicyArg> for ReconciliationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PerLine => ReconciliationPolicy::PerLine,
            PolicyArg::Batch => ReconciliationPolicy::Batch,
        }
    }
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.log_verbosity(), self.quiet);

        log::info!("Starting conversion");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let files = resolve_patterns(&self.input)?;
        let converter = self.build_converter(&config)?;
        let polyphone = config.core.alignment.polyphone && !self.no_polyphone;

        let writer = open_writer(self.output.as_deref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => {
                let separator = self
                    .separator
                    .clone()
                    .unwrap_or_else(|| config.output.separator.clone());
                Box::new(TextFormatter::new(writer, separator))
            }
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
        };

        let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
        progress.init_files(files.len() as u64);

        let mut total_lines = 0;
        let mut fallback_lines = 0;
        for path in &files {
            log::debug!(
                "Reading {} ({} bytes)",
                path.display(),
                FileReader::file_size(path)?
            );
            let lines = FileReader::read_lines(path)?;
            let output = converter
                .convert(&lines, polyphone)
                .map_err(|e| CliError::ConversionError(e.to_string()))
                .with_context(|| format!("Failed to convert {}", path.display()))?;

            let source = path.display().to_string();
            for (i, (text, report)) in lines.iter().zip(&output.lines).enumerate() {
                formatter.format_line(&LineRecord {
                    source: &source,
                    line_number: i + 1,
                    text,
                    report,
                })?;
            }

            total_lines += output.metadata.lines_processed;
            fallback_lines += output.metadata.fallback_lines;
            progress.file_completed(&source, lines.len());
        }

        formatter.finish()?;
        progress.finish();

        log::info!(
            "Converted {} lines from {} files ({} fell back)",
            total_lines,
            files.len(),
            fallback_lines
        );
        Ok(())
    }

    /// `--debug` implies at least `-vv` so the step trace is visible
    fn log_verbosity(&self) -> u8 {
        if self.debug {
            self.verbose.max(2)
        } else {
            self.verbose
        }
    }

    fn build_converter(&self, config: &CliConfig) -> Result<PinyinConverter> {
        let mut builder: PinyinConverterBuilder = PinyinConverter::builder()
            .config(config.core.clone())
            .engine_config(config.engine_config())
            .debug(self.debug);

        if let Some(policy) = self.policy {
            builder = builder.policy(policy.into());
        }
        if self.parallel {
            builder = builder.execution_mode(ExecutionMode::Parallel);
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(Some(threads));
        }
        if let Some(phrases) = &self.phrases {
            let romanizer = PhraseRomanizer::from_files(phrases, self.heteronyms.as_deref())
                .with_context(|| format!("Failed to load phrases: {}", phrases.display()))?;
            builder = builder.context_aware(Arc::new(romanizer));
        }
        if let Some(dict) = &self.user_dict {
            let segmenter = JiebaSegmenter::new()
                .with_user_dict(dict)
                .with_context(|| format!("Failed to load user dictionary: {}", dict.display()))?;
            builder = builder.segmenter(Arc::new(segmenter));
        }

        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
