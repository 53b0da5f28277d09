//! Vocab command implementation

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pinmerge_core::vocab::{encode_bytes, encode_indices, Tokenizer, DEFAULT_PADDING};
use pinmerge_core::{load_tokenizer, TokenizerKind};
use pinmerge_engine::PinyinConverter;
use serde::Serialize;

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::open_writer;

/// Arguments for the vocab command
#[derive(Debug, Args)]
pub struct VocabArgs {
    /// Dataset name, or the vocabulary path for the custom tokenizer
    #[arg(short, long, required = true)]
    pub dataset: String,

    /// Directory holding `<dataset>_<tokenizer>/vocab.txt`
    #[arg(long, value_name = "DIR", default_value = "data")]
    pub data_root: PathBuf,

    /// Tokenizer flavour
    #[arg(short, long, value_enum, default_value = "pinyin")]
    pub tokenizer: TokenizerArg,

    /// Files whose lines should be encoded (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Value used to right-pad shorter rows
    #[arg(long, default_value_t = DEFAULT_PADDING, allow_negative_numbers = true)]
    pub padding: i64,

    /// Emit JSON instead of whitespace-separated ids
    #[arg(long)]
    pub json: bool,

    /// Configuration file used for pinyin conversion
    #[arg(short, long, value_name = "FILE", env = "PINMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Tokenizer names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TokenizerArg {
    /// Pinyin tokens for Chinese, characters for everything else
    Pinyin,
    /// One token per character
    Char,
    /// UTF-8 bytes
    Byte,
    /// Vocabulary at the path given as the dataset
    Custom,
}

impl From<TokenizerArg> for TokenizerKind {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Pinyin => TokenizerKind::Pinyin,
            TokenizerArg::Char => TokenizerKind::Char,
            TokenizerArg::Byte => TokenizerKind::Byte,
            TokenizerArg::Custom => TokenizerKind::Custom,
        }
    }
}

/// Encoded lines of one input file
#[derive(Debug, Serialize)]
struct EncodedFile {
    source: String,
    shape: [usize; 2],
    ids: Vec<Vec<i64>>,
}

impl VocabArgs {
    /// Execute the vocab command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let kind = TokenizerKind::from(self.tokenizer);
        let tokenizer = load_tokenizer(&self.data_root, &self.dataset, kind)
            .map_err(|e| CliError::ConfigError(e.to_string()))
            .with_context(|| format!("Failed to load {} tokenizer", kind.as_str()))?;

        let mut writer = open_writer(self.output.as_deref())?;

        if self.input.is_empty() {
            writeln!(writer, "tokenizer: {}", kind.as_str())?;
            writeln!(writer, "vocab_size: {}", tokenizer.vocab_size)?;
            writer.flush()?;
            return Ok(());
        }

        let encoder = Encoder::new(kind, &tokenizer, self.config.as_deref())?;
        let mut encoded = Vec::new();
        for path in resolve_patterns(&self.input)? {
            let lines = FileReader::read_lines(&path)?;
            encoded.push(EncodedFile {
                source: path.display().to_string(),
                ..encoder.encode(&lines, self.padding)?
            });
        }

        if self.json {
            serde_json::to_writer_pretty(&mut writer, &encoded)?;
            writeln!(writer)?;
        } else {
            for row in encoded.iter().flat_map(|file| &file.ids) {
                let ids: Vec<String> = row.iter().map(i64::to_string).collect();
                writeln!(writer, "{}", ids.join(" "))?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Turns lines into padded id rows for one tokenizer
struct Encoder<'a> {
    kind: TokenizerKind,
    tokenizer: &'a Tokenizer,
    converter: Option<(PinyinConverter, bool)>,
}

impl<'a> Encoder<'a> {
    fn new(kind: TokenizerKind, tokenizer: &'a Tokenizer, config: Option<&Path>) -> Result<Self> {
        let converter = match kind {
            TokenizerKind::Pinyin => {
                let config = CliConfig::load(config)?;
                let converter = PinyinConverter::builder()
                    .config(config.core.clone())
                    .engine_config(config.engine_config())
                    .build()
                    .map_err(|e| CliError::ConfigError(e.to_string()))?;
                Some((converter, config.core.alignment.polyphone))
            }
            _ => None,
        };

        Ok(Self {
            kind,
            tokenizer,
            converter,
        })
    }

    fn encode(&self, lines: &[String], padding: i64) -> Result<EncodedFile> {
        let matrix = match (&self.tokenizer.vocab, &self.converter) {
            (_, _) if self.kind == TokenizerKind::Byte => encode_bytes(lines, padding),
            (Some(vocab), Some((converter, polyphone))) => {
                let tokens = converter
                    .convert_tokens(lines, *polyphone)
                    .map_err(|e| CliError::ConversionError(e.to_string()))?;
                encode_indices(&tokens, vocab, padding)
            }
            (Some(vocab), None) => {
                let chars: Vec<Vec<String>> = lines
                    .iter()
                    .map(|line| line.chars().map(String::from).collect())
                    .collect();
                encode_indices(&chars, vocab, padding)
            }
            (None, _) => encode_bytes(lines, padding),
        };

        Ok(EncodedFile {
            source: String::new(),
            shape: [matrix.nrows(), matrix.ncols()],
            ids: matrix.outer_iter().map(|row| row.to_vec()).collect(),
        })
    }
}
