//! Tokenizer vocabularies and index encoding
//!
//! A vocabulary file has one entry per line; an entry's index is its line
//! number. Index 0 doubles as the unknown index, so pinyin and character
//! vocabularies must put the single space there.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ndarray::Array2;
use thiserror::Error;

/// Index used for entries missing from the vocabulary
pub const UNKNOWN_INDEX: usize = 0;

/// Vocabulary size of the byte tokenizer
pub const BYTE_VOCAB_SIZE: usize = 256;

/// Default padding value for encoded batches
pub const DEFAULT_PADDING: i64 = -1;

/// Vocabulary loading errors
#[derive(Debug, Error)]
pub enum VocabError {
    /// The vocabulary file could not be read
    #[error("failed to read vocabulary {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The space entry is missing or not at index 0
    #[error("space must be at index 0 in the vocabulary (found {found:?}), index 0 is used for unknown entries")]
    SpaceNotZero {
        /// Where the space was found, if anywhere
        found: Option<usize>,
    },

    /// Unknown tokenizer name
    #[error("unknown tokenizer kind: {0}")]
    UnknownKind(String),
}

/// Tokenizer flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Pinyin tokens for Chinese, characters for everything else
    Pinyin,
    /// One token per character
    Char,
    /// UTF-8 bytes, no vocabulary file
    Byte,
    /// Caller-supplied vocabulary path
    Custom,
}

impl FromStr for TokenizerKind {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pinyin" => Ok(TokenizerKind::Pinyin),
            "char" => Ok(TokenizerKind::Char),
            "byte" => Ok(TokenizerKind::Byte),
            "custom" => Ok(TokenizerKind::Custom),
            other => Err(VocabError::UnknownKind(other.to_string())),
        }
    }
}

impl TokenizerKind {
    /// Name used in dataset directory names
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerKind::Pinyin => "pinyin",
            TokenizerKind::Char => "char",
            TokenizerKind::Byte => "byte",
            TokenizerKind::Custom => "custom",
        }
    }
}

/// Entry-to-index map loaded from a vocabulary file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocab {
    map: HashMap<String, usize>,
}

impl Vocab {
    /// Parse vocabulary text. Only the line terminator is stripped, so an
    /// entry may itself be whitespace.
    pub fn parse(contents: &str) -> Self {
        let map = contents
            .split_inclusive('\n')
            .enumerate()
            .map(|(index, line)| {
                let entry = match line.strip_suffix('\n') {
                    Some(entry) => entry.strip_suffix('\r').unwrap_or(entry),
                    None => line,
                };
                (entry.to_string(), index)
            })
            .collect();

        Self { map }
    }

    /// Load a vocabulary file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| VocabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Index of an entry, if present
    pub fn get(&self, entry: &str) -> Option<usize> {
        self.map.get(entry).copied()
    }

    /// Index of an entry, or [`UNKNOWN_INDEX`]
    pub fn index(&self, entry: &str) -> usize {
        self.get(entry).unwrap_or(UNKNOWN_INDEX)
    }

    /// Map a token sequence to indices
    pub fn indices<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<i64> {
        tokens
            .iter()
            .map(|token| self.index(token.as_ref()) as i64)
            .collect()
    }

    /// Check that the space entry sits at the unknown index
    pub fn ensure_space_is_zero(&self) -> Result<(), VocabError> {
        match self.get(" ") {
            Some(UNKNOWN_INDEX) => Ok(()),
            found => Err(VocabError::SpaceNotZero { found }),
        }
    }
}

/// A loaded tokenizer: its vocabulary (none for bytes) and size
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Vocabulary, absent for the byte tokenizer
    pub vocab: Option<Vocab>,
    /// Number of distinct token ids
    pub vocab_size: usize,
}

/// Load a tokenizer.
///
/// For [`TokenizerKind::Pinyin`] and [`TokenizerKind::Char`] the vocabulary
/// is read from `<data_root>/<dataset>_<kind>/vocab.txt`; for
/// [`TokenizerKind::Custom`] `dataset` is the vocabulary path itself.
pub fn load_tokenizer(
    data_root: &Path,
    dataset: &str,
    kind: TokenizerKind,
) -> Result<Tokenizer, VocabError> {
    match kind {
        TokenizerKind::Pinyin | TokenizerKind::Char => {
            let path = data_root
                .join(format!("{dataset}_{}", kind.as_str()))
                .join("vocab.txt");
            let vocab = Vocab::from_file(&path)?;
            vocab.ensure_space_is_zero()?;
            log::debug!("loaded {} entries from {}", vocab.len(), path.display());
            Ok(Tokenizer {
                vocab_size: vocab.len(),
                vocab: Some(vocab),
            })
        }
        TokenizerKind::Byte => Ok(Tokenizer {
            vocab: None,
            vocab_size: BYTE_VOCAB_SIZE,
        }),
        TokenizerKind::Custom => {
            let vocab = Vocab::from_file(dataset)?;
            Ok(Tokenizer {
                vocab_size: vocab.len(),
                vocab: Some(vocab),
            })
        }
    }
}

/// Right-pad rows of ids into a `[batch, max_len]` matrix
fn pad_rows(rows: Vec<Vec<i64>>, padding: i64) -> Array2<i64> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = Array2::from_elem((rows.len(), width), padding);
    for (b, row) in rows.into_iter().enumerate() {
        for (i, id) in row.into_iter().enumerate() {
            out[[b, i]] = id;
        }
    }
    out
}

/// Encode token sequences as vocabulary indices, right-padded
pub fn encode_indices<S: AsRef<str>>(batch: &[Vec<S>], vocab: &Vocab, padding: i64) -> Array2<i64> {
    pad_rows(batch.iter().map(|tokens| vocab.indices(tokens)).collect(), padding)
}

/// Encode texts as UTF-8 bytes, right-padded
pub fn encode_bytes<S: AsRef<str>>(texts: &[S], padding: i64) -> Array2<i64> {
    pad_rows(
        texts
            .iter()
            .map(|t| t.as_ref().bytes().map(i64::from).collect())
            .collect(),
        padding,
    )
}
