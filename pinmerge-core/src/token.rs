//! Romanized token helpers and the filtered sentence-level stream

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::ReadingCorrections;

/// One or more letters followed by an optional tone digit
static TONE3_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+[1-5]?$").expect("Failed to compile TONE3_PATTERN"));

/// Whether a string has the shape of a tone-numbered romanization (`hua4`)
pub fn is_tone3_style(text: &str) -> bool {
    TONE3_PATTERN.is_match(text)
}

/// Tone digit of a TONE3 syllable, if it carries one
pub fn tone_of(syllable: &str) -> Option<u8> {
    match syllable.as_bytes().last() {
        Some(&b) if (b'1'..=b'5').contains(&b) => Some(b - b'0'),
        _ => None,
    }
}

/// Replace (or add) the tone digit of a TONE3 syllable
pub fn set_tone(syllable: &mut String, tone: u8) {
    if tone_of(syllable).is_some() {
        syllable.pop();
    }
    syllable.push(char::from(b'0' + tone));
}

/// Sentence-level tokens that survived shape filtering and correction
///
/// Its length is the number of Chinese characters the segment walk is
/// expected to meet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceStream {
    tokens: Vec<String>,
}

impl SentenceStream {
    /// Filter raw context-aware output down to TONE3 tokens and apply the
    /// correction table
    pub fn from_raw<I>(raw: I, corrections: &ReadingCorrections) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let tokens = raw
            .into_iter()
            .filter(|token| is_tone3_style(token))
            .map(|token| corrections.correct(token))
            .collect();

        Self { tokens }
    }

    /// Build a stream from tokens that are already filtered
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Number of tokens available for alignment
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at a cursor position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// All tokens in order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
