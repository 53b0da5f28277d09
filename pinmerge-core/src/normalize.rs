//! Punctuation normalization and reading corrections
//!
//! Both tables are small and fixed per configuration. The punctuation map
//! runs over every input line before segmentation; the correction table
//! rewrites sentence-level readings that synthesize poorly.

use std::collections::HashMap;

/// Character-to-text replacement table applied to input lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationMap {
    table: HashMap<char, String>,
}

impl Default for PunctuationMap {
    fn default() -> Self {
        let table = [
            (';', ","),
            ('\u{201C}', "\""),
            ('\u{201D}', "\""),
            ('\u{2018}', "'"),
            ('\u{2019}', "'"),
        ]
        .into_iter()
        .map(|(from, to)| (from, to.to_string()))
        .collect();

        Self { table }
    }
}

impl PunctuationMap {
    /// Create a map from explicit entries
    pub fn new(table: HashMap<char, String>) -> Self {
        Self { table }
    }

    /// Apply the map to a line
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match self.table.get(&ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Replacement table for sentence-level readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingCorrections {
    table: HashMap<String, String>,
}

impl Default for ReadingCorrections {
    fn default() -> Self {
        let mut table = HashMap::new();
        table.insert("shei2".to_string(), "shui2".to_string());
        Self { table }
    }
}

impl ReadingCorrections {
    /// Create a table from explicit entries
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Return the designated substitute for a reading, or the reading itself
    pub fn correct(&self, token: String) -> String {
        match self.table.get(&token) {
            Some(substitute) => substitute.clone(),
            None => token,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Everything applied to a line before and around the romanizer calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationRules {
    /// Input punctuation map
    pub punctuation: PunctuationMap,
    /// Sentence-level reading corrections
    pub corrections: ReadingCorrections,
}
