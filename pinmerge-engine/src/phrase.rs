//! Dictionary-driven context-aware romanization
//!
//! Sentences are segmented with jieba. Words found in the phrase dictionary
//! take their dictionary readings; other Chinese characters take the
//! heteronym table's reading and then the `pinyin` crate's default, in
//! citation tones. Only Chinese characters produce tokens; everything else in
//! the sentence is dropped, so the output is not one-to-one with the input
//! characters.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use jieba_rs::Jieba;
use pinmerge_core::script::is_chinese;
use pinmerge_core::token::is_tone3_style;
use pinmerge_core::{ContextAwareRomanizer, Result as CoreResult};

use crate::error::{EngineError, Result};
use crate::romanizer::char_reading;

const BUILTIN_PHRASES: &str = include_str!("../resources/phrases.txt");
const BUILTIN_HETERONYMS: &str = include_str!("../resources/heteronyms.txt");

/// Frequency given to dictionary phrases so jieba keeps them whole
const PHRASE_FREQUENCY: usize = 100_000;

/// Word readings keyed by the word
pub type PhraseTable = HashMap<String, Vec<String>>;

/// Preferred readings of single characters
pub type HeteronymTable = HashMap<char, String>;

/// Sentence romanizer over a phrase dictionary and a heteronym table
pub struct PhraseRomanizer {
    jieba: Jieba,
    phrases: PhraseTable,
    heteronyms: HeteronymTable,
}

impl PhraseRomanizer {
    /// Build a romanizer from tables already in memory
    pub fn from_tables(phrases: PhraseTable, heteronyms: HeteronymTable) -> Self {
        let mut jieba = Jieba::new();
        for word in phrases.keys() {
            jieba.add_word(word, Some(PHRASE_FREQUENCY), None);
        }

        Self {
            jieba,
            phrases,
            heteronyms,
        }
    }

    /// Load both tables from disk. Any unreadable or malformed file is fatal.
    pub fn from_files(phrases: impl AsRef<Path>, heteronyms: Option<&Path>) -> Result<Self> {
        let phrases = load_phrases(phrases.as_ref())?;
        let heteronyms = match heteronyms {
            Some(path) => load_heteronyms(path)?,
            None => HeteronymTable::new(),
        };
        log::info!(
            "loaded {} phrases and {} heteronym readings",
            phrases.len(),
            heteronyms.len()
        );
        Ok(Self::from_tables(phrases, heteronyms))
    }

    /// Romanizer over the embedded tables of common heteronym words
    pub fn builtin() -> Result<Self> {
        let phrases = parse_phrases(BUILTIN_PHRASES, Path::new("<builtin phrases>"))?;
        let heteronyms = parse_heteronyms(BUILTIN_HETERONYMS, Path::new("<builtin heteronyms>"))?;
        Ok(Self::from_tables(phrases, heteronyms))
    }

    /// Number of dictionary phrases
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    fn char_reading(&self, ch: char) -> String {
        self.heteronyms
            .get(&ch)
            .cloned()
            .or_else(|| char_reading(ch))
            .unwrap_or_else(|| ch.to_string())
    }

    fn word_readings(&self, word: &str, out: &mut Vec<String>) {
        if let Some(readings) = self.phrases.get(word) {
            out.extend(readings.iter().cloned());
            return;
        }

        out.extend(
            word.chars()
                .filter(|&c| is_chinese(c))
                .map(|c| self.char_reading(c)),
        );
    }
}

impl ContextAwareRomanizer for PhraseRomanizer {
    fn romanize_sentence(&self, sentence: &str) -> CoreResult<Vec<String>> {
        let mut out = Vec::new();
        for word in self.jieba.cut(sentence, true) {
            self.word_readings(word, &mut out);
        }
        Ok(out)
    }
}

/// Split a table line at its first tab or colon
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['\t', ':'])?;
    Some((line[..at].trim(), line[at + 1..].trim()))
}

fn entries(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_syllables(value: &str, path: &Path, line_no: usize) -> Result<Vec<String>> {
    value
        .split_whitespace()
        .map(|syllable| {
            if is_tone3_style(syllable) {
                Ok(syllable.to_string())
            } else {
                Err(EngineError::resource(
                    path,
                    format!("line {line_no}: {syllable:?} is not a TONE3 syllable"),
                ))
            }
        })
        .collect()
}

/// Parse `word<TAB or :>syl syl ...` lines
pub fn parse_phrases(text: &str, path: &Path) -> Result<PhraseTable> {
    let mut table = PhraseTable::new();

    for (line_no, line) in entries(text) {
        let (word, value) = split_entry(line).ok_or_else(|| {
            EngineError::resource(path, format!("line {line_no}: missing separator"))
        })?;
        let syllables = parse_syllables(value, path, line_no)?;

        let chars = word.chars().count();
        if chars == 0 || syllables.len() != chars {
            return Err(EngineError::resource(
                path,
                format!(
                    "line {line_no}: {word:?} has {chars} characters but {} syllables",
                    syllables.len()
                ),
            ));
        }
        table.insert(word.to_string(), syllables);
    }

    Ok(table)
}

/// Parse `char<TAB or :>syl` lines
pub fn parse_heteronyms(text: &str, path: &Path) -> Result<HeteronymTable> {
    let mut table = HeteronymTable::new();

    for (line_no, line) in entries(text) {
        let (key, value) = split_entry(line).ok_or_else(|| {
            EngineError::resource(path, format!("line {line_no}: missing separator"))
        })?;

        let mut chars = key.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(EngineError::resource(
                    path,
                    format!("line {line_no}: {key:?} is not a single character"),
                ))
            }
        };

        let mut syllables = parse_syllables(value, path, line_no)?;
        if syllables.len() != 1 {
            return Err(EngineError::resource(
                path,
                format!("line {line_no}: expected one syllable for {ch}"),
            ));
        }
        table.insert(ch, syllables.remove(0));
    }

    Ok(table)
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| EngineError::resource(path, e.to_string()))
}

/// Load a phrase dictionary file
pub fn load_phrases(path: &Path) -> Result<PhraseTable> {
    parse_phrases(&read_table(path)?, path)
}

/// Load a heteronym table file
pub fn load_heteronyms(path: &Path) -> Result<HeteronymTable> {
    parse_heteronyms(&read_table(path)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> PhraseRomanizer {
        PhraseRomanizer::builtin().unwrap()
    }

    #[test]
    fn test_builtin_tables_parse() {
        assert!(builtin().phrase_count() > 20);
    }

    #[test]
    fn test_phrase_reading_wins() {
        let out = builtin().romanize_sentence("银行").unwrap();
        assert_eq!(out, vec!["yin2", "hang2"]);
    }

    #[test]
    fn test_heteronym_table() {
        let out = builtin().romanize_sentence("谁").unwrap();
        assert_eq!(out, vec!["shei2"]);
    }

    #[test]
    fn test_non_chinese_text_produces_no_tokens() {
        let romanizer = builtin();
        assert_eq!(
            romanizer.romanize_sentence("ab银行cd").unwrap(),
            vec!["yin2", "hang2"]
        );
        assert_eq!(
            romanizer.romanize_sentence("我用iPhone去银行, ok?").unwrap(),
            vec!["wo3", "yong4", "qu4", "yin2", "hang2"]
        );
        assert!(romanizer.romanize_sentence("go go go!").unwrap().is_empty());
    }

    #[test]
    fn test_sentence_readings_keep_citation_tones() {
        let romanizer = builtin();
        assert_eq!(romanizer.romanize_sentence("你好").unwrap(), vec!["ni3", "hao3"]);
        assert_eq!(romanizer.romanize_sentence("展览").unwrap(), vec!["zhan3", "lan3"]);
    }

    #[test]
    fn test_parse_accepts_tab_and_colon() {
        let table = parse_phrases("# comment\n银行\tyin2 hang2\n\n重新: chong2 xin1\n", Path::new("t")).unwrap();
        assert_eq!(table["银行"], vec!["yin2", "hang2"]);
        assert_eq!(table["重新"], vec!["chong2", "xin1"]);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let path = Path::new("t");
        assert!(parse_phrases("银行 yin2 hang2", path).is_err());
        assert!(parse_phrases("银行\tyin2", path).is_err());
        assert!(parse_phrases("银行\tyin2 hang", path).is_ok());
        assert!(parse_phrases("银行\tyin2 h@ng2", path).is_err());
        assert!(parse_heteronyms("谁谁\tshei2", path).is_err());
        assert!(parse_heteronyms("谁\tshei2 shui2", path).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = PhraseRomanizer::from_files("/nonexistent/phrases.txt", None);
        assert!(matches!(result, Err(EngineError::Resource { .. })));
    }

    #[test]
    fn test_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let phrases = dir.path().join("phrases.txt");
        let heteronyms = dir.path().join("heteronyms.txt");
        fs::write(&phrases, "行长\thang2 zhang3\n").unwrap();
        fs::write(&heteronyms, "谁:shui2\n").unwrap();

        let romanizer = PhraseRomanizer::from_files(&phrases, Some(&heteronyms)).unwrap();
        assert_eq!(romanizer.romanize_sentence("谁").unwrap(), vec!["shui2"]);
        assert_eq!(romanizer.romanize_sentence("行长").unwrap(), vec!["hang2", "zhang3"]);
    }
}
