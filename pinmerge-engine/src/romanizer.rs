//! Context-free romanization backed by the `pinyin` crate

use pinmerge_core::sandhi::apply_tone_sandhi;
use pinmerge_core::{ContextFreeRomanizer, Result as CoreResult};
use pinyin::ToPinyin;

/// Default reading of a character in TONE3 style with `ü` written as `v`.
///
/// Neutral-tone readings carry no digit.
pub fn char_reading(ch: char) -> Option<String> {
    ch.to_pinyin()
        .map(|pinyin| pinyin.with_tone_num_end().replace('ü', "v"))
}

/// Per-character romanizer using each character's most common reading
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinRomanizer;

impl PinyinRomanizer {
    /// Create a romanizer
    pub fn new() -> Self {
        Self
    }

    /// Readings for `chars`, one per character
    pub fn readings(&self, chars: &[char], sandhi: bool) -> Vec<String> {
        let mut out: Vec<String> = chars
            .iter()
            .map(|&ch| char_reading(ch).unwrap_or_else(|| ch.to_string()))
            .collect();

        if sandhi {
            apply_tone_sandhi(chars, &mut out);
        }
        out
    }
}

impl ContextFreeRomanizer for PinyinRomanizer {
    fn romanize(&self, segment: &str, sandhi: bool) -> CoreResult<Vec<String>> {
        let chars: Vec<char> = segment.chars().collect();
        Ok(self.readings(&chars, sandhi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_token_per_character() {
        let romanizer = PinyinRomanizer::new();
        let out = romanizer.romanize("你好。", false).unwrap();
        assert_eq!(out, vec!["ni3", "hao3", "。"]);
    }

    #[test]
    fn test_u_umlaut_is_v() {
        assert_eq!(char_reading('女').as_deref(), Some("nv3"));
        assert_eq!(char_reading('绿').as_deref(), Some("lv4"));
    }

    #[test]
    fn test_sandhi_on_request() {
        let romanizer = PinyinRomanizer::new();
        assert_eq!(romanizer.romanize("你好", true).unwrap(), vec!["ni2", "hao3"]);
        assert_eq!(romanizer.romanize("不是", true).unwrap(), vec!["bu2", "shi4"]);
        assert_eq!(romanizer.romanize("你好", false).unwrap(), vec!["ni3", "hao3"]);
    }

    #[test]
    fn test_characters_without_reading_pass_through() {
        let romanizer = PinyinRomanizer::new();
        assert_eq!(romanizer.romanize("a😀", true).unwrap(), vec!["a", "😀"]);
    }
}
