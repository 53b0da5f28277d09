//! Segment walk that merges the two romanizer streams

use crate::align::state::{AlignmentState, LineAlignment};
use crate::error::Result;
use crate::normalize::NormalizationRules;
use crate::script::{is_chinese, SegmentKind};
use crate::token::SentenceStream;
use crate::traits::{ContextAwareRomanizer, ContextFreeRomanizer, WordSegmenter};

/// Per-line aligner over borrowed collaborators
///
/// Holds no mutable state, so one aligner can serve many threads.
pub struct Aligner<'a> {
    segmenter: &'a dyn WordSegmenter,
    context_free: &'a dyn ContextFreeRomanizer,
    context_aware: &'a dyn ContextAwareRomanizer,
    rules: &'a NormalizationRules,
    debug: bool,
}

impl<'a> Aligner<'a> {
    /// Create an aligner
    pub fn new(
        segmenter: &'a dyn WordSegmenter,
        context_free: &'a dyn ContextFreeRomanizer,
        context_aware: &'a dyn ContextAwareRomanizer,
        rules: &'a NormalizationRules,
    ) -> Self {
        Self {
            segmenter,
            context_free,
            context_aware,
            rules,
            debug: false,
        }
    }

    /// Log every alignment step at debug level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the sentence-level pass for a normalized line
    pub fn sentence_stream(&self, normalized: &str) -> Result<SentenceStream> {
        let raw = self.context_aware.romanize_sentence(normalized)?;
        let stream = SentenceStream::from_raw(raw, &self.rules.corrections);
        if self.debug {
            log::debug!("filtered sentence: {:?}", stream.tokens());
        }
        Ok(stream)
    }

    /// Align one input line.
    ///
    /// `polyphone` enables the whole-segment path for pure East-Asian
    /// segments; without it those segments are walked character by
    /// character like mixed ones.
    pub fn align_line(&self, line: &str, polyphone: bool) -> Result<LineAlignment> {
        let normalized = self.rules.punctuation.apply(line);
        if self.debug {
            log::debug!("translated text: {normalized}");
        }

        let stream = self.sentence_stream(&normalized)?;
        let mut state = AlignmentState::new(stream);

        for segment in self.segmenter.segments(&normalized)? {
            match SegmentKind::classify(segment) {
                SegmentKind::Literal => self.walk_literal(segment, &mut state),
                SegmentKind::Pronounceable if polyphone => {
                    self.walk_pronounceable(segment, &mut state)?
                }
                _ => self.walk_mixed(segment, &mut state)?,
            }
        }

        let line = state.finish();
        if self.debug {
            log::debug!("original pinyin: {:?}", line.context_free);
            log::debug!("whole sentence pinyin: {:?}", line.merged);
        }
        Ok(line)
    }

    fn walk_literal(&self, segment: &str, state: &mut AlignmentState) {
        if state.needs_literal_boundary(segment.len()) {
            state.push_boundary();
        }
        for ch in segment.chars() {
            state.push_literal(ch);
        }
    }

    fn walk_pronounceable(&self, segment: &str, state: &mut AlignmentState) -> Result<()> {
        let mut readings = self.context_free.romanize(segment, true)?.into_iter();

        for ch in segment.chars() {
            let reading = readings.next().unwrap_or_else(|| ch.to_string());
            if is_chinese(ch) {
                state.push_boundary();
                self.push_chinese(ch, reading, state);
            } else {
                state.push_romanized(reading);
            }
        }
        Ok(())
    }

    fn walk_mixed(&self, segment: &str, state: &mut AlignmentState) -> Result<()> {
        let mut buf = [0u8; 4];

        for ch in segment.chars() {
            // Latin-1 and every other non-Chinese character pass through
            if !is_chinese(ch) {
                state.push_literal(ch);
                continue;
            }

            state.push_boundary();
            let reading = self
                .context_free
                .romanize(ch.encode_utf8(&mut buf), true)?
                .into_iter()
                .next()
                .unwrap_or_else(|| ch.to_string());
            self.push_chinese(ch, reading, state);
        }
        Ok(())
    }

    fn push_chinese(&self, ch: char, fallback: String, state: &mut AlignmentState) {
        let debug = self.debug;
        match state.push_chinese(fallback) {
            Some(token) if debug => log::debug!("adding {token} for {ch}"),
            None if debug => log::debug!("stream exhausted at {ch}, using context-free reading"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::ScriptRunSegmenter;
    use std::collections::HashMap;

    struct TableRomanizer(HashMap<char, &'static str>);

    impl TableRomanizer {
        fn new() -> Self {
            Self(
                [('你', "ni3"), ('好', "hao3"), ('客', "ke4"), ('行', "xing2")]
                    .into_iter()
                    .collect(),
            )
        }
    }

    impl ContextFreeRomanizer for TableRomanizer {
        fn romanize(&self, segment: &str, _sandhi: bool) -> Result<Vec<String>> {
            Ok(segment
                .chars()
                .map(|c| self.0.get(&c).map_or_else(|| c.to_string(), |s| s.to_string()))
                .collect())
        }
    }

    struct FixedSentence(Vec<&'static str>);

    impl ContextAwareRomanizer for FixedSentence {
        fn romanize_sentence(&self, _sentence: &str) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn align(line: &str, sentence: Vec<&'static str>, polyphone: bool) -> LineAlignment {
        let segmenter = ScriptRunSegmenter::new();
        let context_free = TableRomanizer::new();
        let context_aware = FixedSentence(sentence);
        let rules = NormalizationRules::default();
        Aligner::new(&segmenter, &context_free, &context_aware, &rules)
            .align_line(line, polyphone)
            .unwrap()
    }

    #[test]
    fn test_boundary_before_chinese_after_ascii() {
        let line = align("go客", vec!["ke4"], true);
        assert!(line.is_aligned());
        assert_eq!(line.merged, vec!["g", "o", " ", "ke4"]);
    }

    #[test]
    fn test_context_aware_token_wins() {
        let line = align("行", vec!["hang2"], true);
        assert_eq!(line.merged, vec![" ", "hang2"]);
        assert_eq!(line.context_free, vec![" ", "xing2"]);
    }

    #[test]
    fn test_pronounceable_non_chinese_uses_context_free() {
        let line = align("你好。", vec!["ni3", "hao3"], true);
        assert!(line.is_aligned());
        assert_eq!(line.merged, vec![" ", "ni3", " ", "hao3", "。"]);
    }

    #[test]
    fn test_literal_word_after_punctuation_gets_boundary() {
        let line = align("a,bc", vec![], true);
        assert_eq!(line.merged, vec!["a", ",", " ", "b", "c"]);
    }

    #[test]
    fn test_punctuation_is_normalized_first() {
        let line = align("a;b", vec![], true);
        assert_eq!(line.merged, vec!["a", ",", "b"]);
    }

    #[test]
    fn test_polyphone_disabled_walks_per_character() {
        let line = align("你好", vec!["ni2", "hao3"], false);
        assert!(line.is_aligned());
        assert_eq!(line.merged, vec![" ", "ni2", " ", "hao3"]);
    }

    #[test]
    fn test_mixed_segment_passes_other_characters() {
        let line = align("😀", vec![], true);
        assert_eq!(line.merged, vec!["😀"]);
        assert!(line.is_aligned());
    }
}
