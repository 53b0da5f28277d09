//! Alignment state threaded through the segment walk

use crate::token::SentenceStream;

/// Entries after which a literal word does not get a boundary space
const BOUNDARY_EXEMPT: [&str; 4] = [" ", ":", "'", "\""];

/// Result of comparing the cursor with the sentence-level stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentOutcome {
    /// Every Chinese character consumed exactly one stream token
    Aligned,
    /// The character count and the stream length disagree
    Mismatch {
        /// Chinese characters met during the walk
        consumed: usize,
        /// Tokens in the filtered stream
        expected: usize,
    },
}

impl AlignmentOutcome {
    /// Whether the two streams lined up
    pub fn is_aligned(&self) -> bool {
        matches!(self, AlignmentOutcome::Aligned)
    }
}

/// Mutable state of one line's alignment.
///
/// Holds the filtered context-aware stream, the cursor into it, and the two
/// outputs built side by side: the merged sequence and the context-free-only
/// sequence used as fallback. Both outputs always contain the same boundary
/// entries in the same positions.
#[derive(Debug, Clone)]
pub struct AlignmentState {
    stream: SentenceStream,
    consumed: usize,
    merged: Vec<String>,
    context_free: Vec<String>,
}

impl AlignmentState {
    /// Start aligning against a filtered sentence stream
    pub fn new(stream: SentenceStream) -> Self {
        Self {
            stream,
            consumed: 0,
            merged: Vec::new(),
            context_free: Vec::new(),
        }
    }

    /// Whether a literal segment of `segment_bytes` bytes needs a boundary
    /// space before it
    pub fn needs_literal_boundary(&self, segment_bytes: usize) -> bool {
        match self.context_free.last() {
            Some(last) => segment_bytes > 1 && !BOUNDARY_EXEMPT.contains(&last.as_str()),
            None => false,
        }
    }

    /// Push a single-space boundary entry
    pub fn push_boundary(&mut self) {
        self.merged.push(" ".to_string());
        self.context_free.push(" ".to_string());
    }

    /// Push a character that passes through unchanged
    pub fn push_literal(&mut self, ch: char) {
        self.merged.push(ch.to_string());
        self.context_free.push(ch.to_string());
    }

    /// Push a context-free token for a character outside the Chinese range.
    /// The stream is not consulted.
    pub fn push_romanized(&mut self, token: String) {
        self.merged.push(token.clone());
        self.context_free.push(token);
    }

    /// Push the reading of a Chinese character.
    ///
    /// Consumes the next sentence-level token when one remains and falls back
    /// to `fallback` otherwise. The cursor advances either way. Returns the
    /// stream token that was used, if any.
    pub fn push_chinese(&mut self, fallback: String) -> Option<&str> {
        let index = self.consumed;
        self.consumed += 1;

        match self.stream.get(index) {
            Some(token) => {
                self.merged.push(token.to_string());
                self.context_free.push(fallback);
                Some(token)
            }
            None => {
                self.merged.push(fallback.clone());
                self.context_free.push(fallback);
                None
            }
        }
    }

    /// Chinese characters met so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Length of the filtered stream
    pub fn expected(&self) -> usize {
        self.stream.len()
    }

    /// Stream tokens not yet consumed
    pub fn remaining(&self) -> &[String] {
        let start = self.consumed.min(self.stream.len());
        &self.stream.tokens()[start..]
    }

    /// Whether the cursor has run past the end of the stream
    pub fn overrun(&self) -> bool {
        self.consumed > self.stream.len()
    }

    /// Compare the cursor with the stream length
    pub fn check(&self) -> AlignmentOutcome {
        if self.consumed == self.stream.len() {
            AlignmentOutcome::Aligned
        } else {
            AlignmentOutcome::Mismatch {
                consumed: self.consumed,
                expected: self.stream.len(),
            }
        }
    }

    /// Merged output built so far
    pub fn merged(&self) -> &[String] {
        &self.merged
    }

    /// Context-free output built so far
    pub fn context_free(&self) -> &[String] {
        &self.context_free
    }

    /// Finish the walk
    pub fn finish(self) -> LineAlignment {
        let outcome = self.check();
        LineAlignment {
            merged: self.merged,
            context_free: self.context_free,
            consumed: self.consumed,
            expected: self.stream.len(),
            outcome,
        }
    }
}

/// Completed alignment of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAlignment {
    /// Sequence with sentence-level readings substituted in
    pub merged: Vec<String>,
    /// Sequence built from context-free readings only
    pub context_free: Vec<String>,
    /// Chinese characters met during the walk
    pub consumed: usize,
    /// Filtered stream length
    pub expected: usize,
    /// Cursor check result
    pub outcome: AlignmentOutcome,
}

impl LineAlignment {
    /// Whether the streams lined up
    pub fn is_aligned(&self) -> bool {
        self.outcome.is_aligned()
    }

    /// Merged sequence when aligned, context-free sequence otherwise
    pub fn into_tokens(self) -> Vec<String> {
        if self.is_aligned() {
            self.merged
        } else {
            self.context_free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(tokens: &[&str]) -> SentenceStream {
        SentenceStream::from_tokens(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_literal_boundary_rule() {
        let mut state = AlignmentState::new(stream(&[]));
        assert!(!state.needs_literal_boundary(5));

        state.push_literal('a');
        assert!(state.needs_literal_boundary(2));
        assert!(!state.needs_literal_boundary(1));

        state.push_literal(':');
        assert!(!state.needs_literal_boundary(3));

        state.push_literal('"');
        assert!(!state.needs_literal_boundary(3));
    }

    #[test]
    fn test_push_chinese_consumes_stream() {
        let mut state = AlignmentState::new(stream(&["hang2"]));
        assert_eq!(state.push_chinese("xing2".to_string()), Some("hang2"));
        assert_eq!(state.consumed(), 1);
        assert!(state.remaining().is_empty());
        assert_eq!(state.check(), AlignmentOutcome::Aligned);

        assert_eq!(state.merged(), &["hang2"]);
        assert_eq!(state.context_free(), &["xing2"]);
    }

    #[test]
    fn test_push_chinese_falls_back_when_exhausted() {
        let mut state = AlignmentState::new(stream(&[]));
        assert_eq!(state.push_chinese("ke4".to_string()), None);
        assert!(state.overrun());
        assert_eq!(
            state.check(),
            AlignmentOutcome::Mismatch {
                consumed: 1,
                expected: 0
            }
        );

        let line = state.finish();
        assert!(!line.is_aligned());
        assert_eq!(line.merged, vec!["ke4"]);
        assert_eq!(line.into_tokens(), vec!["ke4"]);
    }

    #[test]
    fn test_unconsumed_tokens_are_a_mismatch() {
        let mut state = AlignmentState::new(stream(&["go", "ke4"]));
        state.push_chinese("ke4".to_string());
        assert_eq!(state.remaining(), &["ke4"]);
        assert!(!state.check().is_aligned());
    }

    #[test]
    fn test_into_tokens_prefers_merged_when_aligned() {
        let mut state = AlignmentState::new(stream(&["shui2"]));
        state.push_boundary();
        state.push_chinese("shei2".to_string());
        let line = state.finish();
        assert_eq!(line.context_free, vec![" ", "shei2"]);
        assert_eq!(line.into_tokens(), vec![" ", "shui2"]);
    }
}
