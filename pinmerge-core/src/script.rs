//! Character and segment classification
//!
//! Segments are classified by comparing their UTF-8 byte length with their
//! character count. ASCII text has one byte per character and text from the
//! CJK blocks of the Basic Multilingual Plane has three. Anything else is
//! treated as mixed and handled character by character.

use std::ops::RangeInclusive;

/// Code points treated as Chinese characters during alignment.
///
/// Covers Bopomofo through the end of the CJK Unified Ideographs block.
pub const CHINESE_RANGE: RangeInclusive<char> = '\u{3100}'..='\u{9fff}';

/// Whether a character takes part in the context-aware token stream
#[inline]
pub fn is_chinese(ch: char) -> bool {
    CHINESE_RANGE.contains(&ch)
}

/// Byte-width class of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// One byte per character: letters, digits, ASCII symbols, whitespace
    Literal,
    /// Three bytes per character: an East-Asian run
    Pronounceable,
    /// Neither width holds for every character
    Mixed,
}

impl SegmentKind {
    /// Classify a segment by its byte/character ratio
    pub fn classify(segment: &str) -> Self {
        let bytes = segment.len();
        let chars = segment.chars().count();

        if bytes == chars {
            SegmentKind::Literal
        } else if bytes == 3 * chars {
            SegmentKind::Pronounceable
        } else {
            SegmentKind::Mixed
        }
    }
}

/// Character class used by [`crate::segmenter::ScriptRunSegmenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunClass {
    /// ASCII letters and digits, grouped into words
    Word,
    /// Chinese characters, grouped into runs
    Han,
    /// Everything else, emitted one character at a time
    Single,
}

impl RunClass {
    /// Classify a single character
    pub fn from_char(ch: char) -> Self {
        if ch.is_ascii_alphanumeric() {
            RunClass::Word
        } else if is_chinese(ch) {
            RunClass::Han
        } else {
            RunClass::Single
        }
    }
}
