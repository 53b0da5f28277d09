//! Collaborator interfaces used by the alignment engine
//!
//! The engine never segments or romanizes text itself. It drives these
//! three collaborators and reconciles what they return. Implementations
//! must be shareable across threads so independent lines can be aligned
//! in parallel.

use crate::error::Result;

/// Splits a line into contiguous segments
pub trait WordSegmenter: Send + Sync {
    /// Segment a line. Concatenating the returned slices must reproduce
    /// `text` exactly.
    fn segments<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;
}

/// Romanizes a short segment using only local context
pub trait ContextFreeRomanizer: Send + Sync {
    /// Return exactly one token per character of `segment`.
    ///
    /// Characters without a reading are returned unchanged. When `sandhi`
    /// is set, tone sandhi is applied across the segment.
    fn romanize(&self, segment: &str, sandhi: bool) -> Result<Vec<String>>;
}

/// Romanizes a whole sentence using sentence-level context
pub trait ContextAwareRomanizer: Send + Sync {
    /// Return TONE3 tokens covering the sentence.
    ///
    /// The output is not one-to-one with characters: runs of text without a
    /// reading may come back as single raw tokens.
    fn romanize_sentence(&self, sentence: &str) -> Result<Vec<String>>;
}
