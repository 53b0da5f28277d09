//! Dictionary-free segmenter based on script runs

use crate::error::Result;
use crate::script::RunClass;
use crate::traits::WordSegmenter;

/// Splits text into runs of ASCII words, runs of Chinese characters, and
/// single characters for everything else.
///
/// It has no lexicon, so a run of Chinese characters is one segment. This is
/// enough for the alignment engine, which only cares about each segment's
/// byte-width class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRunSegmenter;

impl ScriptRunSegmenter {
    /// Create a new segmenter
    pub fn new() -> Self {
        Self
    }

    /// Segment without the `Result` wrapper
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut current: Option<RunClass> = None;

        for (offset, ch) in text.char_indices() {
            let class = RunClass::from_char(ch);
            match current {
                Some(prev) if prev == class && class != RunClass::Single => {}
                Some(_) => {
                    segments.push(&text[start..offset]);
                    start = offset;
                    current = Some(class);
                }
                None => current = Some(class),
            }
        }

        if start < text.len() {
            segments.push(&text[start..]);
        }

        segments
    }
}

impl WordSegmenter for ScriptRunSegmenter {
    fn segments<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(self.split(text))
    }
}
