//! jieba-based word segmentation

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use pinmerge_core::{Result as CoreResult, WordSegmenter};

use crate::error::{EngineError, Result};

/// Word segmenter backed by jieba with HMM discovery of unknown words
pub struct JiebaSegmenter {
    jieba: Jieba,
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl JiebaSegmenter {
    /// Create a segmenter with jieba's bundled dictionary
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }

    /// Add the entries of a user dictionary (`word [freq] [tag]` lines)
    pub fn with_user_dict(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EngineError::resource(path, e.to_string()))?;
        self.jieba
            .load_dict(&mut BufReader::new(file))
            .map_err(|e| EngineError::resource(path, e.to_string()))?;
        log::debug!("loaded user dictionary {}", path.display());
        Ok(self)
    }

    /// Access the underlying segmenter
    pub fn jieba(&self) -> &Jieba {
        &self.jieba
    }
}

impl WordSegmenter for JiebaSegmenter {
    fn segments<'a>(&self, text: &'a str) -> CoreResult<Vec<&'a str>> {
        Ok(self.jieba.cut(text, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_segments_reconstruct_input() {
        let segmenter = JiebaSegmenter::new();
        let text = "今天天气很好, let's go 去公园!";
        let segments = segmenter.segments(text).unwrap();
        assert_eq!(segments.concat(), text);
        assert!(segments.len() > 1);
    }

    #[test]
    fn test_user_dictionary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "拼音合并 1000 n").unwrap();

        let segmenter = JiebaSegmenter::new().with_user_dict(file.path()).unwrap();
        let segments = segmenter.segments("拼音合并").unwrap();
        assert_eq!(segments, vec!["拼音合并"]);
    }

    #[test]
    fn test_missing_user_dictionary() {
        let result = JiebaSegmenter::new().with_user_dict("/nonexistent/dict.txt");
        assert!(matches!(result, Err(EngineError::Resource { .. })));
    }
}
