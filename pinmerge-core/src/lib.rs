//! Alignment of context-free and context-aware pinyin streams
//!
//! Speech synthesis front ends need one pronunciation token per source
//! character, but the two kinds of romanizer disagree on what they return.
//! A context-free romanizer answers per segment and is always one-to-one; a
//! context-aware romanizer reads the whole sentence and disambiguates
//! heteronyms, but drops or merges everything that is not Chinese. This
//! crate walks the segments of a line and substitutes the sentence-level
//! reading for every Chinese character, keeping the context-free reading
//! wherever the sentence stream cannot be trusted.
//!
//! # Architecture
//!
//! - **Collaborators** ([`traits`]): word segmentation and the two
//!   romanizers are interfaces; adapters live in `pinmerge-engine`
//! - **Alignment** ([`align`]): the segment walk, its explicit state and
//!   batch reconciliation
//! - **Utilities**: repetition filtering, tone sandhi, vocabularies, masks,
//!   timestep schedules and seeding
//!
//! # Example
//!
//! ```rust
//! use pinmerge_core::align::Aligner;
//! use pinmerge_core::normalize::NormalizationRules;
//! use pinmerge_core::segmenter::ScriptRunSegmenter;
//! use pinmerge_core::traits::{ContextAwareRomanizer, ContextFreeRomanizer};
//! use pinmerge_core::Result;
//!
//! struct Fixed;
//!
//! impl ContextFreeRomanizer for Fixed {
//!     fn romanize(&self, segment: &str, _sandhi: bool) -> Result<Vec<String>> {
//!         Ok(segment.chars().map(|_| "ke4".to_string()).collect())
//!     }
//! }
//!
//! impl ContextAwareRomanizer for Fixed {
//!     fn romanize_sentence(&self, _sentence: &str) -> Result<Vec<String>> {
//!         Ok(vec!["go".to_string(), "ke4".to_string()])
//!     }
//! }
//!
//! let segmenter = ScriptRunSegmenter::new();
//! let rules = NormalizationRules::default();
//! let aligner = Aligner::new(&segmenter, &Fixed, &Fixed, &rules);
//!
//! // "go" survives the shape filter, so the sentence stream is one token
//! // too long and the line is reported as a mismatch
//! let line = aligner.align_line("go客", true).unwrap();
//! assert!(!line.is_aligned());
//! assert_eq!(line.context_free, vec!["g", "o", " ", "ke4"]);
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod normalize;
pub mod repetition;
pub mod sandhi;
pub mod schedule;
pub mod script;
pub mod seed;
pub mod segmenter;
pub mod tensor;
pub mod token;
pub mod traits;
pub mod vocab;

pub use align::{
    reconcile, AlignmentOutcome, AlignmentState, Aligner, LineAlignment, ReconciledLine,
    ReconciliationPolicy,
};
pub use config::{default_config, PinmergeConfig};
pub use error::{CoreError, Result};
pub use normalize::{NormalizationRules, PunctuationMap, ReadingCorrections};
pub use repetition::{repetition_found, RepetitionFilter};
pub use schedule::epss_timesteps;
pub use script::{is_chinese, SegmentKind};
pub use seed::seeded_rng;
pub use segmenter::ScriptRunSegmenter;
pub use token::SentenceStream;
pub use traits::{ContextAwareRomanizer, ContextFreeRomanizer, WordSegmenter};
pub use vocab::{load_tokenizer, TokenizerKind, Vocab, VocabError};
