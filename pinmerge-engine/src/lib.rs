//! Romanizer adapters and batch orchestration for pinmerge
//!
//! This crate wires concrete collaborators into the alignment engine of
//! `pinmerge-core`:
//!
//! - [`JiebaSegmenter`]: word segmentation with jieba
//! - [`PinyinRomanizer`]: per-character readings from the `pinyin` crate,
//!   with optional tone sandhi
//! - [`PhraseRomanizer`]: sentence-level readings from a phrase dictionary
//!   and a heteronym table
//!
//! [`PinyinConverter`] is the batch entry point. It runs lines sequentially
//! or on a rayon pool and reconciles mismatched lines by policy.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinmerge_engine::PinyinConverter;
//!
//! let converter = PinyinConverter::new()?;
//! let output = converter.convert(&["我们去银行, ok?"], true)?;
//! for line in &output.lines {
//!     println!("{:?}", line.tokens);
//! }
//! # Ok::<(), pinmerge_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod converter;
pub mod error;
pub mod executor;
pub mod phrase;
pub mod romanizer;
pub mod segmenter;

// Re-export key types
pub use config::EngineConfig;
pub use converter::{
    BatchOutput, ConversionMetadata, LineReport, PinyinConverter, PinyinConverterBuilder,
};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use phrase::PhraseRomanizer;
pub use romanizer::PinyinRomanizer;
pub use segmenter::JiebaSegmenter;

// Re-export from core for convenience
pub use pinmerge_core::{PinmergeConfig, ReconciliationPolicy};
