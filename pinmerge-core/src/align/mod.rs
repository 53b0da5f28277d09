//! Phonetic transcription alignment
//!
//! Each line is romanized twice: once as a whole sentence by a
//! context-aware romanizer and once segment by segment by a context-free
//! romanizer. The segment walk substitutes sentence-level readings for
//! Chinese characters positionally, so the walk's Chinese character count
//! must match the filtered sentence stream. Lines where it does not are
//! reconciled according to a [`ReconciliationPolicy`].

mod engine;
mod state;

pub use engine::Aligner;
pub use state::{AlignmentOutcome, AlignmentState, LineAlignment};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// How mismatched lines are resolved after a batch is aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationPolicy {
    /// Only mismatched lines fall back to their context-free sequence
    #[default]
    PerLine,
    /// The last line's check decides for the whole batch: on mismatch every
    /// line falls back to its context-free sequence
    Batch,
}

impl FromStr for ReconciliationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-line" | "per_line" | "line" => Ok(ReconciliationPolicy::PerLine),
            "batch" => Ok(ReconciliationPolicy::Batch),
            other => Err(CoreError::Config(format!(
                "unknown reconciliation policy: {other}"
            ))),
        }
    }
}

/// Final tokens of one line together with how they were chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledLine {
    /// Final token sequence
    pub tokens: Vec<String>,
    /// Chinese characters met during the walk
    pub consumed: usize,
    /// Filtered stream length
    pub expected: usize,
    /// Whether the line's own streams lined up
    pub aligned: bool,
    /// Whether the context-free sequence was returned
    pub fell_back: bool,
}

/// Choose the final sequence for every line of a batch
pub fn reconcile(lines: Vec<LineAlignment>, policy: ReconciliationPolicy) -> Vec<ReconciledLine> {
    let batch_fallback = match policy {
        ReconciliationPolicy::PerLine => false,
        ReconciliationPolicy::Batch => match lines.last() {
            Some(last) if !last.is_aligned() => {
                log::warn!(
                    "length different original: {} new: {}; returning context-free readings for the batch",
                    last.consumed,
                    last.expected
                );
                true
            }
            _ => false,
        },
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let aligned = line.is_aligned();
            let fell_back = match policy {
                ReconciliationPolicy::PerLine => !aligned,
                ReconciliationPolicy::Batch => batch_fallback,
            };

            if policy == ReconciliationPolicy::PerLine && !aligned {
                log::warn!(
                    "line {}: length different original: {} new: {}; using context-free readings",
                    index + 1,
                    line.consumed,
                    line.expected
                );
            }

            ReconciledLine {
                consumed: line.consumed,
                expected: line.expected,
                aligned,
                fell_back,
                tokens: if fell_back {
                    line.context_free
                } else {
                    line.merged
                },
            }
        })
        .collect()
}
