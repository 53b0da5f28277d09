//! Execution strategies for batch alignment

use pinmerge_core::{Aligner, LineAlignment};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One line after another on the calling thread
    Sequential,
    /// Lines spread over a rayon thread pool
    Parallel,
    /// Choose by batch size
    #[default]
    Adaptive,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Align every line, preserving input order
    fn align_lines<S>(
        &self,
        aligner: &Aligner<'_>,
        lines: &[S],
        polyphone: bool,
    ) -> Result<Vec<LineAlignment>>
    where
        S: AsRef<str> + Sync;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Select an execution mode from the number of lines in a batch
pub fn auto_select(line_count: usize, threshold: usize) -> ExecutionMode {
    if line_count < 2 || line_count < threshold {
        // Thread pool start-up dominates for small batches
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_select_small_batches_are_sequential() {
        assert_eq!(auto_select(0, 0), ExecutionMode::Sequential);
        assert_eq!(auto_select(1, 0), ExecutionMode::Sequential);
        assert_eq!(auto_select(99, 100), ExecutionMode::Sequential);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_auto_select_large_batches_are_parallel() {
        assert_eq!(auto_select(100, 100), ExecutionMode::Parallel);
    }
}
