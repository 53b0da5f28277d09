//! Parallel execution strategy

use pinmerge_core::{Aligner, LineAlignment};
use rayon::prelude::*;

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};

/// Parallel multi-threaded executor
///
/// Lines are independent, so each one is aligned on whichever worker picks
/// it up; `collect` keeps the results in input order.
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a new parallel executor. `None` uses one thread per core.
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Configured worker count
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Executor for ParallelExecutor {
    fn align_lines<S>(
        &self,
        aligner: &Aligner<'_>,
        lines: &[S],
        polyphone: bool,
    ) -> Result<Vec<LineAlignment>>
    where
        S: AsRef<str> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.thread_count())
            .build()
            .map_err(|e| EngineError::ParallelError(e.to_string()))?;

        pool.install(|| {
            lines
                .par_iter()
                .map(|line| {
                    aligner
                        .align_line(line.as_ref(), polyphone)
                        .map_err(EngineError::Core)
                })
                .collect::<Result<Vec<_>>>()
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_count() {
        assert_eq!(ParallelExecutor::new(None).thread_count(), num_cpus::get());
        assert_eq!(ParallelExecutor::new(Some(3)).thread_count(), 3);
        assert_eq!(ParallelExecutor::new(Some(0)).thread_count(), 1);
        assert_eq!(ParallelExecutor::default().mode(), ExecutionMode::Parallel);
    }
}
