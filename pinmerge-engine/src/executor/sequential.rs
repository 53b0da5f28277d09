//! Sequential execution strategy

use pinmerge_core::{Aligner, LineAlignment};

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor},
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn align_lines<S>(
        &self,
        aligner: &Aligner<'_>,
        lines: &[S],
        polyphone: bool,
    ) -> Result<Vec<LineAlignment>>
    where
        S: AsRef<str> + Sync,
    {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            out.push(aligner.align_line(line.as_ref(), polyphone)?);
        }
        Ok(out)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
