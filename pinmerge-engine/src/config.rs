//! Configuration types for the engine

use pinmerge_core::ReconciliationPolicy;

use crate::ExecutionMode;

/// Default line count at which adaptive mode goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Minimum batch size, in lines, for parallel processing
    pub parallel_threshold: usize,
    /// How mismatched lines are resolved
    pub policy: ReconciliationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            policy: ReconciliationPolicy::PerLine,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX, // Never use parallel
            ..Self::default()
        }
    }

    /// Create a fast configuration that goes parallel early
    pub fn fast() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 8,
            ..Self::default()
        }
    }

    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Check the values before a converter is built
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("thread count must be at least 1".to_string());
        }
        Ok(())
    }
}
