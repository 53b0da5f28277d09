//! Layered error types

use std::path::PathBuf;

use pinmerge_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm or collaborator error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A dictionary or table could not be loaded
    #[error("failed to load resource {path}: {reason}")]
    Resource {
        /// The resource that failed
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl EngineError {
    /// Resource error for `path`
    pub fn resource(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EngineError::Resource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_names_path() {
        let err = EngineError::resource("dict/phrases.txt", "line 3: missing separator");
        assert_eq!(
            err.to_string(),
            "failed to load resource dict/phrases.txt: line 3: missing separator"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let err: EngineError = CoreError::Romanization("boom".into()).into();
        assert!(matches!(err, EngineError::Core(_)));
    }
}
