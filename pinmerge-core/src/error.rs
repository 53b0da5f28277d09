//! Core error types

use thiserror::Error;

use crate::vocab::VocabError;

/// Errors raised by the alignment pipeline and its boundary utilities
#[derive(Debug, Error)]
pub enum CoreError {
    /// The word segmentation collaborator failed
    #[error("segmentation failed: {0}")]
    Segmentation(String),

    /// One of the romanizer collaborators failed
    #[error("romanization failed: {0}")]
    Romanization(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Vocabulary loading or lookup failed
    #[error(transparent)]
    Vocab(#[from] VocabError),

    /// Arguments of a helper disagree in shape or range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
