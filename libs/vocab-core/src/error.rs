//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CardError.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors raised when building cards or parsing user-facing values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("front (English) text is empty")]
    EmptyFront,

    #[error("back (Russian) text is empty")]
    EmptyBack,

    #[error("unknown grade: {0}")]
    UnknownGrade(String),

    #[error("unknown review direction: {0}")]
    UnknownDirection(String),

    #[error("unknown review mode: {0}")]
    UnknownMode(String),
}
