//! Error types.

use thiserror::Error;

/// Errors from the page-size preference store.
///
/// These never reach table callers: the preference facade logs them and
/// falls back to an in-memory value.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("page size {value} outside {min}..={max}")]
    OutOfRange { value: usize, min: usize, max: usize },
    #[error("storage unavailable")]
    Unavailable,
}
