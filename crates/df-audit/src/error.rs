//! Audit error types.

use std::path::PathBuf;

/// Errors from reading or writing number lists.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// File could not be opened, read or written.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank line is not a non-negative decimal integer.
    #[error("{path}:{line}: not a non-negative integer: {content:?}")]
    Parse {
        path: PathBuf,
        /// 1-based line number
        line: usize,
        content: String,
    },
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
