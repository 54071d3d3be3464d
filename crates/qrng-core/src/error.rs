//! Error types for the QRNG core crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while sampling or reporting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrngError {
    /// A run parameter is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend returned an outcome key that is not a valid bit-string.
    #[error("Invalid bitstring '{bitstring}': {reason}")]
    InvalidBitstring {
        /// The offending key.
        bitstring: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A line of the samples file is not a decimal integer.
    #[error("Invalid sample on line {line}: '{content}'")]
    ParseSample {
        /// 1-based line number.
        line: usize,
        /// The line as read.
        content: String,
    },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Chart rasterization failed.
    #[error("Failed to render {}: {message}", path.display())]
    Chart {
        /// Image being written.
        path: PathBuf,
        /// Error reported by the drawing backend.
        message: String,
    },

    /// Circuit construction failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qrng_ir::IrError),

    /// Backend failure, propagated unmodified.
    #[error(transparent)]
    Hal(#[from] qrng_hal::HalError),
}

impl QrngError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QrngError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for QRNG operations.
pub type QrngResult<T> = Result<T, QrngError>;
