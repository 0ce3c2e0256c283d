//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading catalogs or computing metrics.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Failed to read or write a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON document.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Price must be strictly positive.
    #[error("Price must be positive, got {0}")]
    InvalidPrice(f64),

    /// Cost must be non-negative.
    #[error("Cost must be non-negative, got {0}")]
    InvalidCost(f64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CoreError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.into(),
            source,
        }
    }
}
