//! ETL error types.

use std::path::PathBuf;

use sales_core::CoreError;
use sales_store::StoreError;
use thiserror::Error;

/// Errors that can occur while loading and transforming sales data.
#[derive(Error, Debug)]
pub enum EtlError {
    /// Failed to read or write a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required input file does not exist.
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    /// Malformed CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed JSON.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Parquet read or write failure.
    #[error("Parquet error: {message}")]
    Parquet { message: String },

    /// Warehouse operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Domain error from the catalog layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EtlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtlError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        EtlError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parquet(message: impl Into<String>) -> Self {
        EtlError::Parquet {
            message: message.into(),
        }
    }
}

/// Result alias for ETL operations.
pub type Result<T> = std::result::Result<T, EtlError>;
