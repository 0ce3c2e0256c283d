//! Generator error types.

use std::path::PathBuf;

use sales_etl::EtlError;
use thiserror::Error;

/// Errors that can occur while generating or writing synthetic data.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Generator parameters that cannot produce data.
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    /// Parquet encoding, shared with the ETL crate.
    #[error(transparent)]
    Etl(#[from] EtlError),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
