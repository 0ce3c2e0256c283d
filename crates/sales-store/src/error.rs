//! Warehouse error types.

use thiserror::Error;

use crate::schema::ColumnType;

/// Errors that can occur when using the warehouse.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No table with this name.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The table has no column with this name.
    #[error("Column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },

    /// Row has the wrong number of values.
    #[error("Table {table} has {expected} columns, row has {got} values")]
    ArityMismatch {
        table: String,
        expected: usize,
        got: usize,
    },

    /// Value cannot be stored in a column of this type.
    #[error("Cannot store {got} value in {table}.{column} ({expected})")]
    TypeMismatch {
        table: String,
        column: String,
        expected: ColumnType,
        got: &'static str,
    },

    /// Primary key missing or duplicated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Failed to convert a record into a row.
    #[error("Serialization error: {0}")]
    SerializeError(String),

    /// Failed to deserialize a row.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::DeserializeError(e.to_string())
    }
}
