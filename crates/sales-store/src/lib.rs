//! In-memory typed table store for SalesLab.
//!
//! Provides a small, ergonomic API for loading rows into named tables and
//! reading them back as typed records. There is no query language: callers
//! scan tables and aggregate in Rust.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_store::prelude::*;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Product {
//!     product_id: String,
//!     name: String,
//!     price: f64,
//! }
//!
//! let mut wh = Warehouse::new();
//! wh.create_table(TableSchema::new("products", vec![
//!     Column::text("product_id").primary_key(),
//!     Column::text("name"),
//!     Column::real("price"),
//! ]));
//!
//! // Insert data
//! wh.insert_row("products", row!["PRD_001", "Rust Book", 49.99])?;
//!
//! // Read back with typed results
//! let products: Vec<Product> = wh.query_as("products")?;
//! ```

mod error;
mod schema;
mod types;
mod warehouse;

pub use error::StoreError;
pub use schema::{Column, ColumnType, TableSchema};
pub use types::{QueryResult, Row, Value};
pub use warehouse::{TableInfo, Warehouse};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        row, Column, ColumnType, QueryResult, Row, StoreError, TableInfo, TableSchema, Value,
        Warehouse,
    };
}

/// Build a row of values.
///
/// # Example
///
/// ```rust,ignore
/// use sales_store::row;
///
/// let values = row!["TXN_001", 3, 29.99, None::<String>];
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}
