//! Catalog, money and validation types for SalesLab.
//!
//! This crate holds the domain model shared by the rest of the workspace:
//!
//! - **Catalog**: the versioned product catalog document, categories, products,
//!   suppliers, inventory and sales metrics
//! - **Validation**: structural consistency checks over a catalog document
//! - **Profit**: per-product profit and margin calculations
//! - **Transactions**: validation of loosely-typed sales transaction records
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_core::prelude::*;
//!
//! let doc = CatalogDocument::from_path("data/products.json")?;
//! let report = validate_catalog(&doc);
//! for finding in report.errors() {
//!     println!("{}", finding);
//! }
//!
//! let metrics = calculate_profit_metrics(29.99, 18.50, 10)?;
//! println!("Total profit: {}", metrics.total_profit);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod document;
pub mod profit;
pub mod region;
pub mod transaction;
pub mod validation;

pub use document::CatalogDocument;
pub use error::CoreError;
pub use ids::*;
pub use money::Money;
pub use region::{Region, RegionProfile};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        Category, InventoryRecord, Product, ProductStatus, SalesMetrics, Supplier,
    };
    pub use crate::document::{CatalogDocument, CatalogHeader, Metadata};

    // Checks and calculations
    pub use crate::profit::{calculate_profit_metrics, ProfitMetrics};
    pub use crate::region::{Region, RegionProfile};
    pub use crate::transaction::{validate_transaction, TransactionValidation};
    pub use crate::validation::{
        validate_catalog, CheckKind, Finding, Severity, ValidationReport,
    };
}
