//! Sales data ingestion for SalesLab.
//!
//! Reads the three source files (sales CSV, products JSON, regions Parquet)
//! into a [`sales_store::Warehouse`], builds the derived analysis tables and
//! runs data quality checks over the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_etl::prelude::*;
//!
//! let mut pipeline = SalesPipeline::new(PipelineConfig::default());
//! let report = pipeline.run(chrono::Local::now().date_naive())?;
//! println!("{}", report.summary);
//! for issue in &report.issues {
//!     println!("{}", issue);
//! }
//! ```

pub mod columnar;
pub mod derived;
pub mod error;
pub mod loaders;
pub mod pipeline;
pub mod quality;
pub mod records;
pub mod schema;
pub mod summary;

pub use error::{EtlError, Result};
pub use pipeline::{PipelineConfig, PipelineReport, SalesPipeline};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::derived::create_derived_tables;
    pub use crate::error::EtlError;
    pub use crate::loaders::{
        load_products, load_regions, load_sales, read_products_json, read_regions_parquet,
        read_sales_csv, write_regions_parquet,
    };
    pub use crate::pipeline::{PipelineConfig, PipelineReport, SalesPipeline};
    pub use crate::quality::{
        analyze_sales_file, validate_data_quality, IssueKind, QualityIssue, SalesFileReport,
    };
    pub use crate::records::{MonthlySales, ProductPerformance, ProductRecord, SaleRecord};
    pub use crate::summary::{summarize, DataSummary};
}
