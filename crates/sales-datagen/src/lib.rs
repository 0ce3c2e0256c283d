//! Seeded synthetic data for SalesLab.
//!
//! Every random generator takes a seed and returns the same data for the
//! same seed, so generated files can be rebuilt and diffed.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_datagen::prelude::*;
//!
//! let rows = generate_large_sales(&LargeSalesConfig::with_rows(1_000))?;
//! let file = write_sales_csv("data/large_sales.csv", &rows)?;
//! println!("{} rows, {} bytes", file.rows, file.bytes);
//! ```

pub mod error;
pub mod nested;
pub mod products;
pub mod regions;
pub mod sales;
pub mod writer;

mod sampling;

pub use error::{GenError, Result};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::GenError;
    pub use crate::nested::complex_document;
    pub use crate::products::generate_additional_products;
    pub use crate::regions::{
        pipeline_regions, region_profiles, write_pipeline_regions, write_region_profiles_parquet,
    };
    pub use crate::sales::{
        generate_large_sales, generate_large_sales_with_progress, generate_seasonal_sales,
        generate_seasonal_sales_with, LargeSale, LargeSalesConfig, SalesPatterns,
    };
    pub use crate::writer::{write_json, write_products_json, write_sales_csv, GeneratedFile};
    pub use crate::DEFAULT_SEED;
}
