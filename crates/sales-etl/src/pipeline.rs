//! End-to-end ingestion: base tables, file loads, derived tables and checks.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sales_store::Warehouse;

use crate::derived::create_derived_tables;
use crate::error::Result;
use crate::loaders::{load_products, load_regions, load_sales};
use crate::quality::{validate_data_quality, QualityIssue};
use crate::schema;
use crate::summary::{summarize, DataSummary};

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sales_file: PathBuf,
    pub products_file: PathBuf,
    /// Optional; skipped with a warning when absent.
    pub regions_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

impl PipelineConfig {
    /// The standard file names inside `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            sales_file: dir.join("sales.csv"),
            products_file: dir.join("products.json"),
            regions_file: dir.join("regions.parquet"),
        }
    }
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub summary: DataSummary,
    pub issues: Vec<QualityIssue>,
}

/// Loads the source files into a fresh warehouse and analyzes them.
pub struct SalesPipeline {
    config: PipelineConfig,
    warehouse: Warehouse,
}

impl SalesPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            warehouse: Warehouse::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The warehouse holding whatever the last run loaded.
    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn into_warehouse(self) -> Warehouse {
        self.warehouse
    }

    /// Create empty base tables, replacing existing ones.
    pub fn setup_database(&mut self) {
        tracing::info!("Setting up database schema...");
        for table in schema::base_tables() {
            self.warehouse.create_table(table);
        }
        tracing::info!("Database schema created successfully");
    }

    /// Run every step in order. `today` bounds the future-date check.
    pub fn run(&mut self, today: NaiveDate) -> Result<PipelineReport> {
        tracing::info!("Starting sales data ingestion pipeline");

        match self.run_steps(today) {
            Ok(report) => {
                tracing::info!("Pipeline completed successfully");
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Pipeline failed: {}", e);
                Err(e)
            }
        }
    }

    fn run_steps(&mut self, today: NaiveDate) -> Result<PipelineReport> {
        self.setup_database();

        load_sales(&mut self.warehouse, &self.config.sales_file)?;
        load_products(&mut self.warehouse, &self.config.products_file)?;
        if self.config.regions_file.exists() {
            load_regions(&mut self.warehouse, &self.config.regions_file)?;
        } else {
            tracing::warn!(
                "Regions file not found: {}, skipping",
                self.config.regions_file.display()
            );
        }

        create_derived_tables(&mut self.warehouse)?;
        let issues = validate_data_quality(&self.warehouse, today)?;

        let summary = summarize(&self.warehouse)?;
        tracing::info!(
            sales = summary.sales,
            products = summary.products,
            regions = summary.regions,
            "Data summary"
        );

        Ok(PipelineReport { summary, issues })
    }
}
