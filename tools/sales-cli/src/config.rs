//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sales_core::transaction::DEFAULT_TOTAL_TOLERANCE;
use sales_datagen::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["sales.toml", ".sales.toml", "sales.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Input data locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Quality check settings.
    #[serde(default)]
    pub quality: QualityConfig,

    /// Data generator settings.
    #[serde(default)]
    pub generate: GenerateConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Input data locations, relative to the directory holding the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_sales_file")]
    pub sales_file: PathBuf,

    /// Catalog document or flat product list.
    #[serde(default = "default_products_file")]
    pub products_file: PathBuf,

    #[serde(default = "default_regions_file")]
    pub regions_file: PathBuf,
}

fn default_sales_file() -> PathBuf {
    PathBuf::from("data/sales.csv")
}

fn default_products_file() -> PathBuf {
    PathBuf::from("data/products.json")
}

fn default_regions_file() -> PathBuf {
    PathBuf::from("data/regions.parquet")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sales_file: default_sales_file(),
            products_file: default_products_file(),
            regions_file: default_regions_file(),
        }
    }
}

/// Quality check settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Allowed difference between `quantity * unit_price` and `total_amount`.
    #[serde(default = "default_tolerance")]
    pub total_tolerance: f64,

    /// Dates after this day count as future dates (default: today).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOTAL_TOLERANCE
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            total_tolerance: default_tolerance(),
            reference_date: None,
        }
    }
}

impl QualityConfig {
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Data generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Rows in `large_sales.csv`.
    #[serde(default = "default_sales_rows")]
    pub sales_rows: usize,

    /// Rows in `seasonal_sales.csv`.
    #[serde(default = "default_sales_rows")]
    pub seasonal_rows: usize,

    /// Products in `additional_products.json`.
    #[serde(default = "default_product_count")]
    pub product_count: usize,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_sales_rows() -> usize {
    50_000
}

fn default_product_count() -> usize {
    100
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            output_dir: default_output_dir(),
            sales_rows: default_sales_rows(),
            seasonal_rows: default_sales_rows(),
            product_count: default_product_count(),
        }
    }
}

/// Generate a default sales.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# SalesLab configuration

[data]
sales_file = "data/sales.csv"
products_file = "data/products.json"
regions_file = "data/regions.parquet"

[quality]
total_tolerance = {tolerance}
# reference_date = "2024-06-30"

[generate]
seed = {seed}
output_dir = "data"
sales_rows = 50000
seasonal_rows = 50000
product_count = 100
"#,
        tolerance = DEFAULT_TOTAL_TOLERANCE,
        seed = DEFAULT_SEED
    )
}
