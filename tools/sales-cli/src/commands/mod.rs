//! CLI command implementations.

pub mod check;
pub mod config;
pub mod generate;
pub mod ingest;
pub mod inspect;
pub mod profit;
pub mod quality;
pub mod validate;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Catalog file (default: the configured products file).
    pub file: Option<String>,
}

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Sales CSV file.
    #[arg(long)]
    pub sales: Option<String>,

    /// Products JSON file.
    #[arg(long)]
    pub products: Option<String>,

    /// Regions Parquet file.
    #[arg(long)]
    pub regions: Option<String>,
}

/// Arguments for the quality command.
#[derive(Args)]
pub struct QualityArgs {
    /// Sales CSV file (default: the configured sales file).
    pub file: Option<String>,
}

/// Datasets the generate command can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    /// regions.parquet: the ten sales regions.
    Regions,
    /// region_profiles.parquet: regional market profiles.
    Profiles,
    /// large_sales.csv: chunked transaction data.
    Sales,
    /// seasonal_sales.csv: transactions with seasonal quantities.
    Seasonal,
    /// additional_products.json: flat product records.
    Products,
    /// complex_data.json: a nested JSON sample.
    Nested,
    /// Every dataset above.
    All,
}

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Dataset to generate.
    #[arg(value_enum)]
    pub dataset: Dataset,

    /// Row count for sales and product datasets.
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Random seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output directory.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Overwrite existing files without asking.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the profit command.
#[derive(Args)]
pub struct ProfitArgs {
    /// Unit selling price.
    pub price: f64,

    /// Unit cost.
    pub cost: f64,

    /// Units sold.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Transaction as a JSON object.
    pub transaction: String,

    /// Allowed total mismatch (default: from config).
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Also print the first rows of this table.
    #[arg(short, long)]
    pub table: Option<String>,

    /// Rows to print with --table.
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
