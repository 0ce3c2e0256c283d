//! Sales CLI - Command line tool for the SalesLab data workflow.
//!
//! Commands:
//! - `sales validate` - Validate a product catalog
//! - `sales ingest` - Load the data files and run quality checks
//! - `sales quality` - Profile a sales CSV file
//! - `sales generate` - Write synthetic datasets
//! - `sales profit` - Calculate profit metrics
//! - `sales check` - Validate a single transaction
//! - `sales inspect` - List warehouse tables after loading
//! - `sales config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{
    CheckArgs, ConfigArgs, GenerateArgs, IngestArgs, InspectArgs, ProfitArgs, QualityArgs,
    ValidateArgs,
};

/// Sales CLI - Validate, ingest and generate sales data
#[derive(Parser)]
#[command(name = "sales")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a product catalog document
    Validate(ValidateArgs),

    /// Load sales, products and regions and run quality checks
    Ingest(IngestArgs),

    /// Profile a sales CSV file
    Quality(QualityArgs),

    /// Generate synthetic datasets
    Generate(GenerateArgs),

    /// Calculate profit metrics for a sale
    Profit(ProfitArgs),

    /// Validate a single transaction given as JSON
    Check(CheckArgs),

    /// Load the configured data and list warehouse tables
    Inspect(InspectArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
        Commands::Ingest(args) => commands::ingest::run(args, &ctx).await,
        Commands::Quality(args) => commands::quality::run(args, &ctx).await,
        Commands::Generate(args) => commands::generate::run(args, &ctx).await,
        Commands::Profit(args) => commands::profit::run(args, &ctx).await,
        Commands::Check(args) => commands::check::run(args, &ctx).await,
        Commands::Inspect(args) => commands::inspect::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
