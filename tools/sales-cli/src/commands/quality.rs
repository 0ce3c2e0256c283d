//! Profile a sales CSV file.

use anyhow::{Context as _, Result};
use sales_etl::quality::analyze_sales_file;

use super::QualityArgs;
use crate::context::Context;
use crate::output::format_usd;

/// Run the quality command.
pub async fn run(args: QualityArgs, ctx: &Context) -> Result<()> {
    let path = match args.file.as_deref() {
        Some(file) => ctx.resolve_arg(file),
        None => ctx.resolve_config_path(&ctx.config.data.sales_file),
    };

    let report = analyze_sales_file(&path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output
        .header(&format!("Data quality report: {}", path.display()));
    ctx.output.kv("Rows", &report.total_rows.to_string());
    ctx.output.kv("Columns", &report.total_columns.to_string());
    ctx.output.kv("File size", &format!("{:.2} MB", report.file_size_mb));
    ctx.output
        .kv("Duplicate rows", &report.duplicate_rows.to_string());
    ctx.output
        .kv("Unique customers", &report.unique_customers.to_string());
    ctx.output
        .kv("Unique products", &report.unique_products.to_string());
    if let Some(n) = report.non_positive_quantities {
        ctx.output.kv("Non-positive quantities", &n.to_string());
    }
    if let Some(n) = report.non_positive_amounts {
        ctx.output.kv("Non-positive amounts", &n.to_string());
    }
    ctx.output
        .kv("Total revenue", &format_usd(report.total_revenue));

    let missing: Vec<_> = report.missing_values.iter().filter(|m| m.count > 0).collect();
    if missing.is_empty() {
        ctx.output.success("No missing values");
    } else {
        ctx.output.warn(&format!(
            "{} missing value(s)",
            report.total_missing()
        ));
        for m in missing {
            ctx.output.list_item(&format!("{}: {}", m.column, m.count));
        }
    }
    Ok(())
}
