//! Run the ingestion pipeline.

use anyhow::{Context as _, Result};
use sales_etl::pipeline::{PipelineReport, SalesPipeline};

use super::IngestArgs;
use crate::context::Context;
use crate::output::format_usd;

/// Run the ingest command.
pub async fn run(args: IngestArgs, ctx: &Context) -> Result<()> {
    let config = ctx.pipeline_config(
        args.sales.as_deref(),
        args.products.as_deref(),
        args.regions.as_deref(),
    );

    ctx.output.header("Ingesting sales data");
    ctx.output.debug(&format!("Sales: {}", config.sales_file.display()));
    ctx.output
        .debug(&format!("Products: {}", config.products_file.display()));
    ctx.output
        .debug(&format!("Regions: {}", config.regions_file.display()));
    if !config.regions_file.exists() {
        ctx.output.warn(&format!(
            "Regions file not found: {} (skipped)",
            config.regions_file.display()
        ));
    }

    let spinner = ctx.output.spinner("Running pipeline...");
    let mut pipeline = SalesPipeline::new(config);
    let result = pipeline.run(ctx.config.quality.today());
    spinner.finish_and_clear();
    let report = result.context("Pipeline failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    print_report(&report, ctx);
    Ok(())
}

fn print_report(report: &PipelineReport, ctx: &Context) {
    let summary = &report.summary;
    ctx.output.kv("Sales", &summary.sales.to_string());
    ctx.output.kv("Products", &summary.products.to_string());
    ctx.output.kv("Regions", &summary.regions.to_string());
    ctx.output.kv(
        "Date range",
        summary.sales_date_range.as_deref().unwrap_or("n/a"),
    );
    ctx.output.kv("Total revenue", &format_usd(summary.total_revenue));

    if report.issues.is_empty() {
        ctx.output.success("All data quality checks passed");
    } else {
        ctx.output.warn(&format!(
            "{} data quality issue(s) found",
            report.issues.len()
        ));
        for issue in &report.issues {
            ctx.output.list_item(&issue.to_string());
        }
    }
}
