//! Load the configured data and list what landed in the warehouse.

use anyhow::{Context as _, Result};
use sales_etl::pipeline::SalesPipeline;
use sales_store::{QueryResult, Warehouse};

use super::InspectArgs;
use crate::context::Context;

/// Run the inspect command.
pub async fn run(args: InspectArgs, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading data...");
    let mut pipeline = SalesPipeline::new(ctx.pipeline_config(None, None, None));
    let result = pipeline.run(ctx.config.quality.today());
    spinner.finish_and_clear();
    result.context("Failed to load data")?;

    let wh = pipeline.warehouse();
    let preview = match args.table.as_deref() {
        Some(table) => Some(wh.query(table)?),
        None => None,
    };

    if ctx.output.is_json() {
        let mut value = serde_json::json!({ "tables": wh.tables() });
        if let Some(result) = &preview {
            let rows: Vec<serde_json::Value> = result
                .iter()
                .take(args.limit)
                .map(|row| {
                    row.columns()
                        .iter()
                        .cloned()
                        .zip(row.values().iter().map(|v| v.to_json()))
                        .collect::<serde_json::Map<_, _>>()
                        .into()
                })
                .collect();
            value["preview"] = rows.into();
        }
        ctx.output.json(&value);
        return Ok(());
    }

    print_tables(wh, ctx);
    if let (Some(table), Some(result)) = (args.table.as_deref(), &preview) {
        print_preview(table, result, args.limit, ctx);
    }
    Ok(())
}

fn print_tables(wh: &Warehouse, ctx: &Context) {
    ctx.output.header("Warehouse tables");
    let widths = [22, 8, 8];
    ctx.output.table_row(&["TABLE", "ROWS", "COLUMNS"], &widths);
    for info in wh.tables() {
        ctx.output.table_row(
            &[
                info.name.as_str(),
                info.row_count.to_string().as_str(),
                info.column_count.to_string().as_str(),
            ],
            &widths,
        );
    }
}

fn print_preview(table: &str, result: &QueryResult, limit: usize, ctx: &Context) {
    ctx.output
        .header(&format!("{} (first {} of {})", table, limit.min(result.len()), result.len()));

    let width = 16;
    let widths = vec![width; result.columns.len()];
    let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    ctx.output.table_row(&headers, &widths);

    for row in result.iter().take(limit) {
        let cells: Vec<String> = row
            .values()
            .iter()
            .map(|v| truncate(&v.to_string(), width))
            .collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        ctx.output.table_row(&cells, &widths);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
