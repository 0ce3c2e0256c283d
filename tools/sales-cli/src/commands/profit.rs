//! Profit metrics for a sale.

use anyhow::Result;
use sales_core::profit::calculate_profit_metrics;

use super::ProfitArgs;
use crate::context::Context;

/// Run the profit command.
pub async fn run(args: ProfitArgs, ctx: &Context) -> Result<()> {
    let metrics = calculate_profit_metrics(args.price, args.cost, args.quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(&metrics);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} unit(s) at ${:.2} (cost ${:.2})",
        args.quantity, args.price, args.cost
    ));
    ctx.output
        .kv("Profit per unit", &metrics.profit_per_unit.display());
    ctx.output
        .kv("Margin", &format!("{:.2}%", metrics.margin_percentage));
    ctx.output.kv("Cost ratio", &format!("{:.2}%", metrics.cost_ratio));
    ctx.output
        .kv("Total revenue", &metrics.total_revenue.display());
    ctx.output.kv("Total profit", &metrics.total_profit.display());

    if metrics.profit_per_unit.is_negative() {
        ctx.output.warn("Selling below cost");
    }
    Ok(())
}
