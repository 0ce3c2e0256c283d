//! Validate a single transaction record.

use anyhow::{bail, Context as _, Result};
use sales_core::transaction::validate_transaction;

use super::CheckArgs;
use crate::context::Context;

/// Run the check command.
pub async fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let record: serde_json::Value =
        serde_json::from_str(&args.transaction).context("Transaction is not valid JSON")?;
    let tolerance = args
        .tolerance
        .unwrap_or(ctx.config.quality.total_tolerance);

    let result = validate_transaction(&record, tolerance);

    if ctx.output.is_json() {
        ctx.output.json(&result);
    } else {
        for error in &result.errors {
            ctx.output.error(error);
        }
        for warning in &result.warnings {
            ctx.output.warn(warning);
        }
    }

    if !result.valid {
        bail!("Transaction is invalid ({} error(s))", result.errors.len());
    }
    if result.warnings.is_empty() {
        ctx.output.success("Transaction is valid");
    } else {
        ctx.output.success("Transaction is valid (with warnings)");
    }
    Ok(())
}
