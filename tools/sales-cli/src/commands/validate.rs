//! Validate a product catalog document.

use anyhow::{bail, Context as _, Result};
use sales_core::document::CatalogDocument;
use sales_core::validation::validate_catalog;

use super::ValidateArgs;
use crate::context::Context;

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let path = match args.file.as_deref() {
        Some(file) => ctx.resolve_arg(file),
        None => ctx.resolve_config_path(&ctx.config.data.products_file),
    };

    ctx.output.header(&format!("Validating {}", path.display()));

    let doc = CatalogDocument::from_path(&path)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
    let report = validate_catalog(&doc);

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        ctx.output.kv("Catalog version", &doc.catalog.version);
        ctx.output.kv("Products", &doc.products.len().to_string());
        ctx.output.kv("Categories", &doc.catalog.categories.len().to_string());
        ctx.output.kv("Checks run", &report.checks_run.to_string());

        for finding in &report.findings {
            ctx.output.finding(finding);
        }
    }

    let errors = report.errors().count();
    if errors > 0 {
        bail!("Catalog has {} error(s)", errors);
    }

    let warnings = report.warnings().count();
    if warnings > 0 {
        ctx.output
            .success(&format!("Catalog is valid ({} warning(s))", warnings));
    } else {
        ctx.output.success("Catalog is valid");
    }
    Ok(())
}
