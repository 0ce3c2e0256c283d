//! Write synthetic datasets.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use dialoguer::Confirm;
use sales_datagen::prelude::*;

use super::{Dataset, GenerateArgs};
use crate::context::Context;
use crate::output::format_bytes;

const DATASETS: [Dataset; 6] = [
    Dataset::Regions,
    Dataset::Profiles,
    Dataset::Sales,
    Dataset::Seasonal,
    Dataset::Products,
    Dataset::Nested,
];

fn file_name(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Regions => "regions.parquet",
        Dataset::Profiles => "region_profiles.parquet",
        Dataset::Sales => "large_sales.csv",
        Dataset::Seasonal => "seasonal_sales.csv",
        Dataset::Products => "additional_products.json",
        Dataset::Nested => "complex_data.json",
        Dataset::All => "",
    }
}

/// Run the generate command.
pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let out_dir = match args.out.as_deref() {
        Some(dir) => ctx.resolve_arg(dir),
        None => ctx.resolve_config_path(&ctx.config.generate.output_dir),
    };
    let seed = args.seed.unwrap_or(ctx.config.generate.seed);

    let selected: Vec<Dataset> = match args.dataset {
        Dataset::All => DATASETS.to_vec(),
        one => vec![one],
    };
    let targets: Vec<(Dataset, PathBuf)> = selected
        .into_iter()
        .map(|d| (d, out_dir.join(file_name(d))))
        .collect();

    let existing: Vec<&PathBuf> = targets
        .iter()
        .map(|(_, path)| path)
        .filter(|path| path.exists())
        .collect();
    if !existing.is_empty() && !args.yes {
        for path in &existing {
            ctx.output.warn(&format!("Exists: {}", path.display()));
        }
        let confirmed = Confirm::new()
            .with_prompt("Overwrite existing files?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Generation cancelled");
            return Ok(());
        }
    }

    ctx.output
        .header(&format!("Generating data in {} (seed {})", out_dir.display(), seed));

    let mut written = Vec::new();
    for (i, (dataset, path)) in targets.iter().enumerate() {
        ctx.output.step(i + 1, targets.len(), file_name(*dataset));
        let file = generate_one(*dataset, path, seed, args.rows, ctx)
            .with_context(|| format!("Failed to generate {}", path.display()))?;
        ctx.output.success(&format!(
            "{}: {} row(s), {}",
            file.path.display(),
            file.rows,
            format_bytes(file.bytes)
        ));
        written.push(file);
    }

    if ctx.output.is_json() {
        ctx.output.json(&written);
    }
    Ok(())
}

fn generate_one(
    dataset: Dataset,
    path: &Path,
    seed: u64,
    rows: Option<usize>,
    ctx: &Context,
) -> Result<GeneratedFile> {
    let settings = &ctx.config.generate;

    let file = match dataset {
        Dataset::Regions => write_pipeline_regions(path)?,
        Dataset::Profiles => write_region_profiles_parquet(path)?,
        Dataset::Sales => {
            let config = LargeSalesConfig {
                target_rows: rows.unwrap_or(settings.sales_rows),
                seed,
                ..LargeSalesConfig::default()
            };
            let progress = ctx.output.progress(config.target_rows as u64, "rows");
            let sales = generate_large_sales_with_progress(&config, |done, _| {
                progress.set_position(done as u64)
            })?;
            progress.finish_and_clear();
            write_sales_csv(path, &sales)?
        }
        Dataset::Seasonal => {
            let n = rows.unwrap_or(settings.seasonal_rows);
            let today = ctx.config.quality.today();
            let source = ctx.resolve_config_path(&ctx.config.data.sales_file);
            let patterns = SalesPatterns::from_sales_csv(&source)?;
            if source.exists() {
                ctx.output
                    .debug(&format!("Using sales patterns from {}", source.display()));
            } else {
                ctx.output.debug("No sales file found, using default sales patterns");
            }
            let spinner = ctx.output.spinner("Generating seasonal sales...");
            let sales = generate_seasonal_sales_with(&patterns, n, today, seed);
            spinner.finish_and_clear();
            write_sales_csv(path, &sales)?
        }
        Dataset::Products => {
            let n = rows.unwrap_or(settings.product_count);
            let products = generate_additional_products(n, seed);
            write_products_json(path, &products)?
        }
        Dataset::Nested => write_json(path, &complex_document(Utc::now()))?,
        Dataset::All => bail!("`all` must be expanded before generation"),
    };
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<&str> = DATASETS.iter().map(|d| file_name(*d)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DATASETS.len());
    }
}
