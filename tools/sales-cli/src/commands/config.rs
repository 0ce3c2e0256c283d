//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let data = &ctx.config.data;
    ctx.output.info("");
    ctx.output.info("[data]");
    ctx.output.kv("sales_file", &data.sales_file.display().to_string());
    ctx.output
        .kv("products_file", &data.products_file.display().to_string());
    ctx.output
        .kv("regions_file", &data.regions_file.display().to_string());

    let quality = &ctx.config.quality;
    ctx.output.info("");
    ctx.output.info("[quality]");
    ctx.output
        .kv("total_tolerance", &quality.total_tolerance.to_string());
    match quality.reference_date {
        Some(date) => ctx.output.kv("reference_date", &date.to_string()),
        None => ctx
            .output
            .kv("reference_date", &format!("(today: {})", quality.today())),
    }

    let generate = &ctx.config.generate;
    ctx.output.info("");
    ctx.output.info("[generate]");
    ctx.output.kv("seed", &generate.seed.to_string());
    ctx.output
        .kv("output_dir", &generate.output_dir.display().to_string());
    ctx.output.kv("sales_rows", &generate.sales_rows.to_string());
    ctx.output
        .kv("seasonal_rows", &generate.seasonal_rows.to_string());
    ctx.output
        .kv("product_count", &generate.product_count.to_string());

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx
        .config_path
        .clone()
        .or_else(|| find_config_file(&ctx.cwd))
    else {
        bail!("No config file found. Run `sales config init` to create one.")
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("sales.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config, |p| ctx.resolve_config_path(p).exists());

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check_config(
    config: &CliConfig,
    exists: impl Fn(&Path) -> bool,
) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let tolerance = config.quality.total_tolerance;
    if !tolerance.is_finite() || tolerance < 0.0 {
        errors.push(format!(
            "quality.total_tolerance must be a non-negative number, got {}",
            tolerance
        ));
    }

    let generate = &config.generate;
    for (key, n) in [
        ("generate.sales_rows", generate.sales_rows),
        ("generate.seasonal_rows", generate.seasonal_rows),
        ("generate.product_count", generate.product_count),
    ] {
        if n == 0 {
            errors.push(format!("{} must be greater than 0", key));
        }
    }

    let data = &config.data;
    for (key, path) in [
        ("data.sales_file", &data.sales_file),
        ("data.products_file", &data.products_file),
    ] {
        if !exists(path) {
            warnings.push(format!("{} '{}' does not exist", key, path.display()));
        }
    }
    // Regions are optional for the pipeline.
    if !exists(&data.regions_file) {
        warnings.push(format!(
            "data.regions_file '{}' does not exist; regions will be skipped",
            data.regions_file.display()
        ));
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["data", "sales_file"] => Ok(config.data.sales_file.display().to_string()),
        ["data", "products_file"] => Ok(config.data.products_file.display().to_string()),
        ["data", "regions_file"] => Ok(config.data.regions_file.display().to_string()),
        ["quality", "total_tolerance"] => Ok(config.quality.total_tolerance.to_string()),
        ["quality", "reference_date"] => Ok(config
            .quality
            .reference_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["generate", "seed"] => Ok(config.generate.seed.to_string()),
        ["generate", "output_dir"] => Ok(config.generate.output_dir.display().to_string()),
        ["generate", "sales_rows"] => Ok(config.generate.sales_rows.to_string()),
        ["generate", "seasonal_rows"] => Ok(config.generate.seasonal_rows.to_string()),
        ["generate", "product_count"] => Ok(config.generate.product_count.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["data", "sales_file"] => config.data.sales_file = value.into(),
        ["data", "products_file"] => config.data.products_file = value.into(),
        ["data", "regions_file"] => config.data.regions_file = value.into(),
        ["quality", "total_tolerance"] => config.quality.total_tolerance = value.parse()?,
        ["quality", "reference_date"] => {
            config.quality.reference_date = match value {
                "" | "null" | "today" => None,
                date => Some(NaiveDate::parse_from_str(date, "%Y-%m-%d")?),
            }
        }
        ["generate", "seed"] => config.generate.seed = value.parse()?,
        ["generate", "output_dir"] => config.generate.output_dir = value.into(),
        ["generate", "sales_rows"] => config.generate.sales_rows = value.parse()?,
        ["generate", "seasonal_rows"] => config.generate.seasonal_rows = value.parse()?,
        ["generate", "product_count"] => config.generate.product_count = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_get_config_value() {
        let config = CliConfig::default();

        assert_eq!(
            get_config_value(&config, "data.sales_file").unwrap(),
            "data/sales.csv"
        );
        assert_eq!(get_config_value(&config, "generate.seed").unwrap(), "42");
        assert_eq!(
            get_config_value(&config, "quality.reference_date").unwrap(),
            "null"
        );
        assert!(get_config_value(&config, "data.missing").is_err());
    }

    #[test]
    fn test_set_config_value() {
        let mut config = CliConfig::default();

        set_config_value(&mut config, "generate.sales_rows", "1000").unwrap();
        set_config_value(&mut config, "quality.reference_date", "2024-06-30").unwrap();
        set_config_value(&mut config, "data.regions_file", "out/regions.parquet").unwrap();

        assert_eq!(config.generate.sales_rows, 1000);
        assert_eq!(
            config.quality.reference_date,
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(
            config.data.regions_file,
            PathBuf::from("out/regions.parquet")
        );

        set_config_value(&mut config, "quality.reference_date", "today").unwrap();
        assert_eq!(config.quality.reference_date, None);
    }

    #[test]
    fn test_set_config_value_rejects_bad_input() {
        let mut config = CliConfig::default();

        assert!(set_config_value(&mut config, "generate.seed", "abc").is_err());
        assert!(set_config_value(&mut config, "quality.reference_date", "06/30/2024").is_err());
        assert!(set_config_value(&mut config, "build.target", "x").is_err());
    }

    #[test]
    fn test_check_config() {
        let mut config = CliConfig::default();
        let (errors, warnings) = check_config(&config, |_| true);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        config.quality.total_tolerance = -1.0;
        config.generate.product_count = 0;
        let (errors, warnings) = check_config(&config, |p| !p.ends_with("regions.parquet"));
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("data.regions_file"));
    }
}
