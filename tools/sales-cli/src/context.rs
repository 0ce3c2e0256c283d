//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use sales_etl::PipelineConfig;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// The config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, Path::new(path));
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    output.debug(&format!("Using config {}", path.display()));
                    (CliConfig::load(&path)?, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Directory that relative paths in the config are resolved against: the
    /// config file's directory, or the working directory without one.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Resolve a configured path.
    pub fn resolve_config_path(&self, path: &Path) -> PathBuf {
        resolve(self.base_dir(), path)
    }

    /// Resolve a path given on the command line.
    pub fn resolve_arg(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, Path::new(path))
    }

    /// Pipeline inputs from config, with command-line overrides.
    pub fn pipeline_config(
        &self,
        sales: Option<&str>,
        products: Option<&str>,
        regions: Option<&str>,
    ) -> PipelineConfig {
        let data = &self.config.data;
        let pick = |arg: Option<&str>, configured: &Path| match arg {
            Some(p) => self.resolve_arg(p),
            None => self.resolve_config_path(configured),
        };

        PipelineConfig {
            sales_file: pick(sales, &data.sales_file),
            products_file: pick(products, &data.products_file),
            regions_file: pick(regions, &data.regions_file),
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find a config file in `start` or any parent directory.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".sales.toml"), "").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(dir.path().join(".sales.toml"))
        );
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sales.json"), "{}").unwrap();
        std::fs::write(dir.path().join("sales.toml"), "").unwrap();

        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join("sales.toml"))
        );
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work/sub"),
            config_path: Some(PathBuf::from("/work/sales.toml")),
        };

        let pipeline = ctx.pipeline_config(Some("other.csv"), None, Some("/abs/r.parquet"));
        assert_eq!(pipeline.sales_file, PathBuf::from("/work/sub/other.csv"));
        assert_eq!(pipeline.products_file, PathBuf::from("/work/data/products.json"));
        assert_eq!(pipeline.regions_file, PathBuf::from("/abs/r.parquet"));
    }
}
