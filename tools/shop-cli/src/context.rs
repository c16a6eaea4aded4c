//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shop_commerce::catalog::{parse_catalog_json, sample_products, Product};
use tracing::{debug, info};

use crate::config::{ShopConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Catalog file given on the command line.
    catalog_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        catalog_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShopConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd)? {
                Some(path) => {
                    let config = ShopConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (ShopConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog_override,
        })
    }

    /// Find the nearest config file, walking up from `start`.
    fn find_config(start: &Path) -> Result<Option<PathBuf>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Ok(Some(config_path));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Directory relative paths in the config resolve against.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to `base`.
    pub fn resolve_path(base: &Path, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            base.join(path)
        }
    }

    /// Catalog file in effect: `--catalog` (relative to the working
    /// directory), else `catalog.path` (relative to the config file).
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.catalog_override {
            return Some(Self::resolve_path(&self.cwd, path));
        }
        self.config
            .catalog
            .path
            .as_deref()
            .map(|path| Self::resolve_path(&self.config_dir(), path))
    }

    /// Load the product collection, falling back to the sample catalog.
    pub fn load_catalog(&self) -> Result<Vec<Product>> {
        let Some(path) = self.catalog_path() else {
            debug!("no catalog configured, using sample catalog");
            return Ok(sample_products());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let products = parse_catalog_json(&content)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        info!(path = %path.display(), count = products.len(), "catalog loaded");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: ShopConfig, config_path: Option<&str>, cwd: &str) -> Context {
        Context {
            config,
            config_path: config_path.map(PathBuf::from),
            output: Output::new(false, true),
            cwd: PathBuf::from(cwd),
            catalog_override: None,
        }
    }

    #[test]
    fn test_sample_catalog_when_unconfigured() {
        let ctx = context(ShopConfig::default(), None, "/work");
        assert_eq!(ctx.catalog_path(), None);
        assert_eq!(ctx.load_catalog().unwrap().len(), 6);
    }

    #[test]
    fn test_catalog_path_resolves_against_config_dir() {
        let mut config = ShopConfig::default();
        config.catalog.path = Some("data/catalog.json".to_string());
        let ctx = context(config, Some("/shop/shop.toml"), "/shop/sub");
        assert_eq!(
            ctx.catalog_path(),
            Some(PathBuf::from("/shop/data/catalog.json"))
        );
    }

    #[test]
    fn test_override_resolves_against_cwd() {
        let mut ctx = context(ShopConfig::default(), Some("/shop/shop.toml"), "/work");
        ctx.catalog_override = Some("other.json".to_string());
        assert_eq!(ctx.catalog_path(), Some(PathBuf::from("/work/other.json")));
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let mut ctx = context(ShopConfig::default(), None, "/nonexistent-dir");
        ctx.catalog_override = Some("missing.json".to_string());
        let err = ctx.load_catalog().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read catalog"));
    }
}
