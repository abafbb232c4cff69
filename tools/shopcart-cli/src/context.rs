//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopcart_cache::FileStore;
use shopcart_core::cart::CartStore;
use shopcart_core::catalog::StaticCatalog;

use crate::config::ShopConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["shopcart.toml", ".shopcart.toml", "shopcart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let base = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (ShopConfig::load(path)?, base)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (ShopConfig::default(), cwd.clone()))
        };

        tracing::debug!(base_dir = %base_dir.display(), "configuration loaded");

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ShopConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match ShopConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), "ignoring config: {:#}", e)
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    /// Directory the cart is persisted in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> CartStore<FileStore> {
        CartStore::load_with_key(
            FileStore::open(self.storage_dir()),
            self.config.storage.key.clone(),
        )
    }

    /// Load the product catalog.
    pub fn catalog(&self) -> Result<StaticCatalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        StaticCatalog::from_path(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }
}
