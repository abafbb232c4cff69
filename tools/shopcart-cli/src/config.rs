//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopcart_core::checkout::CheckoutConfig;
use shopcart_core::cart::DEFAULT_CART_KEY;

/// Environment variable overriding `checkout.base_url`.
pub const BASE_URL_ENV: &str = "SHOPCART_BASE_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Cart storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.checkout.base_url = base_url;
            }
        }
        self
    }
}

/// Where the cart is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted values.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".shopcart".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_cart_key(),
        }
    }
}

/// Where product records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON export of the provider's product list.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Generate a default shopcart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# ShopCart configuration

[storage]
dir = "{dir}"
key = "{key}"

[catalog]
# Product list exported from the catalog provider
path = "{catalog}"

[checkout]
# Overridden by ${env} when set
base_url = "http://localhost:3000"
currency = "usd"
success_path = "/success"
cancel_path = "/checkout"
"#,
        dir = default_storage_dir(),
        key = default_cart_key(),
        catalog = default_catalog_path(),
        env = BASE_URL_ENV,
    )
}
