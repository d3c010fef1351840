//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_catalog::query::{QueryConfig, DEFAULT_PAGE_SIZE};
use storefront_data::HttpSourceConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog endpoint configuration.
    #[serde(default)]
    pub catalog: HttpSourceConfig,

    /// Listing and price display.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl StorefrontConfig {
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

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Pipeline settings derived from the display section.
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            page_size: self.display.page_size,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Symbol printed before prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Products shown per category in `facets --preview`.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_preview_limit() -> usize {
    8
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            currency_symbol: default_currency_symbol(),
            preview_limit: default_preview_limit(),
        }
    }
}

/// Generate the commented default config written by `config init`.
pub fn generate_default_config() -> String {
    let defaults = StorefrontConfig::default();
    format!(
        r#"# Storefront CLI configuration

[catalog]
# Endpoint returning the full product collection as a JSON array
endpoint = "{endpoint}"
timeout_secs = {timeout}

[display]
page_size = {page_size}
currency_symbol = "{symbol}"
preview_limit = {preview}
"#,
        endpoint = defaults.catalog.endpoint,
        timeout = defaults.catalog.timeout_secs,
        page_size = defaults.display.page_size,
        symbol = defaults.display.currency_symbol,
        preview = defaults.display.preview_limit,
    )
}
