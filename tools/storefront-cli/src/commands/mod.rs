//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod facets;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Only show products in this category (exact name).
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Lowest price to include.
    #[arg(long)]
    pub min: Option<f64>,

    /// Highest price to include.
    #[arg(long)]
    pub max: Option<f64>,

    /// Color option to include (repeatable).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Material option to include (repeatable).
    #[arg(long = "material")]
    pub materials: Vec<String>,

    /// Sort order: featured, price-asc, price-desc, newest.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Page number (clamped to the last page).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Override the configured page size.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Read products from a local JSON file instead of the endpoint.
    #[arg(short, long)]
    pub fixture: Option<String>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Also list the first products of each category.
    #[arg(long)]
    pub preview: bool,

    /// Read products from a local JSON file instead of the endpoint.
    #[arg(short, long)]
    pub fixture: Option<String>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product slug, or numeric id.
    pub slug: String,

    /// Read products from a local JSON file instead of the endpoint.
    #[arg(short, long)]
    pub fixture: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Validate the config file.
    Validate,
    /// Initialize a new config file.
    Init {
        /// Output path.
        #[arg(default_value = "storefront.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
