//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_catalog::query::QueryConfig;
use storefront_data::{CatalogSession, CatalogSource, FileCatalogSource, HttpCatalogSource};

use crate::config::{StorefrontConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            StorefrontConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };
        tracing::debug!(endpoint = %config.catalog.endpoint, "configuration loaded");

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<StorefrontConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping config file")
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

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Pick the catalog source: a local fixture if given, else the endpoint.
    pub fn source(&self, fixture: Option<&str>) -> Result<Box<dyn CatalogSource>> {
        match fixture {
            Some(path) => Ok(Box::new(FileCatalogSource::new(self.resolve_path(path)))),
            None => {
                let source = HttpCatalogSource::new(&self.config.catalog)
                    .context("Failed to build HTTP client")?;
                Ok(Box::new(source))
            }
        }
    }

    /// Open a session and load the snapshot, with a spinner while fetching.
    pub async fn open_session(
        &self,
        fixture: Option<&str>,
        query_config: QueryConfig,
    ) -> Result<CatalogSession<Box<dyn CatalogSource>>> {
        let source = self.source(fixture)?;
        let description = source.describe();
        let mut session =
            CatalogSession::new(source, query_config).context("Invalid page size")?;

        let spinner = self.output.spinner(&format!("Loading catalog from {}", description));
        let loaded = session.load().await.map(|_| ());
        spinner.finish_and_clear();
        loaded.with_context(|| format!("Failed to load catalog from {}", description))?;

        self.output.debug(&format!("Loaded {} products", session.query().snapshot().len()));
        Ok(session)
    }
}
