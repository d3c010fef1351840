//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("endpoint", &ctx.config.catalog.endpoint);
    ctx.output.kv("timeout_secs", &ctx.config.catalog.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("page_size", &ctx.config.display.page_size.to_string());
    ctx.output.kv("currency_symbol", &ctx.config.display.currency_symbol);
    ctx.output.kv("preview_limit", &ctx.config.display.preview_limit.to_string());

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

async fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            ctx.output.warn("Init cancelled");
            return Ok(());
        }
    }

    let content = if path.ends_with(".json") {
        serde_json::to_string_pretty(&StorefrontConfig::default())?
    } else {
        generate_default_config()
    };
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

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

/// Collect configuration errors and warnings.
fn check_config(config: &StorefrontConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let endpoint = &config.catalog.endpoint;
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(format!("catalog.endpoint '{}' must be an http(s) URL", endpoint));
    } else if endpoint.starts_with("http://") {
        warnings.push("catalog.endpoint is not using https".to_string());
    }

    if config.catalog.timeout_secs == 0 {
        errors.push("catalog.timeout_secs must be greater than 0".to_string());
    }

    if config.display.page_size == 0 {
        errors.push("display.page_size must be greater than 0".to_string());
    } else if config.display.page_size > 100 {
        warnings.push(format!(
            "display.page_size {} is unusually large",
            config.display.page_size
        ));
    }

    if config.display.preview_limit == 0 {
        warnings.push("display.preview_limit is 0, previews will be empty".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "endpoint"] => Ok(config.catalog.endpoint.clone()),
        ["catalog", "timeout_secs"] => Ok(config.catalog.timeout_secs.to_string()),
        ["display", "page_size"] => Ok(config.display.page_size.to_string()),
        ["display", "currency_symbol"] => Ok(config.display.currency_symbol.clone()),
        ["display", "preview_limit"] => Ok(config.display.preview_limit.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let (errors, warnings) = check_config(&StorefrontConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_check_config_flags_problems() {
        let mut config = StorefrontConfig::default();
        config.catalog.endpoint = "ftp://shop.example.com".to_string();
        config.catalog.timeout_secs = 0;
        config.display.page_size = 0;

        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_plain_http_is_a_warning() {
        let mut config = StorefrontConfig::default();
        config.catalog.endpoint = "http://localhost:8080/products".to_string();

        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_get_config_value() {
        let config = StorefrontConfig::default();
        assert_eq!(get_config_value(&config, "display.page_size").unwrap(), "12");
        assert_eq!(get_config_value(&config, "display.currency_symbol").unwrap(), "$");
        assert!(get_config_value(&config, "display.theme").is_err());
    }
}
