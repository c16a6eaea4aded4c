//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[catalog]");
    match ctx.catalog_path() {
        Some(path) => ctx.output.kv("path", &path.display().to_string()),
        None => ctx.output.kv("path", "(built-in sample catalog)"),
    }
    ctx.output.kv("default_sort", &ctx.config.catalog.default_sort);
    ctx.output.kv("related_limit", &ctx.config.catalog.related_limit.to_string());

    // Pricing section
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_shipping_threshold",
        &ctx.config.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("flat_shipping", &ctx.config.pricing.flat_shipping.to_string());
    ctx.output.kv("tax_rate", &ctx.config.pricing.tax_rate.to_string());

    // Logging section
    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format);

    // Promotions
    ctx.output.info("");
    ctx.output.info("Promotions:");
    if ctx.config.promotions.is_empty() {
        ctx.output.list_item("(none)");
    }
    for promotion in &ctx.config.promotions {
        let value = match (promotion.percent, promotion.amount) {
            (Some(percent), _) => format!("{}% off", percent),
            (None, Some(amount)) => format!("{} off", amount),
            (None, None) => "no value".to_string(),
        };
        ctx.output.list_item(&format!("{} - {}", promotion.code, value));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

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
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, warnings) = ctx.config.check();

    if let Some(path) = ctx.catalog_path() {
        if !path.is_file() {
            errors.push(format!("catalog file not found: {}", path.display()));
        } else if let Err(e) = ctx.load_catalog() {
            errors.push(format!("{:#}", e));
        }
    }

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
