//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
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
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }

    ctx.output.info("");
    ctx.output.info("[app]");
    ctx.output.kv("name", &ctx.config.app.name);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output
        .kv("level", &ctx.config.logging.level.to_string().to_lowercase());
    ctx.output.kv("format", format_name(ctx));

    ctx.output.info("");
    ctx.output.info("[[routes]]");
    for route in &ctx.config.routes {
        ctx.output.list_item(&format!(
            "{} {} -> {}",
            route.methods.join(","),
            route.pattern,
            route.action
        ));
    }

    ctx.output.info("");
    match &ctx.config.catalog {
        Some(products) => {
            ctx.output.info("[[catalog]]");
            for product in products {
                ctx.output
                    .list_item(&format!("{} ({})", product.name, product.price));
            }
        }
        None => ctx.output.info("catalog: built-in default product"),
    }

    Ok(())
}

fn format_name(ctx: &Context) -> &'static str {
    match ctx.config.logging.format {
        vitrine_observability::LogFormat::Json => "json",
        vitrine_observability::LogFormat::Human => "human",
    }
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("vitrine.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = ctx
        .cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("vitrine");

    fs::write(&config_path, generate_default_config(name))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.issues();
    let warnings = shadowed_routes(ctx);

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

/// Routes that can never match because an earlier route takes the same
/// pattern and method.
fn shadowed_routes(ctx: &Context) -> Vec<String> {
    let routes = &ctx.config.routes;
    let mut warnings = Vec::new();

    for (i, route) in routes.iter().enumerate() {
        let shadowed = routes[..i].iter().any(|earlier| {
            earlier.pattern == route.pattern
                && route
                    .methods
                    .iter()
                    .all(|m| earlier.methods.iter().any(|e| e.eq_ignore_ascii_case(m)))
        });
        if shadowed {
            warnings.push(format!(
                "routes[{}] ({}) is shadowed by an earlier route",
                i, route.pattern
            ));
        }
    }

    warnings
}
