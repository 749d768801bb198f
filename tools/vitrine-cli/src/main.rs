//! Vitrine CLI - Command line tool for the vitrine products API.
//!
//! Commands:
//! - `vitrine request` - Dispatch a request and print the emitted payload
//! - `vitrine routes` - List the configured routes
//! - `vitrine config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use vitrine_observability::LogLevel;

use commands::{ConfigArgs, RequestArgs, RoutesArgs};

/// Vitrine CLI - Exercise the products API from the command line
#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the request log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a request through the router
    Request(RequestArgs),

    /// List configured routes
    Routes(RoutesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let mut ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Some(level) = cli.log_level {
        ctx.config.logging.level = level;
    }

    let result = match cli.command {
        Commands::Request(args) => commands::request::run(args, &ctx),
        Commands::Routes(args) => commands::routes::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn parse_log_level(s: &str) -> std::result::Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{}'", s))
}
