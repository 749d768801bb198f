//! CLI command implementations.

pub mod config;
pub mod request;
pub mod routes;

use clap::{Args, Subcommand};

/// Arguments for the request command.
#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method, or the path when the method is omitted.
    #[arg(value_name = "METHOD")]
    pub first: String,

    /// Request path, with an optional query string.
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Pretty-print the emitted payload.
    #[arg(short, long)]
    pub pretty: bool,
}

impl RequestArgs {
    /// Method and target, defaulting the method to `GET`.
    pub fn target(&self) -> (&str, &str) {
        match &self.path {
            Some(path) => (&self.first, path),
            None => ("GET", &self.first),
        }
    }
}

/// Arguments for the routes command.
#[derive(Args)]
pub struct RoutesArgs {}

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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
