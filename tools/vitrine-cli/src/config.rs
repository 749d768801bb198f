//! CLI configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_catalog::Product;
use vitrine_controllers::{DispatchError, LogSettings, ProductsController, RoutePattern, Router};
use vitrine_core::{Method, RouteConfig};
use vitrine_observability::{LogFormat, LogLevel, LogOutput};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["vitrine.toml", ".vitrine.toml", "vitrine.json"];

/// Controller actions a route may point at.
const KNOWN_ACTIONS: [&str; 1] = [ProductsController::LIST_ACTION];

/// Errors loading, saving or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// CLI configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Application metadata.
    #[serde(default)]
    pub app: AppConfig,

    /// Request logging.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route table.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,

    /// Products to serve instead of the built-in catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<Product>>,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            logging: LoggingConfig::default(),
            routes: default_routes(),
            catalog: None,
        }
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig::new("/products", ProductsController::LIST_ACTION)]
}

/// Application metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name.
    #[serde(default = "default_app_name")]
    pub name: String,
}

fn default_app_name() -> String {
    "vitrine".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

/// Request logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Line format (json or human).
    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl VitrineConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;

        let parsed = if path.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_string(),
            message,
        })
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_string(),
            source,
        })
    }

    /// Collect every problem with this configuration.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.app.name.trim().is_empty() {
            issues.push("app.name is required".to_string());
        }

        if self.routes.is_empty() {
            issues.push("at least one route is required".to_string());
        }

        for (i, route) in self.routes.iter().enumerate() {
            if let Err(e) = RoutePattern::parse(&route.pattern) {
                issues.push(format!("routes[{}]: {}", i, e));
            }
            if !KNOWN_ACTIONS.contains(&route.action.as_str()) {
                issues.push(format!("routes[{}]: unknown action '{}'", i, route.action));
            }
            if route.methods.is_empty() {
                issues.push(format!("routes[{}]: at least one method is required", i));
            }
            for method in &route.methods {
                if Method::parse(method).is_none() {
                    issues.push(format!("routes[{}]: unsupported method '{}'", i, method));
                }
            }
        }

        if let Some(catalog) = &self.catalog {
            if catalog.is_empty() {
                issues.push("catalog must list at least one product".to_string());
            }
            for (i, product) in catalog.iter().enumerate() {
                if product.name.trim().is_empty() {
                    issues.push(format!("catalog[{}].name is required", i));
                }
            }
        }

        issues
    }

    /// Fail with every problem found, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Products controller serving the configured catalog.
    pub fn controller(&self) -> ProductsController {
        match &self.catalog {
            Some(products) => ProductsController::with_catalog(products.clone()),
            None => ProductsController::new(),
        }
    }

    /// Logging settings for dispatched requests.
    pub fn log_settings(&self, verbose: bool) -> LogSettings {
        LogSettings {
            min_level: if verbose {
                LogLevel::Debug
            } else {
                self.logging.level
            },
            format: self.logging.format,
            output: LogOutput::Stderr,
        }
    }

    /// Build the router for this configuration.
    pub fn router(&self, verbose: bool) -> Result<Router, DispatchError> {
        Ok(Router::for_products(self.controller(), &self.routes)?
            .with_logging(self.log_settings(verbose)))
    }
}

/// Generate a default vitrine.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Vitrine configuration

[app]
name = "{name}"

[logging]
level = "info"
format = "human"

[[routes]]
pattern = "/products"
action = "products#list"
methods = ["GET"]

# Uncomment to serve your own products instead of the built-in catalog.
# [[catalog]]
# name = "Default product"
# description = "product description"
# price = 100
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VitrineConfig::default();

        assert_eq!(config.app.name, "vitrine");
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.routes, default_routes());
        assert!(config.catalog.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_matches_default() {
        let config: VitrineConfig =
            toml::from_str(&generate_default_config("vitrine")).expect("valid toml");

        assert_eq!(config, VitrineConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: VitrineConfig = toml::from_str("").expect("valid toml");
        assert_eq!(config, VitrineConfig::default());
    }

    #[test]
    fn test_parse_catalog_and_routes() {
        let config: VitrineConfig = toml::from_str(
            r#"
[app]
name = "shop"

[logging]
level = "debug"
format = "json"

[[routes]]
pattern = "/api/products"
action = "products#list"

[[catalog]]
name = "Mug"
description = "Ceramic mug"
price = 12
"#,
        )
        .expect("valid toml");

        assert_eq!(config.app.name, "shop");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.routes[0].pattern, "/api/products");
        assert_eq!(config.routes[0].methods, vec!["GET".to_string()]);
        assert_eq!(
            config.catalog,
            Some(vec![Product::new("Mug", "Ceramic mug", 12)])
        );
        assert!(config.validate().is_ok());
        assert_eq!(
            config.controller().catalog(),
            &[Product::new("Mug", "Ceramic mug", 12)]
        );
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let config: VitrineConfig = toml::from_str("catalog = []").expect("valid toml");

        let issues = config.issues();
        assert_eq!(issues, vec!["catalog must list at least one product".to_string()]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_route_issues_are_reported() {
        let config = VitrineConfig {
            routes: vec![
                RouteConfig::new("products", "products#list"),
                RouteConfig::new("/orders", "orders#list").with_methods(vec!["FETCH"]),
            ],
            ..VitrineConfig::default()
        };

        let issues = config.issues();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].starts_with("routes[0]: Invalid route pattern"));
        assert_eq!(issues[1], "routes[1]: unknown action 'orders#list'");
        assert_eq!(issues[2], "routes[1]: unsupported method 'FETCH'");
    }

    #[test]
    fn test_invalid_display_joins_issues() {
        let err = ConfigError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid configuration: a; b");
    }

    #[test]
    fn test_verbose_lowers_log_level() {
        let config = VitrineConfig::default();

        assert_eq!(config.log_settings(false).min_level, LogLevel::Info);
        assert_eq!(config.log_settings(true).min_level, LogLevel::Debug);
    }

    #[test]
    fn test_router_uses_configured_routes() {
        let router = VitrineConfig::default().router(false).expect("valid routes");
        let patterns: Vec<&str> = router.routes().map(|r| r.pattern.as_str()).collect();

        assert_eq!(patterns, vec!["/products"]);
    }

    #[test]
    fn test_save_and_load_json() {
        let path = std::env::temp_dir().join(format!("vitrine-config-{}.json", std::process::id()));
        let path = path.to_str().expect("utf-8 temp path").to_string();
        let config = VitrineConfig {
            catalog: Some(vec![Product::new("Mug", "Ceramic mug", 12)]),
            ..VitrineConfig::default()
        };

        config.save(&path).expect("writable temp dir");
        let loaded = VitrineConfig::load(&path).expect("readable config");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = VitrineConfig::load("/nonexistent/vitrine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
