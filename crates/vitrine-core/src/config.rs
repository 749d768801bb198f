//! Route configuration.

use serde::{Deserialize, Serialize};

use crate::context::Method;

/// Configuration for a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route pattern (e.g., "/products/:id").
    pub pattern: String,
    /// Controller action name (e.g., "products#list").
    pub action: String,
    /// HTTP methods this route accepts.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

impl RouteConfig {
    /// Create a new route configuration accepting `GET`.
    pub fn new(pattern: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: action.into(),
            methods: default_methods(),
        }
    }

    /// Set allowed HTTP methods.
    pub fn with_methods(mut self, methods: Vec<&str>) -> Self {
        self.methods = methods.into_iter().map(String::from).collect();
        self
    }

    /// Check whether the route accepts the given method.
    pub fn allows(&self, method: Method) -> bool {
        self.methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_config_defaults_to_get() {
        let route = RouteConfig::new("/products", "products#list");

        assert_eq!(route.methods, vec!["GET".to_string()]);
        assert!(route.allows(Method::Get));
        assert!(!route.allows(Method::Post));
    }

    #[test]
    fn test_route_config_with_methods() {
        let route =
            RouteConfig::new("/products", "products#list").with_methods(vec!["get", "HEAD"]);

        assert!(route.allows(Method::Get));
        assert!(route.allows(Method::Head));
        assert!(!route.allows(Method::Delete));
    }

    #[test]
    fn test_route_config_deserialize_default_methods() {
        let route: RouteConfig =
            serde_json::from_str(r#"{"pattern": "/products", "action": "products#list"}"#)
                .expect("valid route json");

        assert_eq!(route, RouteConfig::new("/products", "products#list"));
    }
}
