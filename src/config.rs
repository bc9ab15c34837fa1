//! Process configuration, resolved once at startup from the environment.

use crate::error::{LensError, Result};

/// Namespace the original deployment installs Argo Workflows into.
pub const DEFAULT_NAMESPACE: &str = "argo";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Kubernetes namespace queried for Workflow custom resources.
    pub namespace: String,
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Directory the visualization page is served from.
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            bind_address: "0.0.0.0:5000".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(namespace) = std::env::var("ARGO_NAMESPACE") {
            if namespace.is_empty() {
                return Err(LensError::Configuration(
                    "ARGO_NAMESPACE must not be empty".to_string(),
                ));
            }
            config.namespace = namespace;
        }

        if let Ok(bind_address) = std::env::var("ARGO_LENS_BIND_ADDRESS") {
            bind_address
                .parse::<std::net::SocketAddr>()
                .map_err(|e| LensError::Configuration(format!("Invalid bind address: {e}")))?;
            config.bind_address = bind_address;
        }

        if let Ok(static_dir) = std::env::var("ARGO_LENS_STATIC_DIR") {
            config.static_dir = static_dir;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.namespace, "argo");
        assert_eq!(config.bind_address, "0.0.0.0:5000");
        assert_eq!(config.static_dir, "static");
    }

    // env-var cases share one test so parallel tests never race on the
    // process environment
    #[test]
    fn test_env_overrides() {
        std::env::set_var("ARGO_NAMESPACE", "workflows");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.namespace, "workflows");
        std::env::remove_var("ARGO_NAMESPACE");

        std::env::set_var("ARGO_LENS_BIND_ADDRESS", "not-an-address");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(LensError::Configuration(_))));

        std::env::set_var("ARGO_LENS_BIND_ADDRESS", "127.0.0.1:8080");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        std::env::remove_var("ARGO_LENS_BIND_ADDRESS");
    }
}
