//! Upstream endpoint configuration.
//!
//! Defaults point at the public echo service. `UPSTREAM_SCHEME`,
//! `UPSTREAM_HOSTNAME` and `UPSTREAM_PORT` override them, which is how tests
//! and local runs aim the service at the mock server.

use crate::error::ConfigError;
use crate::http::Scheme;

pub const DEFAULT_HOSTNAME: &str = "postman-echo.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub scheme: Scheme,
    pub hostname: String,
    pub port: Option<u16>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Https,
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: None,
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults; a
    /// blank scheme or port counts as unset, a blank hostname is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(scheme) = get("UPSTREAM_SCHEME") {
            config.scheme = match scheme.to_ascii_lowercase().as_str() {
                "https" => Scheme::Https,
                "http" => Scheme::Http,
                _ => return Err(ConfigError::Scheme(scheme)),
            };
        }

        if let Some(hostname) = lookup("UPSTREAM_HOSTNAME") {
            let hostname = hostname.trim();
            if hostname.is_empty() {
                return Err(ConfigError::EmptyHostname);
            }
            config.hostname = hostname.to_string();
        }

        if let Some(port) = get("UPSTREAM_PORT") {
            config.port = Some(port.parse().map_err(|_| ConfigError::Port(port))?);
        }

        Ok(config)
    }
}
