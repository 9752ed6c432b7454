//! Configuration loading and resolution.

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_ROUTE: &str = "/prefetch";
pub const HEALTH_ROUTE: &str = "/health";

pub const ADDR_ENV: &str = "PREFETCH_PROBE_ADDR";
pub const ROUTE_ENV: &str = "PREFETCH_PROBE_ROUTE";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve each setting from the explicit value, then the environment,
    /// then the built-in default.
    pub fn resolve(addr: Option<&str>, route: Option<&str>) -> ServerResult<Self> {
        let config = Self {
            addr: resolve_listen_addr(addr),
            route: resolve_route(route),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if !self.route.starts_with('/') {
            return Err(ServerError::Config(format!(
                "route must start with '/': {}",
                self.route
            )));
        }
        if self.route == HEALTH_ROUTE {
            return Err(ServerError::Config(format!(
                "route {HEALTH_ROUTE} is reserved for the health check"
            )));
        }
        Ok(())
    }
}

/// Resolve the listen address.
pub fn resolve_listen_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    if let Ok(env_addr) = std::env::var(ADDR_ENV) {
        return env_addr;
    }

    DEFAULT_ADDR.to_string()
}

/// Resolve the route the probe is mounted at. Its path also scopes stash keys.
pub fn resolve_route(explicit: Option<&str>) -> String {
    if let Some(route) = explicit {
        return route.to_string();
    }

    if let Ok(env_route) = std::env::var(ROUTE_ENV) {
        return env_route;
    }

    DEFAULT_ROUTE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = ServerConfig::resolve(Some("0.0.0.0:9999"), Some("/probe")).unwrap();
        assert_eq!(config.addr, "0.0.0.0:9999");
        assert_eq!(config.route, "/probe");
    }

    #[test]
    fn test_relative_route_rejected() {
        let err = ServerConfig::resolve(Some(DEFAULT_ADDR), Some("prefetch")).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_health_route_reserved() {
        assert!(ServerConfig::resolve(Some(DEFAULT_ADDR), Some("/health")).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }
}
