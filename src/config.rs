//! Application configuration loaded from the environment
//!
//! A `.env` file is honoured through `dotenv` before any variable is read.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Bind address
    pub host: IpAddr,
    /// HTTP port
    pub port: u16,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Secret used to sign JWTs
    pub jwt_secret: String,
    /// Shared secret for admin-only poll and leave operations
    pub admin_secret: String,
    /// development | staging | production
    pub environment: String,
    /// Default quantity at or below which an asset counts as low stock
    pub low_stock_threshold: i32,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            host: parse_or("HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or("PORT", 3000)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: require_secret("JWT_SECRET", "dev-secret-key", &environment)?,
            admin_secret: require_secret("ADMIN_SECRET", "changeme", &environment)?,
            low_stock_threshold: parse_or("LOW_STOCK_THRESHOLD", 5)?,
            run_migrations: parse_or("RUN_MIGRATIONS", true)?,
            environment,
        })
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Development defaults for tests and local tooling
    pub fn for_development(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            max_connections: 5,
            jwt_secret: "dev-secret-key".to_string(),
            admin_secret: "changeme".to_string(),
            environment: "development".to_string(),
            low_stock_threshold: 5,
            run_migrations: false,
        }
    }
}

/// Secrets fall back to a development value only in development.
fn require_secret(
    name: &'static str,
    dev_default: &str,
    environment: &str,
) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ if environment == "development" => {
            tracing::warn!("{} not set, using development default", name);
            Ok(dev_default.to_string())
        }
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_secret_falls_back() {
        let secret = require_secret("MANAGEHUB_TEST_UNSET_SECRET", "fallback", "development");
        assert_eq!(secret.unwrap(), "fallback");
    }

    #[test]
    fn production_secret_is_required() {
        let result = require_secret("MANAGEHUB_TEST_UNSET_SECRET", "fallback", "production");
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("MANAGEHUB_TEST_UNSET_PORT", 4000).unwrap();
        assert_eq!(port, 4000);
    }

    #[test]
    fn development_config_binds_localhost() {
        let config = Config::for_development("postgres://localhost/managehub");
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.run_migrations);
    }
}
