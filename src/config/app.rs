//! Main application configuration
//!
//! This module defines the primary configuration structures for the game-hunt
//! featured ranking service, including environment variable and TOML file
//! loading and validation.

use crate::config::catalog::CatalogSettings;
use crate::config::ranking::RankingSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub ranking: RankingSettings,
    pub catalog: CatalogSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host the HTTP server binds to
    pub http_host: String,
    /// Port for the HTTP API, health and metrics endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "game-hunt".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

/// Parse an environment variable into `target` if it is set
fn override_from_env<T: FromStr>(key: &str, target: &mut T) -> Result<()> {
    if let Ok(raw) = env::var(key) {
        *target = raw
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, raw))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still win
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse TOML; missing sections and keys use defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        override_from_env("SERVICE_NAME", &mut self.service.name)?;
        override_from_env("LOG_LEVEL", &mut self.service.log_level)?;
        override_from_env("HTTP_HOST", &mut self.service.http_host)?;
        override_from_env("HTTP_PORT", &mut self.service.http_port)?;
        override_from_env(
            "SHUTDOWN_TIMEOUT_SECONDS",
            &mut self.service.shutdown_timeout_seconds,
        )?;

        // Ranking settings
        override_from_env("FEATURED_DEFAULT_LIMIT", &mut self.ranking.default_limit)?;
        override_from_env("FEATURED_MAX_LIMIT", &mut self.ranking.max_limit)?;
        override_from_env("WEIGHT_UPVOTES", &mut self.ranking.weights.upvotes)?;
        override_from_env("WEIGHT_COMMENTS", &mut self.ranking.weights.comments)?;
        override_from_env("WEIGHT_RATING", &mut self.ranking.weights.rating)?;
        override_from_env("WEIGHT_RECENCY", &mut self.ranking.weights.recency)?;
        override_from_env(
            "WEIGHT_EDITORIAL_BOOST",
            &mut self.ranking.weights.editorial_boost,
        )?;

        // Catalog settings
        if let Ok(seed_file) = env::var("CATALOG_SEED_FILE") {
            self.catalog.seed_file = Some(seed_file.into());
        }
        override_from_env("CATALOG_MAX_GAMES", &mut self.catalog.max_games)?;

        Ok(())
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Address the HTTP server binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http_host, self.service.http_port)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }
    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate ranking settings
    if config.ranking.max_limit == 0 {
        return Err(anyhow!("Featured max limit must be greater than 0"));
    }
    if config.ranking.default_limit > config.ranking.max_limit {
        return Err(anyhow!(
            "Featured default limit {} exceeds max limit {}",
            config.ranking.default_limit,
            config.ranking.max_limit
        ));
    }
    config.ranking.weights.validate()?;

    // Validate catalog settings
    if config.catalog.max_games == 0 {
        return Err(anyhow!("Catalog max games must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.http_addr(), "0.0.0.0:8080");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            http_port = 9000

            [ranking]
            default_limit = 5

            [ranking.weights]
            upvotes = 0.4
            comments = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.service.http_port, 9000);
        assert_eq!(config.service.name, "game-hunt");
        assert_eq!(config.ranking.default_limit, 5);
        assert_eq!(config.ranking.max_limit, 100);
        assert_eq!(config.ranking.weights.upvotes, 0.4);
        assert_eq!(config.ranking.weights.rating, 0.25);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_catalog_seed_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [catalog]
            seed_file = "data/games.json"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.catalog.seed_file.as_deref(),
            Some(Path::new("data/games.json"))
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.service.http_port = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.ranking.default_limit = 200;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.ranking.weights.recency = 0.5;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.catalog.max_games = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(AppConfig::from_file("/nonexistent/game-hunt.toml").is_err());
    }
}
