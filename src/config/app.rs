//! Main application configuration
//!
//! Configuration is loaded from a TOML file or from environment variables,
//! falling back to defaults for anything not set.

use crate::config::rating::RatingConfig;
use crate::error::RatingError;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "league-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", key, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Environment variables still override values from the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RatingError::ConfigurationError {
                message: format!("Failed to read {}: {}", path.display(), e),
            }
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid TOML configuration: {}", e),
            })?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(value) = env::var("RATING_ERC_SCALE") {
            self.rating.erc_scale = parse_f64("RATING_ERC_SCALE", &value)?;
        }
        if let Ok(value) = env::var("RATING_ERC_SENSITIVITY") {
            self.rating.erc_sensitivity = parse_f64("RATING_ERC_SENSITIVITY", &value)?;
        }
        if let Ok(value) = env::var("RATING_UPSET_SCALE") {
            self.rating.upset_scale = parse_f64("RATING_UPSET_SCALE", &value)?;
        }
        if let Ok(value) = env::var("RATING_UPSET_SENSITIVITY") {
            self.rating.upset_sensitivity = parse_f64("RATING_UPSET_SENSITIVITY", &value)?;
        }
        if let Ok(value) = env::var("RATING_HANDICAP_DIVISOR") {
            self.rating.handicap_divisor = parse_f64("RATING_HANDICAP_DIVISOR", &value)?;
        }
        if let Ok(value) = env::var("RATING_MAX_HANDICAP") {
            self.rating.max_handicap = parse_f64("RATING_MAX_HANDICAP", &value)?;
        }
        if let Ok(mode) = env::var("RATING_UPDATE_MODE") {
            self.rating.update_mode = mode
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_UPDATE_MODE value: {}", mode))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()
}
