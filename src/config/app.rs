//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! service, including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use crate::types::MatchImportance;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub collection: CollectionSettings,
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

/// Match ingestion settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    /// Tier assumed for matches whose source does not report one
    pub default_importance: MatchImportance,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "esports-elo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        if let Ok(k_factor) = env::var("ELO_BASE_K_FACTOR") {
            config.rating.base_k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_BASE_K_FACTOR value: {}", k_factor))?;
        }
        if let Ok(days) = env::var("ELO_RATING_DECAY_DAYS") {
            config.rating.decay_threshold_days = days
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_RATING_DECAY_DAYS value: {}", days))?;
        }
        if let Ok(factor) = env::var("ELO_DECAY_FACTOR") {
            config.rating.decay_factor = factor
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_DECAY_FACTOR value: {}", factor))?;
        }

        if let Ok(importance) = env::var("DEFAULT_MATCH_IMPORTANCE") {
            config.collection.default_importance = MatchImportance::from(importance.as_str());
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
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

    config.rating.validate()?;

    Ok(())
}
