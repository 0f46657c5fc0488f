//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the exam paper search engine: resource
//! locations, fuzzy-matching tolerance, persistence path, and logging, with
//! validation and type-safe access.
//!
//! ## Input/Output Specification
//! - **Input**: TOML configuration file, environment variables
//! - **Output**: Validated configuration structs with defaults
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! ## Usage
//! ```rust,no_run
//! use exam_paper_search::Config;
//!
//! let config = Config::from_file("config.toml").unwrap();
//! println!("Corpus: {:?}", config.data.corpus_path);
//! ```

use crate::errors::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data resource locations
    pub data: DataConfig,
    /// Search engine behavior
    pub search: SearchEngineConfig,
    /// Last-search persistence settings
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Locations of the bundled data resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Corpus JSON file (array of exam paper records)
    pub corpus_path: PathBuf,
    /// Department mapping JSON file (canonical departments + alias map)
    pub department_map_path: PathBuf,
    /// Fixed URL prefix every corpus URL begins with
    pub base_url_prefix: String,
}

/// Search engine behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEngineConfig {
    /// Fuzzy-match tolerance on a 0-to-1 distance scale, lower = stricter
    pub fuzzy_threshold: f64,
    /// Maximum number of results printed by the CLI (0 = unlimited)
    pub max_results: usize,
}

/// Last-search persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the embedded last-search database
    pub state_db_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| SearchError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| SearchError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(corpus) = std::env::var("PAPER_SEARCH_CORPUS_PATH") {
            self.data.corpus_path = PathBuf::from(corpus);
        }
        if let Ok(mapping) = std::env::var("PAPER_SEARCH_DEPARTMENT_MAP_PATH") {
            self.data.department_map_path = PathBuf::from(mapping);
        }
        if let Ok(prefix) = std::env::var("PAPER_SEARCH_BASE_URL_PREFIX") {
            self.data.base_url_prefix = prefix;
        }
        if let Ok(state) = std::env::var("PAPER_SEARCH_STATE_DB_PATH") {
            self.storage.state_db_path = PathBuf::from(state);
        }
        if let Ok(threshold) = std::env::var("PAPER_SEARCH_FUZZY_THRESHOLD") {
            self.search.fuzzy_threshold = threshold.parse().map_err(|_| SearchError::Config {
                message: "Invalid value in PAPER_SEARCH_FUZZY_THRESHOLD".to_string(),
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.data.base_url_prefix.is_empty() {
            return Err(SearchError::ValidationFailed {
                field: "data.base_url_prefix".to_string(),
                reason: "Base URL prefix cannot be empty".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.search.fuzzy_threshold) {
            return Err(SearchError::ValidationFailed {
                field: "search.fuzzy_threshold".to_string(),
                reason: format!(
                    "Threshold must be between 0.0 and 1.0, got {}",
                    self.search.fuzzy_threshold
                ),
            });
        }

        Ok(())
    }

    /// Get configuration as a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SearchError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                corpus_path: PathBuf::from("./data/search_corpus.json"),
                department_map_path: PathBuf::from("./data/department_mapping.json"),
                base_url_prefix: "http://10.18.24.75/peqp/".to_string(),
            },
            search: SearchEngineConfig {
                fuzzy_threshold: 0.3,
                max_results: 0,
            },
            storage: StorageConfig {
                state_db_path: PathBuf::from("./data/last_search.db"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.fuzzy_threshold, 0.3);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.search.fuzzy_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let mut config = Config::default();
        config.data.base_url_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config::default();
        let toml_text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.data.base_url_prefix, config.data.base_url_prefix);
        assert_eq!(parsed.search.fuzzy_threshold, config.search.fuzzy_threshold);
    }
}
