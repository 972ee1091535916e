//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the autocomplete service: server binding,
//! dataset location, search behavior, and logging, loaded from a TOML file
//! with environment variable overrides and validation.
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (applied by the binaries)
//! 2. Environment variables (`PLACE_SUGGEST_*`)
//! 3. Configuration file
//! 4. Default values

use crate::errors::{Result, SuggestError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server and API configuration
    pub server: ServerConfig,
    /// Dataset location
    pub dataset: DatasetConfig,
    /// Query behavior
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
    /// Enable permissive CORS
    pub enable_cors: bool,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the TSV dataset loaded at startup
    pub path: PathBuf,
}

/// Query behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result limit applied when the caller does not pass one
    pub default_limit: usize,
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

    /// Load configuration from a specific file. A missing file falls back
    /// to defaults; a present but invalid file is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| SuggestError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| SuggestError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("PLACE_SUGGEST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PLACE_SUGGEST_PORT") {
            self.server.port = port.parse().map_err(|_| SuggestError::Config {
                message: "Invalid port number in PLACE_SUGGEST_PORT".to_string(),
            })?;
        }
        if let Ok(data_path) = std::env::var("PLACE_SUGGEST_DATA_PATH") {
            self.dataset.path = PathBuf::from(data_path);
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SuggestError::Config {
                message: "server.port cannot be zero".to_string(),
            });
        }

        if self.server.workers == 0 {
            return Err(SuggestError::Config {
                message: "server.workers must be at least one".to_string(),
            });
        }

        if self.search.default_limit == 0 {
            return Err(SuggestError::Config {
                message: "search.default_limit must be at least one".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: num_cpus::get(),
                enable_cors: true,
            },
            dataset: DatasetConfig {
                path: PathBuf::from("data/cities_canada-usa.tsv"),
            },
            search: SearchConfig { default_limit: 10 },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}
