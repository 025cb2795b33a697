//! Configuration management for pdfbatch
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. `.env` file (via dotenvy)
//! 4. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use pdfbatch::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Downloading into: {}", config.output.dir.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PDFBATCH__<section>__<key>`
//!
//! Examples:
//! - `PDFBATCH__POOL__WORKERS=50`
//! - `PDFBATCH__FETCH__TIMEOUT=90s`
//! - `PDFBATCH__SOURCE__PATH=data/directorio.csv`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/pdfbatch.toml`.
//! This can be overridden using the `PDFBATCH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{Config, FetchConfig, OutputConfig, PoolConfig, SourceConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`PDFBATCH__*`)
    /// 2. TOML file (default: `config/pdfbatch.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Check an already-built configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)?;
        Ok(())
    }
}
