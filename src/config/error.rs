//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Exchange base URL must be http(s)")]
    InvalidExchangeUrl,

    #[error("Clients CSV path does not exist: {0}")]
    ClientsCsvMissing(String),

    #[error("Score-limit CSV path does not exist: {0}")]
    ScoreTableCsvMissing(String),
}
