//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BANCO_AGIL_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use banco_agil::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading clients from {}", config.data.clients_csv.display());
//! ```

mod data;
mod error;
mod exchange;
mod services;

pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use exchange::ExchangeConfig;
pub use services::ServicesConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Banco Ágil assistant.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// CSV data file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Exchange-rate provider (apilayer)
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Service availability switches
    #[serde(default)]
    pub services: ServicesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BANCO_AGIL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BANCO_AGIL__EXCHANGE__API_KEY=...` -> `exchange.api_key = ...`
    /// - `BANCO_AGIL__DATA__CLIENTS_CSV=...` -> `data.clients_csv = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BANCO_AGIL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid
    /// or a required data file is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.exchange.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("BANCO_AGIL__EXCHANGE__API_KEY");
        env::remove_var("BANCO_AGIL__EXCHANGE__TIMEOUT_SECS");
        env::remove_var("BANCO_AGIL__DATA__CLIENTS_CSV");
        env::remove_var("BANCO_AGIL__SERVICES__INTERVIEW");
    }

    #[test]
    fn load_with_no_env_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.exchange.api_key.is_none());
        assert_eq!(config.exchange.timeout_secs, 6);
        assert!(config.services.interview);
    }

    #[test]
    fn nested_env_overrides_are_picked_up() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BANCO_AGIL__EXCHANGE__API_KEY", "k-123");
        env::set_var("BANCO_AGIL__EXCHANGE__TIMEOUT_SECS", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.exchange.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.exchange.timeout_secs, 10);
    }

    #[test]
    fn service_switch_can_be_disabled() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BANCO_AGIL__SERVICES__INTERVIEW", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.services.flags().interview);
    }
}
