//! Exchange-rate provider configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the apilayer exchangerates_data API
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// API key sent in the `apikey` header. Missing key means every
    /// quote fails with the neutral unavailable message.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Latest-rates endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ExchangeConfig {
    /// Get the HTTP timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate exchange configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidExchangeUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.apilayer.com/exchangerates_data/latest".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_apilayer_endpoint() {
        let config = ExchangeConfig::default();
        assert!(config.base_url.contains("apilayer.com/exchangerates_data"));
        assert_eq!(config.timeout(), Duration::from_secs(6));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn default_config_validates() {
        assert!(ExchangeConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = ExchangeConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_url_is_invalid() {
        let config = ExchangeConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
