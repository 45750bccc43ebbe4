//! apilayer exchangerates_data client.
//!
//! Blocking HTTP client for the latest-rates endpoint. Every failure
//! mode (missing key, network, HTTP status, payload shape) collapses to
//! [`RateError::Unavailable`]; the technical cause goes to the log only.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::ports::{Quote, RateError, RateProvider};

pub struct ApiLayerRateProvider {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiLayerRateProvider {
    pub fn new(config: &ExchangeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

/// Pulls the target rate out of the apilayer payload.
///
/// Expected shape is `{"rates": {"BRL": 5.2}, ...}`; a top-level numeric
/// `rate` field is accepted as a fallback. `success: false` payloads are
/// rejected regardless of the rest.
fn rate_from_payload(payload: &Value, target: &str) -> Option<f64> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        return None;
    }
    if let Some(rate) = payload
        .get("rates")
        .and_then(|rates| rates.get(target))
        .and_then(Value::as_f64)
    {
        return Some(rate);
    }
    payload.get("rate").and_then(Value::as_f64)
}

impl RateProvider for ApiLayerRateProvider {
    fn get_rate(&self, base: &str, target: &str) -> Result<Quote, RateError> {
        let base = base.to_uppercase();
        let target = target.to_uppercase();

        let Some(api_key) = self.api_key.as_deref() else {
            warn!("exchange API key not configured");
            return Err(RateError::Unavailable);
        };

        let response = self
            .http
            .get(&self.base_url)
            .header("apikey", api_key)
            .query(&[("base", base.as_str()), ("symbols", target.as_str())])
            .send()
            .map_err(|err| {
                warn!(%err, "exchange request failed");
                RateError::Unavailable
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "exchange API returned an error status");
            return Err(RateError::Unavailable);
        }

        let payload: Value = response.json().map_err(|err| {
            warn!(%err, "exchange API returned invalid JSON");
            RateError::Unavailable
        })?;

        let rate = rate_from_payload(&payload, &target).ok_or_else(|| {
            warn!(%base, %target, "rate missing from exchange payload");
            RateError::Unavailable
        })?;

        debug!(%base, %target, rate, "exchange rate fetched");
        Ok(Quote {
            base,
            target,
            rate,
            fetched_at: Utc::now(),
        })
    }
}
