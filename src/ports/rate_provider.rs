//! Rate Provider Port - black-box currency quotes.
//!
//! The provider is the only external network dependency. Whatever goes
//! wrong behind it (network, auth, malformed payload), the domain sees a
//! single neutral failure so the user is never shown provider internals.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A successful currency quote: 1 `base` = `rate` `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// ISO code, uppercase.
    pub base: String,
    /// ISO code, uppercase.
    pub target: String,
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Rate lookup failure. The display string is user-facing and neutral by
/// contract; implementations log the technical cause instead.
#[derive(Debug, Clone, Error)]
pub enum RateError {
    #[error("Serviço indisponível. Volte mais tarde.")]
    Unavailable,
}

/// Port for fetching an exchange rate for a currency pair.
pub trait RateProvider: Send + Sync {
    /// Fetches the current rate for the pair. Implementations uppercase
    /// both codes and bound the call with a timeout.
    fn get_rate(&self, base: &str, target: &str) -> Result<Quote, RateError>;
}
