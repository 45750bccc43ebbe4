//! Service availability flags

use serde::Deserialize;

use crate::domain::triage::ServiceFlags;

/// Switches for the three routed services. Disabling one keeps the
/// conversation running with a polite unavailability answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_enabled")]
    pub credit: bool,

    #[serde(default = "default_enabled")]
    pub interview: bool,

    #[serde(default = "default_enabled")]
    pub exchange: bool,
}

impl ServicesConfig {
    pub fn flags(&self) -> ServiceFlags {
        ServiceFlags {
            credit: self.credit,
            interview: self.interview,
            exchange: self.exchange,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            credit: true,
            interview: true,
            exchange: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}
