//! Increase Log Port - append-only record of limit-increase decisions.
//!
//! Every `request_increase` call appends exactly one entry, approved or
//! rejected. Entries are never mutated or deleted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::credit::DecisionStatus;

/// One limit-increase decision, as it is logged.
#[derive(Debug, Clone, PartialEq)]
pub struct IncreaseRequest {
    /// Digits-only CPF of the requesting client.
    pub cpf: String,
    pub requested_at: DateTime<Utc>,
    pub limite_atual: f64,
    pub novo_limite: f64,
    pub status: DecisionStatus,
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to write increase-request log: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize increase-request entry: {0}")]
    Serialize(String),
}

/// Port for the append-only increase-request log.
pub trait IncreaseLog: Send + Sync {
    /// Appends one entry. Never rewrites existing rows.
    fn append(&self, entry: &IncreaseRequest) -> Result<(), LogError>;
}
