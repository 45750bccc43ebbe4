//! Credit domain - limit inquiry and increase decisions.
//!
//! The decision rule is a score-range lookup against a table loaded at
//! startup; every request is appended to an immutable decision log.

mod service;
mod table;

pub use service::{CreditError, CreditService, CreditStanding, IncreaseDecision};
pub use table::{DecisionStatus, ScoreLimitTable, ScoreRange};
