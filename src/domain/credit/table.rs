//! Score-to-limit rules table.
//!
//! Maps a score range to the maximum credit limit a client in that range
//! may be granted. Row order matters: the first range covering a score
//! wins, and rows are not assumed sorted or non-overlapping.

use serde::Deserialize;

/// Outcome of a limit-increase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStatus {
    Aprovado,
    Rejeitado,
}

impl DecisionStatus {
    /// Lowercase tag used in the request log and user messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Aprovado => "aprovado",
            DecisionStatus::Rejeitado => "rejeitado",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the rules table: scores in `min_score..=max_score` allow
/// limits up to `max_allowed_limit`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreRange {
    pub min_score: i64,
    pub max_score: i64,
    pub max_allowed_limit: f64,
}

impl ScoreRange {
    pub fn covers(&self, score: i64) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

/// The full rules table, in file order.
#[derive(Debug, Clone, Default)]
pub struct ScoreLimitTable {
    rows: Vec<ScoreRange>,
}

impl ScoreLimitTable {
    pub fn new(rows: Vec<ScoreRange>) -> Self {
        Self { rows }
    }

    /// Maximum limit allowed for a score. First matching row wins; a
    /// score no row covers allows nothing.
    pub fn allowed_limit_for(&self, score: i64) -> f64 {
        self.rows
            .iter()
            .find(|r| r.covers(score))
            .map(|r| r.max_allowed_limit)
            .unwrap_or(0.0)
    }

    /// True when any two rows cover a common score. Behavior then depends
    /// on row order, which callers may want to surface at load time.
    pub fn has_overlapping_rows(&self) -> bool {
        self.rows.iter().enumerate().any(|(i, a)| {
            self.rows[i + 1..]
                .iter()
                .any(|b| a.min_score <= b.max_score && b.min_score <= a.max_score)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoreRange] {
        &self.rows
    }
}
