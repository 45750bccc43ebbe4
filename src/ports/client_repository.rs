//! Client Repository Port - access to the client record store.
//!
//! The store is the only shared mutable resource in the system. Lookups
//! are reads; the interview flow's score update is a read-modify-write
//! that implementations must apply atomically per call.

use thiserror::Error;

/// A client record as seen by the domain.
///
/// Read-only to the core, except for the score field which the interview
/// flow updates through [`ClientRepository::update_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Digits-only CPF.
    pub cpf: String,
    pub nome: String,
    /// Birth date, ISO `YYYY-MM-DD`.
    pub data_nascimento: String,
    pub limite_atual: f64,
    /// Creditworthiness 0-1000; `None` when never scored.
    pub score: Option<i64>,
}

/// Errors surfaced by client-store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read client store: {0}")]
    Io(#[from] std::io::Error),

    #[error("client store schema is invalid: missing column '{0}'")]
    MissingColumn(String),

    #[error("client store record is malformed: {0}")]
    InvalidRecord(String),
}

/// Port for looking up and updating client records.
pub trait ClientRepository: Send + Sync {
    /// Finds the client matching both a normalized CPF and an ISO birth
    /// date. Used by authentication.
    fn find_by_cpf_and_dob(&self, cpf: &str, dob: &str)
        -> Result<Option<Client>, RepositoryError>;

    /// Finds a client by normalized CPF alone.
    fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, RepositoryError>;

    /// Persists a new score for the client, recording when it was set.
    ///
    /// Returns `Ok(false)` when no record matches the CPF. The write must
    /// be atomic: a crash mid-update may lose the new score but never
    /// corrupt the store.
    fn update_score(&self, cpf: &str, score: i64) -> Result<bool, RepositoryError>;
}
