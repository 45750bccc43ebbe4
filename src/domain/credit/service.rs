//! Credit Service - limit inquiry and increase decisions.
//!
//! Stateless between calls: every operation re-reads the client store so
//! a score updated by the interview flow is visible to the next decision.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ports::{ClientRepository, IncreaseLog, IncreaseRequest, LogError, RepositoryError};

use super::table::{DecisionStatus, ScoreLimitTable};

/// Current limit and score for a client, as returned by an inquiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditStanding {
    pub cpf: String,
    pub nome: String,
    pub limite_atual: f64,
    pub score: Option<i64>,
}

/// Result of a limit-increase request.
#[derive(Debug, Clone, PartialEq)]
pub struct IncreaseDecision {
    pub status: DecisionStatus,
    /// Human-readable justification shown to the user.
    pub reason: String,
    pub limite_atual: f64,
    pub novo_limite: f64,
    /// Score the decision was made against (stored or derived).
    pub score: i64,
    pub allowed_limit: f64,
}

impl IncreaseDecision {
    pub fn approved(&self) -> bool {
        self.status == DecisionStatus::Aprovado
    }
}

#[derive(Debug, Error)]
pub enum CreditError {
    #[error("client not found")]
    ClientNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Log(#[from] LogError),
}

/// Deterministic score for clients with no score on file: 300 plus the
/// digit-sum of the CPF (mod 551). Eleven digits sum to at most 99, so
/// the result stays within 300..=399.
fn fallback_score(cpf: &str) -> i64 {
    let digit_sum: i64 = cpf
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .sum();
    300 + digit_sum % 551
}

/// Encapsulates credit-domain operations: limit inquiry and increase
/// requests with an append-only decision log.
pub struct CreditService {
    clients: Arc<dyn ClientRepository>,
    table: ScoreLimitTable,
    log: Arc<dyn IncreaseLog>,
}

impl CreditService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        table: ScoreLimitTable,
        log: Arc<dyn IncreaseLog>,
    ) -> Self {
        if table.is_empty() {
            warn!("score-limit table is empty; every increase request will be rejected");
        }
        Self { clients, table, log }
    }

    /// Looks up the client's current limit and score.
    pub fn inquire(&self, cpf: &str) -> Result<CreditStanding, CreditError> {
        let client = self
            .clients
            .find_by_cpf(cpf)?
            .ok_or(CreditError::ClientNotFound)?;

        Ok(CreditStanding {
            cpf: client.cpf,
            nome: client.nome,
            limite_atual: client.limite_atual,
            score: client.score,
        })
    }

    /// Evaluates a requested new limit against the score rules table and
    /// logs the decision, approved or not.
    pub fn request_increase(
        &self,
        cpf: &str,
        novo_limite: f64,
    ) -> Result<IncreaseDecision, CreditError> {
        let client = self
            .clients
            .find_by_cpf(cpf)?
            .ok_or(CreditError::ClientNotFound)?;

        let score = client.score.unwrap_or_else(|| fallback_score(&client.cpf));
        let allowed = self.table.allowed_limit_for(score);

        let (status, reason) = if novo_limite <= allowed {
            (
                DecisionStatus::Aprovado,
                format!(
                    "Score {score} suficiente para o limite solicitado (permitido até {allowed:.2})."
                ),
            )
        } else {
            (
                DecisionStatus::Rejeitado,
                format!(
                    "Score {score} insuficiente para o limite solicitado (permitido até {allowed:.2})."
                ),
            )
        };

        debug!(cpf = %client.cpf, score, allowed, novo_limite, %status, "increase decision");

        self.log.append(&IncreaseRequest {
            cpf: client.cpf.clone(),
            requested_at: Utc::now(),
            limite_atual: client.limite_atual,
            novo_limite,
            status,
        })?;

        Ok(IncreaseDecision {
            status,
            reason,
            limite_atual: client.limite_atual,
            novo_limite,
            score,
            allowed_limit: allowed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credit::ScoreRange;
    use crate::ports::Client;
    use std::sync::Mutex;

    struct FakeClients {
        clients: Vec<Client>,
    }

    impl ClientRepository for FakeClients {
        fn find_by_cpf_and_dob(
            &self,
            cpf: &str,
            dob: &str,
        ) -> Result<Option<Client>, RepositoryError> {
            Ok(self
                .clients
                .iter()
                .find(|c| c.cpf == cpf && c.data_nascimento == dob)
                .cloned())
        }

        fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, RepositoryError> {
            Ok(self.clients.iter().find(|c| c.cpf == cpf).cloned())
        }

        fn update_score(&self, _cpf: &str, _score: i64) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        entries: Mutex<Vec<IncreaseRequest>>,
    }

    impl IncreaseLog for RecordingLog {
        fn append(&self, entry: &IncreaseRequest) -> Result<(), LogError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    fn client(cpf: &str, limite: f64, score: Option<i64>) -> Client {
        Client {
            cpf: cpf.to_string(),
            nome: "Ana".to_string(),
            data_nascimento: "1985-07-07".to_string(),
            limite_atual: limite,
            score,
        }
    }

    fn service_with(
        clients: Vec<Client>,
        log: Arc<RecordingLog>,
    ) -> CreditService {
        let table = ScoreLimitTable::new(vec![
            ScoreRange { min_score: 0, max_score: 299, max_allowed_limit: 1000.0 },
            ScoreRange { min_score: 300, max_score: 599, max_allowed_limit: 5000.0 },
            ScoreRange { min_score: 600, max_score: 1000, max_allowed_limit: 20000.0 },
        ]);
        CreditService::new(Arc::new(FakeClients { clients }), table, log)
    }

    mod inquire {
        use super::*;

        #[test]
        fn returns_standing_for_known_client() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 2500.0, Some(480))], log);

            let standing = svc.inquire("12345678901").unwrap();

            assert_eq!(standing.limite_atual, 2500.0);
            assert_eq!(standing.score, Some(480));
            assert_eq!(standing.nome, "Ana");
        }

        #[test]
        fn unknown_client_is_not_found() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![], log);

            assert!(matches!(
                svc.inquire("99999999999"),
                Err(CreditError::ClientNotFound)
            ));
        }

        #[test]
        fn inquiry_is_idempotent() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 2500.0, Some(480))], log.clone());

            let first = svc.inquire("12345678901").unwrap();
            let second = svc.inquire("12345678901").unwrap();

            assert_eq!(first.limite_atual, second.limite_atual);
            assert!(log.entries.lock().unwrap().is_empty());
        }
    }

    mod request_increase {
        use super::*;

        #[test]
        fn approves_when_within_allowed_limit() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 2500.0, Some(480))], log);

            let decision = svc.request_increase("12345678901", 4000.0).unwrap();

            assert!(decision.approved());
            assert_eq!(decision.allowed_limit, 5000.0);
        }

        #[test]
        fn rejects_when_above_allowed_limit() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 2500.0, Some(480))], log);

            let decision = svc.request_increase("12345678901", 8000.0).unwrap();

            assert_eq!(decision.status, DecisionStatus::Rejeitado);
            assert!(decision.reason.contains("insuficiente"));
        }

        #[test]
        fn logs_exactly_one_entry_per_request() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 2500.0, Some(480))], log.clone());

            svc.request_increase("12345678901", 4000.0).unwrap();
            svc.request_increase("12345678901", 8000.0).unwrap();

            let entries = log.entries.lock().unwrap();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].status, DecisionStatus::Aprovado);
            assert_eq!(entries[1].status, DecisionStatus::Rejeitado);
        }

        #[test]
        fn derives_deterministic_score_when_missing() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![client("12345678901", 1000.0, None)], log);

            let first = svc.request_increase("12345678901", 100.0).unwrap();
            let second = svc.request_increase("12345678901", 100.0).unwrap();

            // digit sum of 12345678901 is 46 -> 300 + 46 = 346
            assert_eq!(first.score, 346);
            assert_eq!(second.score, 346);
        }

        #[test]
        fn unknown_client_is_not_found_and_not_logged() {
            let log = Arc::new(RecordingLog::default());
            let svc = service_with(vec![], log.clone());

            assert!(matches!(
                svc.request_increase("99999999999", 100.0),
                Err(CreditError::ClientNotFound)
            ));
            assert!(log.entries.lock().unwrap().is_empty());
        }
    }

    mod fallback_score_fn {
        use super::*;

        #[test]
        fn stays_in_expected_band() {
            // Digit-sum of 11 digits is at most 99.
            for cpf in ["00000000000", "99999999999", "12345678901"] {
                let s = fallback_score(cpf);
                assert!((300..=399).contains(&s), "score {s} out of band for {cpf}");
            }
        }
    }
}
