//! Data file configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::ValidationError;

/// Locations of the CSV files the bank reads and writes
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Client records (cpf, nome, data_nascimento, limite_atual, score)
    #[serde(default = "default_clients_csv")]
    pub clients_csv: PathBuf,

    /// Score-range to maximum-limit table
    #[serde(default = "default_score_table_csv")]
    pub score_table_csv: PathBuf,

    /// Append-only log of limit-increase requests
    #[serde(default = "default_requests_csv")]
    pub requests_csv: PathBuf,
}

impl DataConfig {
    /// Validate that the read-only inputs exist. The request log is
    /// created on first append, so it is not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !Path::new(&self.clients_csv).exists() {
            return Err(ValidationError::ClientsCsvMissing(
                self.clients_csv.display().to_string(),
            ));
        }
        if !Path::new(&self.score_table_csv).exists() {
            return Err(ValidationError::ScoreTableCsvMissing(
                self.score_table_csv.display().to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            clients_csv: default_clients_csv(),
            score_table_csv: default_score_table_csv(),
            requests_csv: default_requests_csv(),
        }
    }
}

fn default_clients_csv() -> PathBuf {
    PathBuf::from("data/clientes.csv")
}

fn default_score_table_csv() -> PathBuf {
    PathBuf::from("data/score_limite.csv")
}

fn default_requests_csv() -> PathBuf {
    PathBuf::from("data/solicitacoes_aumento_limite.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_data_dir() {
        let config = DataConfig::default();
        assert_eq!(config.clients_csv, PathBuf::from("data/clientes.csv"));
        assert_eq!(config.score_table_csv, PathBuf::from("data/score_limite.csv"));
        assert_eq!(config.requests_csv, PathBuf::from("data/solicitacoes_aumento_limite.csv"));
    }

    #[test]
    fn validation_fails_for_missing_clients_csv() {
        let config = DataConfig {
            clients_csv: PathBuf::from("/nonexistent/clientes.csv"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
