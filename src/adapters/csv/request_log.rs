//! Append-only CSV log of limit-increase requests.
//!
//! Creates the file (and parent directory) with a header on first
//! append; after that, one row per decision. Rows are never rewritten.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::debug;

use crate::ports::{IncreaseLog, IncreaseRequest, LogError};

const HEADER: [&str; 5] = [
    "cpf_cliente",
    "data_hora_solicitacao",
    "limite_atual",
    "novo_limite_solicitado",
    "status_pedido",
];

pub struct CsvIncreaseLog {
    path: PathBuf,
}

impl CsvIncreaseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_file(&self) -> Result<(), LogError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(HEADER)
            .map_err(|err| LogError::Serialize(err.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

impl IncreaseLog for CsvIncreaseLog {
    fn append(&self, entry: &IncreaseRequest) -> Result<(), LogError> {
        self.ensure_file()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record([
                entry.cpf.as_str(),
                &entry.requested_at.to_rfc3339(),
                &format!("{:.2}", entry.limite_atual),
                &format!("{:.2}", entry.novo_limite),
                entry.status.as_str(),
            ])
            .map_err(|err| LogError::Serialize(err.to_string()))?;
        writer.flush()?;

        debug!(cpf = %entry.cpf, status = %entry.status, "increase request logged");
        Ok(())
    }
}
