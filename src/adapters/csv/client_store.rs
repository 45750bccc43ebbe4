//! CSV-backed client store.
//!
//! Reads `clientes.csv` on every lookup so score updates made by other
//! parts of the process are visible immediately. `update_score` rewrites
//! the whole file through a temp file in the same directory and renames
//! it over the original, so a crash mid-write never corrupts the store.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::foundation::{normalize_cpf, normalize_date};
use crate::ports::{Client, ClientRepository, RepositoryError};

const CPF_COL: &str = "cpf";
const NAME_COL: &str = "nome";
const DOB_COL: &str = "data_nascimento";
const LIMIT_COL: &str = "limite_atual";
const SCORE_COL: &str = "score";
const SCORE_UPDATED_COL: &str = "score_updated_at";

pub struct CsvClientStore {
    path: PathBuf,
}

/// One raw row plus its position, used by the rewrite in `update_score`.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Appends a column, padding existing rows with empty cells.
    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }
}

impl CsvClientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_raw(&self) -> Result<RawTable, RepositoryError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|err| csv_error(&self.path, err))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|err| csv_error(&self.path, err))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        for required in [CPF_COL, NAME_COL, DOB_COL, LIMIT_COL] {
            if !headers.iter().any(|h| h == required) {
                return Err(RepositoryError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| csv_error(&self.path, err))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Short rows happen when trailing cells are omitted.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(RawTable { headers, rows })
    }

    fn clients(&self) -> Result<Vec<Client>, RepositoryError> {
        let table = self.read_raw()?;
        let cpf_idx = table.column(CPF_COL).expect("validated above");
        let name_idx = table.column(NAME_COL).expect("validated above");
        let dob_idx = table.column(DOB_COL).expect("validated above");
        let limit_idx = table.column(LIMIT_COL).expect("validated above");
        let score_idx = table.column(SCORE_COL);

        Ok(table
            .rows
            .iter()
            .map(|row| Client {
                cpf: normalize_cpf(&row[cpf_idx]),
                nome: row[name_idx].clone(),
                data_nascimento: normalize_date(&row[dob_idx]),
                limite_atual: row[limit_idx].replace(',', ".").parse().unwrap_or(0.0),
                score: score_idx.and_then(|i| parse_score(&row[i])),
            })
            .collect())
    }

    fn write_raw(&self, table: &RawTable) -> Result<(), RepositoryError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::NamedTempFile::new_in(dir)?;

        {
            let mut writer = csv::Writer::from_writer(&tmp);
            writer
                .write_record(&table.headers)
                .map_err(|err| csv_error(&self.path, err))?;
            for row in &table.rows {
                writer
                    .write_record(row)
                    .map_err(|err| csv_error(&self.path, err))?;
            }
            writer.flush()?;
        }

        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

fn parse_score(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().map(|v| v.round() as i64)
}

fn csv_error(path: &Path, err: csv::Error) -> RepositoryError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => RepositoryError::Io(io),
        other => RepositoryError::InvalidRecord(format!("{}: {other:?}", path.display())),
    }
}

impl ClientRepository for CsvClientStore {
    fn find_by_cpf_and_dob(
        &self,
        cpf: &str,
        dob: &str,
    ) -> Result<Option<Client>, RepositoryError> {
        let cpf = normalize_cpf(cpf);
        let dob = normalize_date(dob);
        if cpf.is_empty() || dob.is_empty() {
            return Ok(None);
        }
        Ok(self
            .clients()?
            .into_iter()
            .find(|c| c.cpf == cpf && c.data_nascimento == dob))
    }

    fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, RepositoryError> {
        let cpf = normalize_cpf(cpf);
        if cpf.is_empty() {
            return Ok(None);
        }
        Ok(self.clients()?.into_iter().find(|c| c.cpf == cpf))
    }

    fn update_score(&self, cpf: &str, score: i64) -> Result<bool, RepositoryError> {
        let cpf = normalize_cpf(cpf);
        if cpf.is_empty() {
            return Ok(false);
        }

        let mut table = self.read_raw()?;
        let cpf_idx = table.column(CPF_COL).expect("validated on read");
        let score_idx = table.ensure_column(SCORE_COL);
        let updated_idx = table.ensure_column(SCORE_UPDATED_COL);

        let mut found = false;
        for row in &mut table.rows {
            if normalize_cpf(&row[cpf_idx]) == cpf {
                row[score_idx] = score.to_string();
                row[updated_idx] = chrono::Utc::now().to_rfc3339();
                found = true;
            }
        }

        if !found {
            warn!(%cpf, "score update for unknown client");
            return Ok(false);
        }

        self.write_raw(&table)?;
        debug!(%cpf, score, "client score persisted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, CsvClientStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::write(&path, content).unwrap();
        (dir, CsvClientStore::new(path))
    }

    const BASIC: &str = "\
cpf,nome,data_nascimento,limite_atual,score
12345678901,Ana Souza,1985-07-07,2500.00,480
98765432100,Bruno Lima,07/03/1990,1000.00,
";

    mod lookups {
        use super::*;

        #[test]
        fn finds_by_cpf_and_dob_with_normalized_inputs() {
            let (_dir, store) = store_with(BASIC);

            let found = store
                .find_by_cpf_and_dob("123.456.789-01", "07/07/1985")
                .unwrap()
                .expect("client should match");

            assert_eq!(found.nome, "Ana Souza");
            assert_eq!(found.limite_atual, 2500.0);
            assert_eq!(found.score, Some(480));
        }

        #[test]
        fn stored_dates_are_normalized_too() {
            let (_dir, store) = store_with(BASIC);

            let found = store
                .find_by_cpf_and_dob("98765432100", "07/03/1990")
                .unwrap();

            assert!(found.is_some());
            assert_eq!(found.unwrap().score, None);
        }

        #[test]
        fn wrong_dob_does_not_match() {
            let (_dir, store) = store_with(BASIC);

            let found = store
                .find_by_cpf_and_dob("12345678901", "01/01/2000")
                .unwrap();

            assert!(found.is_none());
        }

        #[test]
        fn find_by_cpf_alone() {
            let (_dir, store) = store_with(BASIC);

            assert!(store.find_by_cpf("12345678901").unwrap().is_some());
            assert!(store.find_by_cpf("11111111111").unwrap().is_none());
        }

        #[test]
        fn empty_inputs_never_match() {
            let (_dir, store) = store_with(BASIC);

            assert!(store.find_by_cpf("").unwrap().is_none());
            assert!(store.find_by_cpf_and_dob("", "").unwrap().is_none());
        }
    }

    mod schema {
        use super::*;

        #[test]
        fn missing_required_column_is_an_error() {
            let (_dir, store) = store_with("cpf,nome,limite_atual\n12345678901,Ana,100\n");

            let err = store.find_by_cpf("12345678901").unwrap_err();
            assert!(matches!(err, RepositoryError::MissingColumn(col) if col == "data_nascimento"));
        }

        #[test]
        fn header_case_and_whitespace_are_tolerated() {
            let (_dir, store) = store_with(
                " CPF ,Nome, Data_Nascimento ,Limite_Atual\n12345678901,Ana,1985-07-07,100\n",
            );

            assert!(store.find_by_cpf("12345678901").unwrap().is_some());
        }

        #[test]
        fn score_column_is_optional() {
            let (_dir, store) =
                store_with("cpf,nome,data_nascimento,limite_atual\n12345678901,Ana,1985-07-07,100\n");

            let client = store.find_by_cpf("12345678901").unwrap().unwrap();
            assert_eq!(client.score, None);
        }
    }

    mod update_score {
        use super::*;

        #[test]
        fn persists_score_and_timestamp() {
            let (_dir, store) = store_with(BASIC);

            assert!(store.update_score("12345678901", 610).unwrap());

            let client = store.find_by_cpf("12345678901").unwrap().unwrap();
            assert_eq!(client.score, Some(610));
        }

        #[test]
        fn creates_score_columns_when_absent() {
            let (_dir, store) =
                store_with("cpf,nome,data_nascimento,limite_atual\n12345678901,Ana,1985-07-07,100\n");

            assert!(store.update_score("12345678901", 550).unwrap());

            let client = store.find_by_cpf("12345678901").unwrap().unwrap();
            assert_eq!(client.score, Some(550));
        }

        #[test]
        fn unknown_cpf_returns_false_and_leaves_file_untouched() {
            let (_dir, store) = store_with(BASIC);

            assert!(!store.update_score("11111111111", 999).unwrap());

            let unchanged = store.find_by_cpf("12345678901").unwrap().unwrap();
            assert_eq!(unchanged.score, Some(480));
        }

        #[test]
        fn other_rows_survive_the_rewrite() {
            let (_dir, store) = store_with(BASIC);

            store.update_score("12345678901", 610).unwrap();

            let other = store.find_by_cpf("98765432100").unwrap().unwrap();
            assert_eq!(other.nome, "Bruno Lima");
            assert_eq!(other.limite_atual, 1000.0);
        }
    }
}
