//! Loader for the score-to-limit rules table.
//!
//! The table is read once at startup. Malformed rows are skipped with a
//! warning rather than failing the whole load; an overlap between ranges
//! is reported because row order then decides the outcome.

use std::path::Path;

use tracing::warn;

use crate::domain::credit::{ScoreLimitTable, ScoreRange};
use crate::ports::RepositoryError;

const REQUIRED_COLUMNS: [&str; 3] = ["min_score", "max_score", "max_allowed_limit"];

/// Loads `score_limite.csv` into a [`ScoreLimitTable`], preserving file
/// order.
pub fn load_score_limit_table(path: &Path) -> Result<ScoreLimitTable, RepositoryError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(map_csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(map_csv_error)?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(RepositoryError::MissingColumn(required.to_string()));
        }
    }

    let col = |name: &str| headers.iter().position(|h| h == name).expect("validated");
    let (min_idx, max_idx, limit_idx) = (
        col("min_score"),
        col("max_score"),
        col("max_allowed_limit"),
    );

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(map_csv_error)?;
        let parsed = (
            record.get(min_idx).and_then(|v| v.parse::<i64>().ok()),
            record.get(max_idx).and_then(|v| v.parse::<i64>().ok()),
            record.get(limit_idx).and_then(|v| v.parse::<f64>().ok()),
        );
        match parsed {
            (Some(min_score), Some(max_score), Some(max_allowed_limit)) => {
                rows.push(ScoreRange {
                    min_score,
                    max_score,
                    max_allowed_limit,
                });
            }
            _ => warn!(path = %path.display(), row = line + 2, "skipping malformed score-limit row"),
        }
    }

    let table = ScoreLimitTable::new(rows);
    if table.is_empty() {
        warn!(path = %path.display(), "score-limit table is empty");
    }
    if table.has_overlapping_rows() {
        warn!(path = %path.display(), "score-limit ranges overlap; first matching row wins");
    }
    Ok(table)
}

fn map_csv_error(err: csv::Error) -> RepositoryError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => RepositoryError::Io(io),
        other => RepositoryError::InvalidRecord(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("score_limite.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_rows_in_file_order() {
        let (_dir, path) = write_table(
            "min_score,max_score,max_allowed_limit\n0,299,1000\n300,599,5000\n600,1000,20000\n",
        );

        let table = load_score_limit_table(&path).unwrap();

        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.allowed_limit_for(480), 5000.0);
        assert_eq!(table.allowed_limit_for(1500), 0.0);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let (_dir, path) = write_table(
            "min_score,max_score,max_allowed_limit\n0,299,1000\nabc,def,ghi\n300,599,5000\n",
        );

        let table = load_score_limit_table(&path).unwrap();

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.allowed_limit_for(400), 5000.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_dir, path) = write_table("min_score,max_score\n0,299\n");

        let err = load_score_limit_table(&path).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingColumn(c) if c == "max_allowed_limit"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        assert!(matches!(
            load_score_limit_table(&path),
            Err(RepositoryError::Io(_))
        ));
    }
}
