use crate::domain::{CalculationRecord, Session};
use serde::Serialize;
use std::fs;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file format - {0}")]
    Format(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of an exported tape.
#[derive(Debug, Serialize)]
struct TapeRow<'a> {
    index: usize,
    expression: &'a str,
    result: &'a str,
}

pub struct FileRepository;

impl FileRepository {
    pub fn save_session(session: &Session, filename: &str) -> Result<String, PersistenceError> {
        let json = serde_json::to_string_pretty(session)?;
        fs::write(filename, json)?;
        info!(filename, records = session.tape.len(), "session saved");
        Ok(filename.to_string())
    }

    pub fn load_session(filename: &str) -> Result<(Session, String), PersistenceError> {
        let content = fs::read_to_string(filename)?;
        let session: Session = serde_json::from_str(&content)?;
        info!(filename, records = session.tape.len(), "session loaded");
        Ok((session, filename.to_string()))
    }

    /// Writes the tape as CSV with an `index,expression,result` header.
    /// Indices start at 1.
    pub fn export_tape_csv(tape: &[CalculationRecord], filename: &str) -> Result<String, PersistenceError> {
        let mut writer = csv::Writer::from_path(filename)?;
        for (i, record) in tape.iter().enumerate() {
            writer.serialize(TapeRow {
                index: i + 1,
                expression: &record.expression,
                result: record.outcome.as_str(),
            })?;
        }
        writer.flush()?;
        info!(filename, records = tape.len(), "tape exported");
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EvaluationOutcome;
    use tempfile::tempdir;

    fn sample_session() -> Session {
        Session {
            previous_result: Some("8.00".to_string()),
            tape: vec![
                CalculationRecord {
                    expression: "5+3".to_string(),
                    outcome: EvaluationOutcome::Success("8.00".to_string()),
                },
                CalculationRecord {
                    expression: "8.00/0".to_string(),
                    outcome: EvaluationOutcome::Error,
                },
            ],
        }
    }

    #[test]
    fn test_save_and_load_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.tcalc");
        let filename = path.to_str().unwrap();

        let session = sample_session();
        assert_eq!(FileRepository::save_session(&session, filename).unwrap(), filename);

        let (loaded, loaded_name) = FileRepository::load_session(filename).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded_name, filename);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.tcalc");
        let result = FileRepository::load_session(path.to_str().unwrap());
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.tcalc");
        fs::write(&path, "not json").unwrap();

        let err = FileRepository::load_session(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PersistenceError::Format(_)));
        assert!(err.to_string().starts_with("Invalid file format"));
    }

    #[test]
    fn test_export_tape_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tape.csv");
        let filename = path.to_str().unwrap();

        FileRepository::export_tape_csv(&sample_session().tape, filename).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "index,expression,result\n1,5+3,8.00\n2,8.00/0,Error\n"
        );
    }

    #[test]
    fn test_export_empty_tape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        FileRepository::export_tape_csv(&[], path.to_str().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
