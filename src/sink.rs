//! Flat-file record sink.
//!
//! One JSON document per parameter combination, named by the
//! combination's derived record name, under the configured output
//! directory. Each write is its own unit: a failed run leaves records
//! already written on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;
use crate::record::ColumnRecord;

pub struct RecordSink {
    out_dir: PathBuf,
}

impl RecordSink {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Persist one finalized record, returning the path written.
    pub fn store(&self, name: &str, record: &ColumnRecord) -> Result<PathBuf, ScrapeError> {
        let persistence = |source: io::Error| ScrapeError::Persistence {
            name: name.to_string(),
            source,
        };

        fs::create_dir_all(&self.out_dir).map_err(persistence)?;

        let path = self.out_dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(record)
            .map_err(io::Error::from)
            .map_err(persistence)?;
        fs::write(&path, json).map_err(persistence)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Cell;

    fn sample_record() -> ColumnRecord {
        let mut record = ColumnRecord::new();
        record.fold_rows(&[vec![
            Cell::Player {
                profile: Some("/players/123".to_string()),
                name: "J. Doe".to_string(),
            },
            Cell::Plain {
                key: "GP".to_string(),
                value: "10".to_string(),
            },
        ]]);
        record
    }

    #[test]
    fn test_store_writes_named_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordSink::new(dir.path());

        let path = sink.store("REG_GOAL_2020", &sample_record()).unwrap();

        assert_eq!(path, dir.path().join("REG_GOAL_2020.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["Profile"], serde_json::json!(["/players/123"]));
        assert_eq!(json["Name"], serde_json::json!(["J. Doe"]));
        assert_eq!(json["GP"], serde_json::json!(["10"]));
    }

    #[test]
    fn test_store_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("records");
        let sink = RecordSink::new(&nested);

        sink.store("REG_GOAL_2020", &sample_record()).unwrap();
        assert!(nested.join("REG_GOAL_2020.json").exists());
    }

    #[test]
    fn test_unwritable_destination_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be.
        let blocked = dir.path().join("out");
        std::fs::write(&blocked, b"not a directory").unwrap();
        let sink = RecordSink::new(&blocked);

        let err = sink.store("REG_GOAL_2020", &sample_record()).unwrap_err();
        assert!(matches!(err, ScrapeError::Persistence { .. }));
    }

    #[test]
    fn test_store_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordSink::new(dir.path());

        let first = sink.store("a", &sample_record()).unwrap();
        let first_bytes = std::fs::read(&first).unwrap();
        let second = sink.store("a", &sample_record()).unwrap();
        let second_bytes = std::fs::read(&second).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }
}
