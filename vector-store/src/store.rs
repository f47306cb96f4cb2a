//! CSV-backed vector store.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{format_vector, parse_vector};
use crate::error::{Result, StoreError};
use crate::record::{Corpus, StoredRecord};

/// Append-only store of `(origin, scenario, vector)` rows in one CSV file.
#[derive(Debug, Clone)]
pub struct CsvVectorStore {
    path: PathBuf,
}

impl CsvVectorStore {
    /// Create a store backed by `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Append one row and flush it to disk.
    pub fn append(&self, origin_id: &str, scenario_text: &str, vector: &[f32]) -> Result<()> {
        let mut writer = self.open_writer()?;
        writer.write_record([origin_id, scenario_text, format_vector(vector).as_str()])?;
        writer.flush().map_err(|source| self.io_error(source))?;

        debug!("Appended embedding for {origin_id} ({} dims)", vector.len());
        Ok(())
    }

    /// Append one record.
    pub fn append_record(&self, record: &StoredRecord) -> Result<()> {
        self.append(&record.origin_id, &record.scenario_text, &record.vector)
    }

    /// Append records in order with a single open and flush.
    pub fn append_all(&self, records: &[StoredRecord]) -> Result<()> {
        let mut writer = self.open_writer()?;
        for record in records {
            writer.write_record([
                record.origin_id.as_str(),
                record.scenario_text.as_str(),
                format_vector(&record.vector).as_str(),
            ])?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        debug!("Appended {} embeddings to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Read every row in file order.
    ///
    /// Fails with [`StoreError::EmptyCorpus`] when the file has no rows.
    pub fn load_all(&self) -> Result<Corpus> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            let row_number = i + 1;

            // An unquoted vector spills into extra columns.
            if row.len() != 3 {
                return Err(StoreError::ColumnCount {
                    row: row_number,
                    found: row.len(),
                });
            }

            let vector = parse_vector(&row[2], row_number)?;
            records.push(StoredRecord::new(&row[0], &row[1], vector));
        }

        if records.is_empty() {
            return Err(StoreError::EmptyCorpus {
                path: self.path.clone(),
            });
        }

        info!(
            "Loaded {} embeddings from {}",
            records.len(),
            self.path.display()
        );
        Ok(Corpus::new(records))
    }

    /// Remove the backing file so the next append starts a fresh store.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed existing store {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn open_writer(&self) -> Result<csv::Writer<File>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        Ok(csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CsvVectorStore {
        CsvVectorStore::new(dir.path().join("embeddings.csv"))
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let vector = vec![0.012_345_67, -0.5, 1.0, 3.4e-9];

        store
            .append("login.feature", "Login succeeds: Given a user ", &vector)
            .unwrap();

        let corpus = store.load_all().unwrap();
        assert_eq!(corpus.len(), 1);
        let record = corpus.get(0).unwrap();
        assert_eq!(record.origin_id, "login.feature");
        assert_eq!(record.scenario_text, "Login succeeds: Given a user ");
        assert_eq!(record.vector, vector);
    }

    #[test]
    fn test_empty_vector_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.append("a.feature", "A: ", &[]).unwrap();
        store.append("b.feature", "B: ", &[1.0]).unwrap();

        let corpus = store.load_all().unwrap();
        assert_eq!(corpus.vectors(), vec![&[][..], &[1.0][..]]);
    }

    #[test]
    fn test_append_preserves_existing_rows() {
        let temp_dir = TempDir::new().unwrap();

        store_in(&temp_dir).append("a.feature", "A: ", &[1.0, 0.0]).unwrap();
        store_in(&temp_dir).append("b.feature", "B: ", &[0.0, 1.0]).unwrap();
        store_in(&temp_dir)
            .append_all(&[
                StoredRecord::new("c.feature", "C: ", vec![0.5, 0.5]),
                StoredRecord::new("d.feature", "D: ", vec![-1.0, 0.0]),
            ])
            .unwrap();

        let corpus = store_in(&temp_dir).load_all().unwrap();
        let origins: Vec<&str> = corpus.iter().map(|r| r.origin_id.as_str()).collect();
        assert_eq!(origins, vec!["a.feature", "b.feature", "c.feature", "d.feature"]);
    }

    #[test]
    fn test_text_with_delimiters_is_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let text = "Checkout: Given a cart with \"apples, pears\" When they pay ";

        store.append("shop.feature", text, &[0.25, 0.75]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            raw,
            "shop.feature,\"Checkout: Given a cart with \"\"apples, pears\"\" When they pay \",\"0.25,0.75\"\n"
        );

        let corpus = store.load_all().unwrap();
        assert_eq!(corpus.get(0).unwrap().scenario_text, text);
    }

    #[test]
    fn test_load_bracketed_rows() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(
            store.path(),
            "a.feature,A: ,\"[0.1,0.2]\"\nb.feature,B: ,[]\nc.feature,C: ,\"1, 2\"\n",
        )
        .unwrap();

        let corpus = store.load_all().unwrap();
        assert_eq!(
            corpus.vectors(),
            vec![&[0.1, 0.2][..], &[][..], &[1.0, 2.0][..]]
        );
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), "").unwrap();

        assert!(matches!(
            store.load_all(),
            Err(StoreError::EmptyCorpus { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            store_in(&temp_dir).load_all(),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn test_load_non_numeric_vector() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), "a.feature,A: ,\"1,2\"\nb.feature,B: ,\"1,two\"\n").unwrap();

        match store.load_all() {
            Err(StoreError::Parse { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_column() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), "a.feature,A: \n").unwrap();

        assert!(matches!(
            store.load_all(),
            Err(StoreError::ColumnCount { row: 1, found: 2 })
        ));
    }

    #[test]
    fn test_load_unquoted_vector_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(
            store.path(),
            "a.feature,A: ,\"[0.1,0.2]\"\nb.feature,B: ,[0.1,0.2,0.3]\n",
        )
        .unwrap();

        assert!(matches!(
            store.load_all(),
            Err(StoreError::ColumnCount { row: 2, found: 5 })
        ));
    }

    #[test]
    fn test_reset() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.reset().unwrap();
        store.append("a.feature", "A: ", &[1.0]).unwrap();
        assert!(store.exists());

        store.reset().unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvVectorStore::new(temp_dir.path().join("nested/dir/store.csv"));

        store.append("a.feature", "A: ", &[1.0]).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
