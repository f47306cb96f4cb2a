//! Error types for the vector store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while writing or loading the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be opened, written or removed.
    #[error("store io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer failed to read or write a row.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A vector component is not a number.
    #[error("row {row}: invalid vector component {value:?}: {source}")]
    Parse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A row does not have exactly three columns.
    #[error("row {row}: expected 3 columns, found {found}")]
    ColumnCount { row: usize, found: usize },

    /// The store holds no rows to rank against.
    #[error("no embeddings found in {}", path.display())]
    EmptyCorpus { path: PathBuf },
}
