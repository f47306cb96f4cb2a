//! Error types for the scenario retrieval pipeline.

use std::path::PathBuf;

use scout_embeddings::EmbeddingError;
use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while indexing or querying.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Scenario extraction error.
    #[error("extraction error: {0}")]
    Scenario(#[from] scout_scenarios::ScenarioError),

    /// Embedding error outside of a specific record.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector store error.
    #[error("store error: {0}")]
    Store(#[from] scout_vector_store::StoreError),

    /// Embedding a scenario failed while indexing.
    #[error("failed to embed a scenario from {origin_id}: {source}")]
    Index {
        origin_id: String,
        #[source]
        source: EmbeddingError,
    },

    /// A stored vector cannot be compared with the query vector.
    #[error("stored record {index} ({origin_id}) is incompatible with the query: {source}")]
    Dimension {
        index: usize,
        origin_id: String,
        #[source]
        source: EmbeddingError,
    },

    /// Query text was empty after trimming.
    #[error("query text is empty")]
    EmptyQuery,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A config or query file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Results export failed.
    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
