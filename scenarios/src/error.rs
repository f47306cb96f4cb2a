//! Error types for scenario extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Errors that can occur while reading feature documents.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Corpus directory does not exist or is not a directory.
    #[error("corpus directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A feature file or the directory listing could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
