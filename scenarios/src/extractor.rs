//! Directory-level scenario extraction.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::ScenarioUnit;
use crate::config::ExtractorConfig;
use crate::error::{Result, ScenarioError};
use crate::parser::parse_scenarios;

/// Scenario units found in a corpus directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedCorpus {
    /// Units in file-name order, then in document order.
    pub units: Vec<ScenarioUnit>,

    /// Number of regular files read.
    pub files_scanned: usize,
}

/// Extracts scenario units from feature documents.
#[derive(Debug, Clone, Default)]
pub struct ScenarioExtractor {
    config: ExtractorConfig,
}

impl ScenarioExtractor {
    /// Create an extractor with the given keyword configuration.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the keyword configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the scenarios of `dir/file_name`.
    ///
    /// Anything that is not a regular file (directories, symlinks, sockets)
    /// yields no units.
    pub fn extract_file(&self, dir: &Path, file_name: &str) -> Result<Vec<ScenarioUnit>> {
        Ok(self.extract_entry(dir, file_name)?.unwrap_or_default())
    }

    /// Like [`extract_file`](Self::extract_file), but `None` for a skipped
    /// non-regular entry, so callers can count the files actually read.
    pub fn extract_entry(
        &self,
        dir: &Path,
        file_name: &str,
    ) -> Result<Option<Vec<ScenarioUnit>>> {
        let path = dir.join(file_name);

        let metadata = fs::symlink_metadata(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.file_type().is_file() {
            warn!("Skipping non-regular entry: {}", path.display());
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let units: Vec<ScenarioUnit> = parse_scenarios(&content, &self.config)
            .into_iter()
            .map(|text| ScenarioUnit::new(file_name, text))
            .collect();

        debug!("Extracted {} scenarios from {file_name}", units.len());
        Ok(Some(units))
    }

    /// Names of the entries directly inside `dir`, sorted by file name.
    ///
    /// Names that are not valid UTF-8 cannot serve as origin identifiers and
    /// are skipped.
    pub fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Err(ScenarioError::DirectoryNotFound(dir.to_path_buf()));
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(dir, e))?;
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!(
                    "Skipping entry with a non UTF-8 name: {}",
                    entry.path().display()
                ),
            }
        }

        Ok(names)
    }

    /// Extract every scenario from the regular files directly inside `dir`.
    pub fn extract_dir(&self, dir: &Path) -> Result<ExtractedCorpus> {
        let mut corpus = ExtractedCorpus::default();

        for name in self.list_files(dir)? {
            if let Some(units) = self.extract_entry(dir, &name)? {
                corpus.files_scanned += 1;
                corpus.units.extend(units);
            }
        }

        info!(
            "Extracted {} scenarios from {} files in {}",
            corpus.units.len(),
            corpus.files_scanned,
            dir.display()
        );
        Ok(corpus)
    }
}

fn walk_error(dir: &Path, err: walkdir::Error) -> ScenarioError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(dir));
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop while listing directory"));
    ScenarioError::Io { path, source }
}
