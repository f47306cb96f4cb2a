//! Results of index and query runs.

use std::path::{Path, PathBuf};

use scout_embeddings::rank_descending;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Outcome of an index run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Regular files read from the corpus directory.
    pub files_scanned: usize,

    /// Scenarios embedded and appended to the store.
    pub scenarios_indexed: usize,

    /// Store the rows were appended to.
    pub store_path: PathBuf,
}

/// Similarity of one stored scenario to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredScenario {
    /// Position of the record in the loaded store.
    pub index: usize,

    /// Feature file the scenario came from.
    pub origin_id: String,

    /// Flattened scenario text.
    pub scenario_text: String,

    /// Cosine similarity to the query, in `[-1, 1]`.
    pub similarity: f32,
}

/// Outcome of a query run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    /// The change description that was embedded.
    pub query: String,

    /// Threshold used to select matches.
    pub threshold: f32,

    /// Every stored scenario, in store order.
    pub scores: Vec<ScoredScenario>,

    /// Positions whose similarity is at least the threshold, in store order.
    pub matches: Vec<usize>,

    /// Highest scoring scenario.
    pub best: Option<ScoredScenario>,
}

impl QueryReport {
    /// Scenarios at or above the threshold, in store order.
    pub fn matched(&self) -> impl Iterator<Item = &ScoredScenario> {
        self.matches.iter().filter_map(|&i| self.scores.get(i))
    }

    /// Feature files with at least one match, first occurrence order.
    pub fn matched_origins(&self) -> Vec<&str> {
        let mut origins: Vec<&str> = Vec::new();
        for scored in self.matched() {
            if !origins.contains(&scored.origin_id.as_str()) {
                origins.push(&scored.origin_id);
            }
        }
        origins
    }

    /// The `k` highest scoring scenarios, best first.
    pub fn top(&self, k: usize) -> Vec<&ScoredScenario> {
        let similarities: Vec<f32> = self.scores.iter().map(|s| s.similarity).collect();
        rank_descending(&similarities)
            .into_iter()
            .take(k)
            .filter_map(|i| self.scores.get(i))
            .collect()
    }

    /// Pretty JSON for downstream tooling.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write every score as `index,origin,scenario,similarity,selected`.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["index", "origin", "scenario", "similarity", "selected"])?;
        for scored in &self.scores {
            let selected = self.matches.contains(&scored.index);
            writer.write_record([
                scored.index.to_string().as_str(),
                scored.origin_id.as_str(),
                scored.scenario_text.as_str(),
                scored.similarity.to_string().as_str(),
                if selected { "true" } else { "false" },
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;

        info!("Wrote {} results to {}", self.scores.len(), path.display());
        Ok(())
    }
}
