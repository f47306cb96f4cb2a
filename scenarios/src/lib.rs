//! # Scenarios
//!
//! Turns a directory of Gherkin-style feature files into scenario units:
//! one flat line of text per scenario (its name followed by its steps),
//! tagged with the file it came from.
//!
//! Only line prefixes are inspected. Any other content ends the scenario
//! that was open.
//!
//! ```text
//! features/
//!   login.feature ──► ScenarioExtractor ──► [ScenarioUnit { origin_id, text }, ...]
//!   search.feature
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;

pub use config::ExtractorConfig;
pub use error::{Result, ScenarioError};
pub use extractor::{ExtractedCorpus, ScenarioExtractor};
pub use parser::parse_scenarios;

use serde::{Deserialize, Serialize};

/// One scenario pulled out of a feature document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioUnit {
    /// File name of the document the scenario came from.
    pub origin_id: String,

    /// `"<name>: "` followed by each step line and a trailing space.
    pub text: String,
}

impl ScenarioUnit {
    /// Create a new scenario unit.
    pub fn new(origin_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin_id: origin_id.into(),
            text: text.into(),
        }
    }
}
