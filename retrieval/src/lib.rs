//! # Scenario Retrieval
//!
//! Selects the feature scenarios most related to a change description.
//!
//! ## Architecture
//!
//! ```text
//!   index                                   query
//!   ─────                                   ─────
//!   corpus dir                              change description
//!       │                                           │
//!       ▼                                           ▼
//!   ScenarioExtractor ──► EmbeddingProvider ◄── query embedding
//!                               │                   │
//!                               ▼                   ▼
//!                         CsvVectorStore ──► cosine similarity
//!                                                   │
//!                                                   ▼
//!                                          threshold selection
//!                                              QueryReport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scout_retrieval::{ScenarioScout, ScoutConfig};
//!
//! let mut config = ScoutConfig::load("scout.toml")?;
//! config.apply_env(|name| std::env::var(name).ok())?;
//!
//! let scout = ScenarioScout::with_openai(config)?;
//! scout.index().await?;
//!
//! let report = scout.query("Fix bug in login flow").await?;
//! for origin in report.matched_origins() {
//!     println!("{origin}");
//! }
//! ```

mod config;
mod engine;
mod error;
mod report;

pub use config::{
    ENV_API_KEY, ENV_BASE_URL, ENV_MODEL, ENV_THRESHOLD, EmbeddingConfig, ScoutConfig, StoreMode,
};
pub use engine::ScenarioScout;
pub use error::{Result, RetrievalError};
pub use report::{IndexReport, QueryReport, ScoredScenario};

// Re-export component crates
pub use scout_embeddings;
pub use scout_scenarios;
pub use scout_vector_store;
