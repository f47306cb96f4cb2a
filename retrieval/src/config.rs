//! Configuration for the scenario retrieval pipeline.
//!
//! A `ScoutConfig` is built once at startup (TOML file, then environment
//! overrides) and handed to [`crate::ScenarioScout`]. Nothing reads the
//! process environment after that.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scout_embeddings::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIProvider};
use scout_scenarios::ExtractorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Environment variable holding the provider API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

/// Environment variable overriding the embedding model.
pub const ENV_MODEL: &str = "SCOUT_EMBEDDING_MODEL";

/// Environment variable overriding the similarity threshold.
pub const ENV_THRESHOLD: &str = "SCOUT_THRESHOLD";

/// Configuration for the retrieval pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Directory of feature documents to index.
    pub corpus_dir: PathBuf,

    /// CSV file holding the embeddings.
    pub store_path: PathBuf,

    /// Minimum cosine similarity for a scenario to be selected.
    pub threshold: f32,

    /// Whether indexing appends to or replaces the store.
    pub store_mode: StoreMode,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Scenario parser keywords.
    pub extractor: ExtractorConfig,
}

impl ScoutConfig {
    /// Create a configuration with default values.
    pub fn new(corpus_dir: impl Into<PathBuf>, store_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RetrievalError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RetrievalError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| RetrievalError::Config(format!("{}: {e}", path.display())))
    }

    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the store mode.
    pub fn with_store_mode(mut self, mode: StoreMode) -> Self {
        self.store_mode = mode;
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Apply overrides from an environment lookup such as `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.embedding.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.embedding.base_url = url.trim().to_string();
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.embedding.model = model.trim().to_string();
        }
        if let Some(threshold) = non_empty(ENV_THRESHOLD) {
            self.threshold = threshold.trim().parse().map_err(|_| {
                RetrievalError::Config(format!("{ENV_THRESHOLD} is not a number: {threshold}"))
            })?;
        }

        Ok(())
    }

    /// Check values that would otherwise fail late.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(-1.0..=1.0).contains(&self.threshold) {
            return Err(RetrievalError::Config(format!(
                "threshold must be within [-1, 1], got {}",
                self.threshold
            )));
        }
        if self.embedding.timeout_secs == 0 {
            return Err(RetrievalError::Config(
                "embedding.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(RetrievalError::Config(
                "embedding.model must not be empty".to_string(),
            ));
        }
        if self.extractor.scenario_keyword.trim().is_empty() {
            return Err(RetrievalError::Config(
                "extractor.scenario_keyword must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("features"),
            store_path: PathBuf::from("embeddings.csv"),
            threshold: 0.8,
            store_mode: StoreMode::default(),
            embedding: EmbeddingConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

/// What indexing does with an existing store file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// Keep existing rows and append new ones.
    #[default]
    Append,
    /// Remove the file before indexing.
    Replace,
}

/// Configuration for the embedding provider.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Model to use for embeddings.
    pub model: String,

    /// Optional end-user identifier sent with each request.
    pub user: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// API key. Only ever taken from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP provider described by this configuration.
    pub fn build_provider(&self) -> OpenAIProvider {
        let mut provider = OpenAIProvider::new()
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_timeout(self.timeout());
        if let Some(key) = &self.api_key {
            provider = provider.with_api_key(key);
        }
        if let Some(user) = &self.user {
            provider = provider.with_user(user);
        }
        provider
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            user: None,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("user", &self.user)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
