//! Index and query pipeline.

use std::path::Path;
use std::sync::Arc;

use scout_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest, cosine_similarity,
    most_similar, select_above_threshold,
};
use scout_scenarios::ScenarioExtractor;
use scout_vector_store::CsvVectorStore;
use tracing::{debug, info};

use crate::config::{ScoutConfig, StoreMode};
use crate::error::{Result, RetrievalError};
use crate::report::{IndexReport, QueryReport, ScoredScenario};

/// Selects the stored scenarios most related to a change description.
///
/// This is the single entry point for both modes:
/// - [`index`](Self::index): feature files → scenario units → embeddings → store
/// - [`query`](Self::query): store + query embedding → scores → matches
///
/// Embedding calls are made one at a time and rows are appended in
/// extraction order, so a row's position in the store is meaningful.
pub struct ScenarioScout {
    /// Configuration.
    config: ScoutConfig,

    /// Embedding provider.
    provider: Arc<dyn EmbeddingProvider>,

    /// Scenario extractor.
    extractor: ScenarioExtractor,

    /// Persisted embeddings.
    store: CsvVectorStore,
}

impl ScenarioScout {
    /// Create a pipeline around an embedding provider.
    pub fn new(config: ScoutConfig, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        config.validate()?;

        let extractor = ScenarioExtractor::new(config.extractor.clone());
        let store = CsvVectorStore::new(&config.store_path);

        Ok(Self {
            config,
            provider,
            extractor,
            store,
        })
    }

    /// Create a pipeline using the OpenAI provider described by the config.
    pub fn with_openai(config: ScoutConfig) -> Result<Self> {
        let provider = config.embedding.build_provider();
        Self::new(config, Arc::new(provider))
    }

    /// Get the configuration.
    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Get the vector store.
    pub fn store(&self) -> &CsvVectorStore {
        &self.store
    }

    /// Extract, embed and persist every scenario of the corpus directory.
    ///
    /// Stops at the first failure. Rows appended before the failure stay in
    /// the store. In [`StoreMode::Replace`] the store is only removed once
    /// the corpus directory has been listed.
    pub async fn index(&self) -> Result<IndexReport> {
        let corpus_dir = self.config.corpus_dir.as_path();
        info!("Indexing scenarios from {}", corpus_dir.display());

        let file_names = self.extractor.list_files(corpus_dir)?;

        if self.config.store_mode == StoreMode::Replace {
            self.store.reset()?;
        }

        let mut report = IndexReport {
            files_scanned: 0,
            scenarios_indexed: 0,
            store_path: self.store.path().to_path_buf(),
        };

        for file_name in file_names {
            let Some(units) = self.extractor.extract_entry(corpus_dir, &file_name)? else {
                continue;
            };
            report.files_scanned += 1;

            for unit in units {
                let embedding =
                    self.embed(&unit.text)
                        .await
                        .map_err(|source| RetrievalError::Index {
                            origin_id: unit.origin_id.clone(),
                            source,
                        })?;

                self.store.append(&unit.origin_id, &unit.text, &embedding)?;
                report.scenarios_indexed += 1;
            }
        }

        info!(
            "Indexed {} scenarios from {} files into {}",
            report.scenarios_indexed,
            report.files_scanned,
            report.store_path.display()
        );
        Ok(report)
    }

    /// Score every stored scenario against `query_text`.
    pub async fn query(&self, query_text: &str) -> Result<QueryReport> {
        let query_text = query_text.trim();
        if query_text.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        debug!("Processing query: {query_text}");

        let corpus = self.store.load_all()?;
        let query_embedding = self.embed(query_text).await?;

        let mut scores = Vec::with_capacity(corpus.len());
        for (index, record) in corpus.iter().enumerate() {
            let similarity = cosine_similarity(&query_embedding, &record.vector).map_err(
                |source| RetrievalError::Dimension {
                    index,
                    origin_id: record.origin_id.clone(),
                    source,
                },
            )?;

            scores.push(ScoredScenario {
                index,
                origin_id: record.origin_id.clone(),
                scenario_text: record.scenario_text.clone(),
                similarity,
            });
        }

        let similarities: Vec<f32> = scores.iter().map(|s| s.similarity).collect();
        let threshold = self.config.threshold;
        let matches = select_above_threshold(threshold, &similarities);
        let best = most_similar(&similarities).and_then(|(i, _)| scores.get(i).cloned());

        info!(
            "Query matched {} of {} scenarios at threshold {threshold}",
            matches.len(),
            scores.len()
        );

        Ok(QueryReport {
            query: query_text.to_string(),
            threshold,
            scores,
            matches,
            best,
        })
    }

    /// Read the query text from a file, then [`query`](Self::query).
    pub async fn query_file(&self, path: impl AsRef<Path>) -> Result<QueryReport> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RetrievalError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        self.query(&text).await
    }

    async fn embed(&self, text: &str) -> std::result::Result<Embedding, EmbeddingError> {
        let request = EmbeddingRequest::new(text).with_model(&self.config.embedding.model);
        let response = self.provider.embed(request).await?;
        Ok(response.embedding)
    }
}
