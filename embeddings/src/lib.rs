//! # Embeddings
//!
//! This crate turns scenario text into dense vectors and scores vectors
//! against each other for Scenario Scout.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to vectors through an
//!   OpenAI-compatible `/embeddings` endpoint
//! - **Similarity Ranking**: Cosine similarity, inclusive threshold
//!   selection, running maximum and top-k ranking
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingRequest ──► EmbeddingProvider ──► EmbeddingResponse   │
//! │                            │                      │             │
//! │                            ▼                      ▼             │
//! │                      OpenAIProvider      cosine_similarity      │
//! │                                          select_above_threshold │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use similarity::{cosine_similarity, most_similar, rank_descending, select_above_threshold};

/// A dense vector embedding, exactly as returned by the provider.
pub type Embedding = Vec<f32>;

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
