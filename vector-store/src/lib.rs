//! # Vector Store
//!
//! Flat, append-only persistence for scenario embeddings.
//!
//! Each record is one CSV row with three columns and no header:
//!
//! ```text
//! origin id , scenario text                      , vector
//! login.feature,"Login succeeds: Given a user ",  "0.0123,-0.5,1"
//! ```
//!
//! The vector column is written as a bare comma-joined list using the
//! shortest decimal form that round-trips. On read, a list wrapped in
//! `[...]` is accepted as well. Rows are never rewritten; a rebuild
//! recreates the file.

pub mod codec;
pub mod error;
pub mod record;
pub mod store;

pub use codec::{format_vector, parse_vector};
pub use error::{Result, StoreError};
pub use record::{Corpus, StoredRecord};
pub use store::CsvVectorStore;
