//! Stored records and the loaded corpus.

use serde::{Deserialize, Serialize};

/// One persisted row: where a scenario came from, its text, its vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// File name of the originating feature document.
    pub origin_id: String,

    /// Flattened scenario text that was embedded.
    pub scenario_text: String,

    /// Embedding exactly as returned by the provider.
    pub vector: Vec<f32>,
}

impl StoredRecord {
    /// Create a new record.
    pub fn new(
        origin_id: impl Into<String>,
        scenario_text: impl Into<String>,
        vector: Vec<f32>,
    ) -> Self {
        Self {
            origin_id: origin_id.into(),
            scenario_text: scenario_text.into(),
            vector,
        }
    }
}

/// Every record of a store, in file order.
///
/// Positions are stable for the lifetime of the value and match row order
/// in the file it was loaded from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<StoredRecord>,
}

impl Corpus {
    /// Wrap records that are already in file order.
    pub fn new(records: Vec<StoredRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a position.
    pub fn get(&self, index: usize) -> Option<&StoredRecord> {
        self.records.get(index)
    }

    /// Iterate over records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredRecord> {
        self.records.iter()
    }

    /// Borrow all records.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Vectors only, in file order.
    pub fn vectors(&self) -> Vec<&[f32]> {
        self.records.iter().map(|r| r.vector.as_slice()).collect()
    }

    /// Take ownership of the records.
    pub fn into_records(self) -> Vec<StoredRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a StoredRecord;
    type IntoIter = std::slice::Iter<'a, StoredRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
