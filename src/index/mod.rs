//! Dataset indexing.
//!
//! Turns ingested records into the canonical, ordered [`Dataset`] that the
//! search engine reads. A dataset is built once per load cycle and replaced
//! wholesale on the next one.

pub mod normalize;

pub use normalize::{normalize, normalize_opt};

use crate::model::{IndexedRecord, Record};

/// Ordered collection of indexed records.
///
/// Order is ingestion order. Never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<IndexedRecord>,
}

impl Dataset {
    /// Index every record, in input order.
    ///
    /// Total: each input record yields exactly one indexed record, whatever
    /// fields it is missing.
    pub fn build(records: Vec<Record>) -> Self {
        Self {
            records: records.into_iter().map(IndexedRecord::new).collect(),
        }
    }

    /// A dataset with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All records in ingestion order.
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    /// Record at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&IndexedRecord> {
        self.records.get(position)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
