//! Search engine.
//!
//! Filters a dataset by substring containment over each record's normalized
//! search blob and derives the autocomplete suggestions from the matches.
//! Matching is plain containment: no tokenization, no fuzzy distance, no
//! relevance ranking.

use crate::index::{normalize, Dataset};
use crate::model::{IndexedRecord, LABEL_SEPARATOR};
use std::collections::HashSet;

/// Maximum number of distinct suggestion labels.
pub const MAX_SUGGESTIONS: usize = 10;

// ===== QueryState =====

/// Raw query and its normalized form. Recomputed on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    raw: String,
    normalized: String,
}

impl QueryState {
    /// Build from the raw text typed by the user.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    /// The text as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The folded text used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True for browse-all mode (nothing left after normalization).
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

// ===== SearchOutcome =====

/// Result of running a query against a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The query that produced this outcome.
    pub query: QueryState,
    /// Positions of matching records in the dataset, ascending.
    pub matches: Vec<usize>,
    /// Distinct labels of the matches in match order, at most [`MAX_SUGGESTIONS`].
    pub suggestions: Vec<String>,
}

impl SearchOutcome {
    /// The matching records, in dataset order.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a IndexedRecord> {
        self.matches.iter().filter_map(move |&i| dataset.get(i))
    }

    /// True when a non-empty query matched nothing.
    pub fn is_no_results(&self) -> bool {
        !self.query.is_empty() && self.matches.is_empty()
    }
}

// ===== Search Execution =====

/// Run `query` against `dataset`.
///
/// An empty normalized query selects every record and yields no suggestions.
pub fn search(dataset: &Dataset, query: &str) -> SearchOutcome {
    let query = QueryState::new(query);

    if query.is_empty() {
        return SearchOutcome {
            query,
            matches: (0..dataset.len()).collect(),
            suggestions: Vec::new(),
        };
    }

    let matches: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record.search_blob().contains(query.normalized()))
        .map(|(i, _)| i)
        .collect();

    let suggestions = collect_suggestions(matches.iter().filter_map(|&i| dataset.get(i)));

    SearchOutcome {
        query,
        matches,
        suggestions,
    }
}

/// First [`MAX_SUGGESTIONS`] distinct labels, keeping first occurrences.
fn collect_suggestions<'a>(records: impl Iterator<Item = &'a IndexedRecord>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for record in records {
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
        if seen.insert(record.label()) {
            suggestions.push(record.label().to_string());
        }
    }

    suggestions
}

/// Query issued when a suggestion label is selected.
///
/// Returns the species portion (text before the label separator, trimmed),
/// so selecting "Platane — 12 Rue X" searches for every "Platane", not just
/// the one record. Labels without a separator are used whole.
pub fn suggestion_query(label: &str) -> String {
    label
        .split_once(LABEL_SEPARATOR)
        .map_or(label, |(species, _)| species)
        .trim()
        .to_string()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
