//! Tree records and their indexed form.
//!
//! `Record` is the raw entry as delivered by the open-data endpoint.
//! `IndexedRecord` wraps it with the derived search blob and display label,
//! computed once at construction and never touched afterwards.

use crate::index::normalize::normalize;

/// Separator placed between species and address in a label.
pub const LABEL_SEPARATOR: &str = " — ";

/// Label used when a record has neither species nor address.
pub const UNLABELED: &str = "unlabeled";

// ===== Record =====

/// One remarkable tree as ingested from the remote collection.
///
/// Every field is optional; the source leaves many of them blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Stable identifier assigned by the source, used for deduplication.
    pub id: Option<String>,
    /// Species label (e.g. "Platane").
    pub species: Option<String>,
    /// Postal address of the tree.
    pub address: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// URL of the first photo.
    pub photo_url: Option<String>,
}

impl Record {
    /// Species, if present and not blank.
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }

    /// Address, if present and not blank.
    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }

    /// Description, if present and not blank.
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Photo URL, if present and not blank.
    pub fn photo_url(&self) -> Option<&str> {
        non_blank(self.photo_url.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ===== IndexedRecord =====

/// A record together with its cached search blob and label.
///
/// Fields are private: the derived values can only be produced from the
/// source record, so they can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRecord {
    record: Record,
    search_blob: String,
    label: String,
}

impl IndexedRecord {
    /// Index a record, computing its search blob and label.
    pub fn new(record: Record) -> Self {
        let search_blob = build_search_blob(&record);
        let label = build_label(&record);
        Self {
            record,
            search_blob,
            label,
        }
    }

    /// The source record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Normalized concatenation of species, address and description.
    pub fn search_blob(&self) -> &str {
        &self.search_blob
    }

    /// Display label used for suggestions.
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn build_search_blob(record: &Record) -> String {
    let parts: Vec<&str> = [record.species(), record.address(), record.description()]
        .into_iter()
        .flatten()
        .collect();
    normalize(&parts.join(" "))
}

/// Build the display label for a record.
///
/// `"{species} — {address}"` when both are present, whichever one is present
/// otherwise, and [`UNLABELED`] when neither is.
pub fn build_label(record: &Record) -> String {
    match (record.species(), record.address()) {
        (Some(species), Some(address)) => format!("{species}{LABEL_SEPARATOR}{address}"),
        (Some(species), None) => species.to_string(),
        (None, Some(address)) => address.to_string(),
        (None, None) => UNLABELED.to_string(),
    }
}
