//! Remote record sources.
//!
//! This module provides the seam between the paginator and the network:
//! - [`PageSource`]: one page request at a given offset
//! - [`parse_page`]: decoding of the open-data JSON payload (parse at boundary)
//! - [`HttpSource`]: the HTTPS implementation against the open-data endpoint
//! - [`fetch_all`]: sequential aggregation of every page into one record list

use crate::model::{Record, SourceError};
use serde::{Deserialize, Deserializer};
use std::future::Future;

pub mod http;
pub mod paginator;

pub use http::HttpSource;
pub use paginator::{fetch_all, CancellationToken, PaginatorConfig};

/// One page of records returned by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Records in source order.
    pub records: Vec<Record>,
    /// Total size of the remote collection, when the source reports it.
    pub total_count: Option<usize>,
}

/// A paged remote collection.
///
/// Implementations perform exactly one request per call and report failures
/// as [`SourceError`]; aggregation policy lives in the paginator.
pub trait PageSource {
    /// Fetch up to `limit` records starting at `offset`.
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Page, SourceError>>;
}

// ===== Wire format =====

#[derive(Debug, Deserialize)]
struct RawPage {
    results: Vec<RawRecord>,
    #[serde(default)]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    arbres_idbase: Option<String>,
    #[serde(default)]
    arbres_espece: Option<String>,
    #[serde(default)]
    arbres_adresse: Option<String>,
    #[serde(default)]
    com_descriptif: Option<String>,
    #[serde(default)]
    com_url_photo1: Option<String>,
}

/// The source publishes ids as numbers in some exports and strings in others.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(|id| match id {
        RawId::Int(n) => Some(n.to_string()),
        RawId::Float(n) if n.fract() == 0.0 => Some(format!("{n:.0}")),
        RawId::Float(n) => Some(n.to_string()),
        RawId::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
    }))
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            id: raw.arbres_idbase,
            species: raw.arbres_espece,
            address: raw.arbres_adresse,
            description: raw.com_descriptif,
            photo_url: raw.com_url_photo1,
        }
    }
}

/// Decode one page payload.
///
/// # Errors
///
/// Returns `SourceError::Malformed` if the body is not JSON or has no
/// `results` array.
pub fn parse_page(body: &str) -> Result<Page, SourceError> {
    let raw: RawPage =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

    Ok(Page {
        records: raw.results.into_iter().map(Record::from).collect(),
        total_count: raw
            .total_count
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
    })
}
