//! Sequential page aggregation.
//!
//! Requests fixed-size pages at offsets `0, n, 2n, ...` until the source is
//! exhausted, and hands back the complete record list or a [`FetchError`].
//! Nothing partial ever leaves this module.

use crate::model::{FetchError, Record};
use crate::source::PageSource;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Default number of records requested per page (the endpoint's maximum).
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Default hard page cap, and the whole bound while no total is reported.
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Paginator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorConfig {
    /// Records requested per page.
    pub page_size: NonZeroUsize,
    /// Hard page cap. A reported total can only tighten it.
    pub max_pages: usize,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PaginatorConfig {
    /// Maximum pages that may be requested given the last known total.
    ///
    /// One page of slack covers a total that grew while paging. The total
    /// comes from the payload, so the result never exceeds `max_pages`.
    pub fn page_bound(&self, known_total: Option<usize>) -> usize {
        match known_total {
            Some(total) => total
                .div_ceil(self.page_size.get())
                .saturating_add(1)
                .min(self.max_pages),
            None => self.max_pages,
        }
    }
}

// ===== CancellationToken =====

/// Shared flag that lets a newer ingestion supersede a stale one.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ===== fetch_all =====

/// Fetch every page of `source` and return the deduplicated records.
///
/// Stops when a page comes back short, or when the accumulated row count
/// reaches a reported total. Records sharing an id with an earlier record
/// are dropped; records without an id are always kept.
///
/// # Errors
///
/// - `Transport` / `Malformed` when any page request fails
/// - `Runaway` when the page bound is exceeded
/// - `Cancelled` when `cancel` fires before completion
pub async fn fetch_all<S: PageSource>(
    source: &S,
    config: &PaginatorConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Record>, FetchError> {
    let page_size = config.page_size.get();
    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut received = 0usize;
    let mut known_total: Option<usize> = None;
    let mut pages = 0usize;

    loop {
        let offset = pages * page_size;

        let bound = config.page_bound(known_total);
        if pages >= bound {
            warn!(offset, pages, ?known_total, "Pagination runaway, aborting ingestion");
            return Err(FetchError::runaway(offset, pages));
        }

        if cancel.is_cancelled() {
            warn!(offset, "Ingestion cancelled before page request");
            return Err(FetchError::cancelled(offset));
        }

        debug!(offset, limit = page_size, "Requesting page");
        let page = source.fetch_page(offset, page_size).await.map_err(|e| {
            let err = FetchError::from_source(offset, e);
            error!(error = %err, "Page request failed, discarding accumulated records");
            err
        })?;

        if cancel.is_cancelled() {
            warn!(offset, "Ingestion cancelled after page response");
            return Err(FetchError::cancelled(offset));
        }

        pages += 1;
        let count = page.records.len();
        received += count;
        if page.total_count.is_some() {
            known_total = page.total_count;
        }

        for record in page.records {
            if let Some(id) = &record.id {
                if !seen_ids.insert(id.clone()) {
                    debug!(id = %id, offset, "Dropping duplicate record");
                    continue;
                }
            }
            records.push(record);
        }

        if count < page_size {
            break;
        }
        if known_total.is_some_and(|total| received >= total) {
            break;
        }
    }

    info!(
        records = records.len(),
        received,
        pages,
        "Ingestion complete"
    );
    Ok(records)
}

// ===== Tests =====

#[cfg(test)]
#[path = "paginator_tests.rs"]
mod tests;
