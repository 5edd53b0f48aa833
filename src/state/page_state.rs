//! Page controller state.
//!
//! PageState is the explicit context object owned by the presentation layer.
//! It holds the dataset, the current query outcome, the reveal window and
//! the suggestion navigator, and exposes one method per user event. The
//! presentation layer reads the outputs and performs its own side effects.
//!
//! # Load cycle
//!
//! `begin_load` cancels any in-flight ingestion and issues a [`LoadTicket`].
//! `finish_load` applies the ingestion result only if its ticket is still the
//! current one, so a superseded fetch can never overwrite a newer dataset.
//! The dataset is only ever replaced as a whole.

use crate::index::Dataset;
use crate::model::{FetchError, IndexedRecord, Record};
use crate::source::CancellationToken;
use crate::state::reveal::{self, RevealState};
use crate::state::search::{search, suggestion_query, QueryState, SearchOutcome};
use crate::state::suggestion_navigator::{self, SuggestionState};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// ===== LoadStatus =====

/// Progress of the current load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has been requested yet.
    Idle,
    /// An ingestion is in flight.
    Loading,
    /// The dataset is complete and searchable.
    Ready,
    /// The last ingestion failed; the view shows the error state.
    Failed(FetchError),
}

// ===== LoadTicket =====

/// Handle for one ingestion request.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: CancellationToken,
}

impl LoadTicket {
    /// Monotonic load cycle number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token to pass to the paginator; cancelled when a newer load begins.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

// ===== NavKey =====

/// Keys the search box forwards to the page controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Highlight the next suggestion.
    Down,
    /// Highlight the previous suggestion.
    Up,
    /// Commit the highlighted suggestion, or search the full query.
    Enter,
    /// Dismiss the suggestion list.
    Escape,
}

// ===== PageState =====

/// Page controller context. Single writer of the dataset.
#[derive(Debug, Clone)]
pub struct PageState {
    dataset: Arc<Dataset>,
    status: LoadStatus,
    generation: u64,
    active_token: Option<CancellationToken>,
    outcome: SearchOutcome,
    reveal: RevealState,
    suggestions: SuggestionState,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(RevealState::default())
    }
}

impl PageState {
    /// Empty page with the given reveal window settings.
    pub fn new(reveal: RevealState) -> Self {
        Self {
            dataset: Arc::new(Dataset::empty()),
            status: LoadStatus::Idle,
            generation: 0,
            active_token: None,
            outcome: SearchOutcome::default(),
            reveal,
            suggestions: SuggestionState::default(),
        }
    }

    // ----- Load cycle -----

    /// Start a new load cycle, superseding any in-flight one.
    pub fn begin_load(&mut self) -> LoadTicket {
        if let Some(stale) = self.active_token.take() {
            debug!(generation = self.generation, "Cancelling superseded ingestion");
            stale.cancel();
        }
        self.generation += 1;
        self.status = LoadStatus::Loading;

        let token = CancellationToken::new();
        self.active_token = Some(token.clone());
        LoadTicket {
            generation: self.generation,
            token,
        }
    }

    /// Apply an ingestion result.
    ///
    /// Returns `false` (and changes nothing) when `ticket` has been
    /// superseded by a later `begin_load`.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<Record>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                stale = ticket.generation,
                current = self.generation,
                "Ignoring completion of superseded ingestion"
            );
            return false;
        }
        self.active_token = None;

        match result {
            Ok(records) => {
                let dataset = Dataset::build(records);
                info!(records = dataset.len(), "Dataset indexed");
                self.dataset = Arc::new(dataset);
                self.status = LoadStatus::Ready;
            }
            Err(err) => {
                error!(error = %err, "Dataset unavailable");
                self.dataset = Arc::new(Dataset::empty());
                self.status = LoadStatus::Failed(err);
            }
        }

        let raw = self.outcome.query.raw().to_string();
        self.outcome = search(&self.dataset, &raw);
        self.reveal = reveal::reset(self.reveal);
        self.suggestions = suggestion_navigator::dismiss(std::mem::take(&mut self.suggestions));
        true
    }

    // ----- Search box events -----

    /// The query text changed: search live and offer fresh suggestions.
    pub fn input(&mut self, raw: &str) {
        self.run_query(raw);
        self.suggestions = SuggestionState::from_items(self.outcome.suggestions.clone());
    }

    /// Enter in the search box.
    ///
    /// Selects the highlighted suggestion if there is one, otherwise
    /// searches the full query text.
    pub fn submit(&mut self) {
        match suggestion_navigator::commit(&self.suggestions) {
            Some(label) => self.select_suggestion(&label),
            None => {
                let raw = self.outcome.query.raw().to_string();
                self.run_query(&raw);
                self.blur();
            }
        }
    }

    /// A suggestion was chosen: search by its species portion.
    pub fn select_suggestion(&mut self, label: &str) {
        let query = suggestion_query(label);
        debug!(label, query = %query, "Suggestion selected");
        self.run_query(&query);
        self.blur();
    }

    /// The clear icon was pressed: back to browse-all mode.
    pub fn clear(&mut self) {
        self.run_query("");
        self.blur();
    }

    /// The search box lost focus.
    pub fn blur(&mut self) {
        self.suggestions = suggestion_navigator::dismiss(std::mem::take(&mut self.suggestions));
    }

    /// Keyboard navigation in the search box.
    pub fn handle_key(&mut self, key: NavKey) {
        let current = std::mem::take(&mut self.suggestions);
        match key {
            NavKey::Down => self.suggestions = suggestion_navigator::move_next(current),
            NavKey::Up => self.suggestions = suggestion_navigator::move_prev(current),
            NavKey::Enter => {
                self.suggestions = current;
                self.submit();
            }
            NavKey::Escape => self.suggestions = suggestion_navigator::dismiss(current),
        }
    }

    /// "Load more" was pressed. Returns whether the window grew.
    ///
    /// No-op while a search is active.
    pub fn load_more(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        self.reveal = reveal::grow(self.reveal);
        true
    }

    fn run_query(&mut self, raw: &str) {
        let previous = self.outcome.query.normalized().to_string();
        self.outcome = search(&self.dataset, raw);
        if self.outcome.query.normalized() != previous {
            self.reveal = reveal::reset(self.reveal);
        }
        debug!(
            query = %self.outcome.query.normalized(),
            matches = self.outcome.matches.len(),
            "Query applied"
        );
    }

    // ----- Outputs -----

    /// Records the view should display, in dataset order.
    ///
    /// The reveal window applies only in browse-all mode; search results
    /// are shown in full.
    pub fn visible_records(&self) -> Vec<&IndexedRecord> {
        let positions = if self.is_browsing() {
            reveal::visible(&self.outcome.matches, &self.reveal)
        } else {
            &self.outcome.matches[..]
        };
        positions.iter().filter_map(|&i| self.dataset.get(i)).collect()
    }

    /// Whether the "load more" affordance should be shown.
    pub fn can_load_more(&self) -> bool {
        self.is_browsing() && reveal::has_more(self.outcome.matches.len(), &self.reveal)
    }

    /// Matching records not yet revealed.
    pub fn hidden_count(&self) -> usize {
        if self.can_load_more() {
            self.outcome.matches.len() - self.reveal.visible_count()
        } else {
            0
        }
    }

    /// True when a loaded dataset has no match for a non-empty query.
    pub fn no_results(&self) -> bool {
        self.status == LoadStatus::Ready && self.outcome.is_no_results()
    }

    /// True when the query is empty (default listing).
    pub fn is_browsing(&self) -> bool {
        self.outcome.query.is_empty()
    }

    /// Number of records matching the current query.
    pub fn match_count(&self) -> usize {
        self.outcome.matches.len()
    }

    /// The current query.
    pub fn query(&self) -> &QueryState {
        &self.outcome.query
    }

    /// The suggestion list and its active entry.
    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    /// The reveal window.
    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    /// Progress of the current load cycle.
    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    /// User-facing error text when the last load failed.
    pub fn fetch_error_message(&self) -> Option<String> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }

    /// Shared handle to the current dataset.
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "page_state_tests.rs"]
mod tests;
