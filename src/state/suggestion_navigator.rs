//! Suggestion navigation (pure state transitions).
//!
//! Tracks a cyclic active index over the current suggestion list for
//! keyboard traversal. All functions are pure - no side effects, testable
//! without a UI.

/// Suggestion list with an optional active entry.
///
/// `active` is `None` until the user navigates, and always indexes into
/// `items` when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    items: Vec<String>,
    active: Option<usize>,
}

impl SuggestionState {
    /// Fresh suggestions with nothing selected.
    pub fn from_items(items: Vec<String>) -> Self {
        Self {
            items,
            active: None,
        }
    }

    /// Suggestion labels in display order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index of the highlighted suggestion, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Label of the highlighted suggestion, if any.
    pub fn active_label(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Highlight the next suggestion, wrapping from last to first.
///
/// From no selection, highlights the first. No-op on an empty list.
pub fn move_next(state: SuggestionState) -> SuggestionState {
    let len = state.items.len();
    if len == 0 {
        return state;
    }
    let next = match state.active {
        Some(i) => (i + 1) % len,
        None => 0,
    };
    SuggestionState {
        active: Some(next),
        ..state
    }
}

/// Highlight the previous suggestion, wrapping from first to last.
///
/// From no selection, highlights the last. No-op on an empty list.
pub fn move_prev(state: SuggestionState) -> SuggestionState {
    let len = state.items.len();
    if len == 0 {
        return state;
    }
    let prev = match state.active {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    };
    SuggestionState {
        active: Some(prev),
        ..state
    }
}

/// The highlighted label, or `None` to fall back to a full-query search.
pub fn commit(state: &SuggestionState) -> Option<String> {
    state.active_label().map(str::to_string)
}

/// Drop all suggestions and the selection (query edit, focus loss, clear).
pub fn dismiss(_state: SuggestionState) -> SuggestionState {
    SuggestionState::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "suggestion_navigator_tests.rs"]
mod tests;
