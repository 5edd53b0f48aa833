//! Tests for suggestion navigation.

use super::*;

fn suggestions(labels: &[&str]) -> SuggestionState {
    SuggestionState::from_items(labels.iter().map(|s| s.to_string()).collect())
}

// ===== move_next =====

#[test]
fn move_next_from_none_selects_first() {
    let state = move_next(suggestions(&["a", "b", "c"]));

    assert_eq!(state.active_index(), Some(0));
    assert_eq!(state.active_label(), Some("a"));
}

#[test]
fn move_next_wraps_from_last_to_first() {
    let mut state = suggestions(&["a", "b", "c"]);
    for _ in 0..3 {
        state = move_next(state);
    }
    assert_eq!(state.active_index(), Some(2));

    let state = move_next(state);

    assert_eq!(state.active_index(), Some(0));
}

#[test]
fn move_next_on_empty_is_noop() {
    let state = move_next(SuggestionState::default());

    assert_eq!(state.active_index(), None);
    assert!(state.is_empty());
}

// ===== move_prev =====

#[test]
fn move_prev_from_none_selects_last() {
    let state = move_prev(suggestions(&["a", "b", "c"]));

    assert_eq!(state.active_index(), Some(2));
}

#[test]
fn move_prev_wraps_from_first_to_last() {
    let state = move_next(suggestions(&["a", "b"]));
    assert_eq!(state.active_index(), Some(0));

    let state = move_prev(state);

    assert_eq!(state.active_index(), Some(1));
}

#[test]
fn move_prev_on_empty_is_noop() {
    let state = move_prev(SuggestionState::default());

    assert_eq!(state.active_index(), None);
}

#[test]
fn single_item_cycles_onto_itself() {
    let state = move_next(move_next(suggestions(&["only"])));
    assert_eq!(state.active_index(), Some(0));

    let state = move_prev(state);
    assert_eq!(state.active_index(), Some(0));
}

// ===== commit =====

#[test]
fn commit_returns_active_label() {
    let state = move_next(move_next(suggestions(&["Chêne — A", "Platane — B"])));

    assert_eq!(commit(&state), Some("Platane — B".to_string()));
}

#[test]
fn commit_without_selection_falls_back() {
    assert_eq!(commit(&suggestions(&["a", "b"])), None);
    assert_eq!(commit(&SuggestionState::default()), None);
}

// ===== dismiss =====

#[test]
fn dismiss_clears_items_and_selection() {
    let state = dismiss(move_next(suggestions(&["a", "b"])));

    assert!(state.is_empty());
    assert_eq!(state.active_index(), None);
}

#[test]
fn from_items_starts_unselected() {
    let state = suggestions(&["a"]);

    assert_eq!(state.items(), &["a".to_string()]);
    assert_eq!(state.active_index(), None);
}
