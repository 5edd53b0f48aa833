//! Reveal window (pure).
//!
//! Limits how many records of the default listing are exposed to the view,
//! growing by a fixed step per "load more". The window only applies in
//! browse-all mode; search results are shown in full by the page controller.

/// Records exposed before any "load more".
pub const DEFAULT_INITIAL_VISIBLE: usize = 10;

/// Records added per "load more".
pub const DEFAULT_REVEAL_STEP: usize = 10;

/// Reveal window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    visible_count: usize,
    step: usize,
    initial: usize,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_VISIBLE, DEFAULT_REVEAL_STEP)
    }
}

impl RevealState {
    /// Start a window showing `initial` records, growing by `step`.
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            visible_count: initial,
            step,
            initial,
        }
    }

    /// Current window size. May exceed the match count.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Growth per "load more".
    pub fn step(&self) -> usize {
        self.step
    }

    /// Window size after a reset.
    pub fn initial(&self) -> usize {
        self.initial
    }
}

/// The first `min(visible_count, matches.len())` entries of `matches`.
pub fn visible<'a, T>(matches: &'a [T], state: &RevealState) -> &'a [T] {
    &matches[..state.visible_count.min(matches.len())]
}

/// Widen the window by one step. Saturates instead of overflowing.
pub fn grow(state: RevealState) -> RevealState {
    RevealState {
        visible_count: state.visible_count.saturating_add(state.step),
        ..state
    }
}

/// Shrink the window back to its initial size.
pub fn reset(state: RevealState) -> RevealState {
    RevealState {
        visible_count: state.initial,
        ..state
    }
}

/// Whether some of `match_count` records are still hidden.
pub fn has_more(match_count: usize, state: &RevealState) -> bool {
    state.visible_count < match_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_clamps_to_match_count() {
        let items = [1, 2, 3];
        let state = RevealState::new(10, 10);

        assert_eq!(visible(&items, &state), &[1, 2, 3]);
    }

    #[test]
    fn visible_clamps_to_window() {
        let items: Vec<usize> = (0..25).collect();
        let state = RevealState::new(10, 10);

        assert_eq!(visible(&items, &state).len(), 10);
        assert_eq!(visible(&items, &grow(state)).len(), 20);
        assert_eq!(visible(&items, &grow(grow(state))).len(), 25);
    }

    #[test]
    fn visible_of_empty_is_empty() {
        let items: [u8; 0] = [];
        assert!(visible(&items, &RevealState::default()).is_empty());
    }

    #[test]
    fn grow_adds_step() {
        let state = grow(RevealState::new(5, 3));
        assert_eq!(state.visible_count(), 8);
        assert_eq!(state.initial(), 5);
        assert_eq!(state.step(), 3);
    }

    #[test]
    fn grow_saturates() {
        let state = grow(RevealState::new(usize::MAX - 1, 10));
        assert_eq!(state.visible_count(), usize::MAX);
    }

    #[test]
    fn reset_restores_initial_after_many_grows() {
        let mut state = RevealState::default();
        for _ in 0..7 {
            state = grow(state);
        }
        assert_eq!(state.visible_count(), 80);

        assert_eq!(reset(state), RevealState::default());
    }

    #[test]
    fn has_more_tracks_hidden_records() {
        let state = RevealState::new(10, 10);
        assert!(has_more(11, &state));
        assert!(!has_more(10, &state));
        assert!(!has_more(0, &state));
    }
}
