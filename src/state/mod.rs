//! Page state machine (pure).
//!
//! All state transitions are pure functions testable without a UI.

pub mod page_state;
pub mod reveal;
pub mod search;
pub mod suggestion_navigator;

// Re-export for convenience
pub use page_state::{LoadStatus, LoadTicket, NavKey, PageState};
pub use reveal::RevealState;
pub use search::{search, suggestion_query, QueryState, SearchOutcome, MAX_SUGGESTIONS};
pub use suggestion_navigator::SuggestionState;
