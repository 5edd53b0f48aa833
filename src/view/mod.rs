//! Plain-text presentation of the page.
//!
//! Reads a [`PageState`] and produces the text the binary prints. Owns no
//! state of its own; "see more" toggling is a rendering option.

pub mod card;
pub mod constants;

pub use card::{collapse_description, render_card, DescriptionText};

use crate::config::ResolvedConfig;
use crate::state::{LoadStatus, PageState, SuggestionState};
use constants::{ACTIVE_MARKER, LOAD_MORE, LOADING, NO_RESULTS, PAGE_TITLE};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Description characters shown while collapsed.
    pub description_preview: usize,
    /// Print every description in full.
    pub expand_descriptions: bool,
}

impl ViewOptions {
    /// Options from resolved configuration, descriptions collapsed.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            description_preview: config.description_preview,
            expand_descriptions: false,
        }
    }
}

/// Render the whole page.
///
/// Sections, in order: title, query line, suggestion list, then one of the
/// loading notice, the error message, the no-results message, or the cards
/// followed by the "load more" footer.
pub fn render_page(state: &PageState, options: &ViewOptions) -> String {
    let mut lines = vec![
        PAGE_TITLE.to_string(),
        "=".repeat(PAGE_TITLE.chars().count()),
        String::new(),
    ];

    let query = state.query();
    if !query.is_empty() {
        lines.push(format!("Recherche : {}", query.raw().trim()));
        lines.extend(render_suggestions(state.suggestions()));
        lines.push(String::new());
    }

    match state.load_status() {
        LoadStatus::Idle | LoadStatus::Loading => lines.push(LOADING.to_string()),
        LoadStatus::Failed(_) => {
            if let Some(message) = state.fetch_error_message() {
                lines.push(message);
            }
        }
        LoadStatus::Ready if state.no_results() => lines.push(NO_RESULTS.to_string()),
        LoadStatus::Ready => {
            for (i, record) in state.visible_records().into_iter().enumerate() {
                if i > 0 {
                    lines.push(String::new());
                }
                lines.extend(render_card(
                    record,
                    options.description_preview,
                    options.expand_descriptions,
                ));
            }
            if state.can_load_more() {
                lines.push(String::new());
                lines.push(render_load_more(state.hidden_count()));
            }
        }
    }

    let mut page = lines.join("\n");
    page.push('\n');
    page
}

/// Suggestion lines, active entry marked. Empty when nothing is offered.
pub fn render_suggestions(suggestions: &SuggestionState) -> Vec<String> {
    if suggestions.is_empty() {
        return Vec::new();
    }

    let padding = " ".repeat(ACTIVE_MARKER.chars().count());
    let mut lines = vec!["Suggestions :".to_string()];
    for (i, label) in suggestions.items().iter().enumerate() {
        let marker = if suggestions.active_index() == Some(i) {
            ACTIVE_MARKER
        } else {
            padding.as_str()
        };
        lines.push(format!("  {marker}{label}"));
    }
    lines
}

/// Footer shown while records remain hidden in browse-all mode.
pub fn render_load_more(hidden: usize) -> String {
    let noun = if hidden == 1 { "arbre" } else { "arbres" };
    format!("[{LOAD_MORE}] ({hidden} {noun} de plus)")
}
