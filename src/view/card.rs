//! Tree card rendering.

use crate::model::IndexedRecord;
use crate::view::constants::{
    ADDRESS_FALLBACK, DESCRIPTION_FALLBACK, ELLIPSIS, SEE_LESS, SEE_MORE, SPECIES_FALLBACK,
};

const INDENT: &str = "  ";

/// Description as displayed on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionText {
    /// Text to print, already collapsed if needed.
    pub text: String,
    /// Whether the full description is longer than the preview.
    pub truncated: bool,
}

/// Collapse `description` to at most `preview` characters.
///
/// Whitespace runs are folded to single spaces first so multi-line source
/// text stays on one card line. Counts characters, not bytes.
pub fn collapse_description(description: &str, preview: usize) -> DescriptionText {
    let folded = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if folded.chars().count() <= preview {
        return DescriptionText {
            text: folded,
            truncated: false,
        };
    }

    let mut text: String = folded.chars().take(preview).collect();
    text.truncate(text.trim_end().len());
    text.push_str(ELLIPSIS);
    DescriptionText {
        text,
        truncated: true,
    }
}

/// Render one card as text lines.
///
/// With `expanded`, long descriptions are printed in full followed by the
/// "see less" marker; otherwise they are cut at `preview` characters.
pub fn render_card(record: &IndexedRecord, preview: usize, expanded: bool) -> Vec<String> {
    let rec = record.record();
    let mut lines = vec![
        rec.species().unwrap_or(SPECIES_FALLBACK).to_string(),
        format!("{INDENT}{}", rec.address().unwrap_or(ADDRESS_FALLBACK)),
    ];

    let description = match rec.description() {
        None => DESCRIPTION_FALLBACK.to_string(),
        Some(text) => {
            let collapsed = collapse_description(text, preview);
            match (collapsed.truncated, expanded) {
                (false, _) => collapsed.text,
                (true, false) => format!("{} {SEE_MORE}", collapsed.text),
                (true, true) => format!(
                    "{} {SEE_LESS}",
                    collapse_description(text, usize::MAX).text
                ),
            }
        }
    };
    lines.push(format!("{INDENT}{description}"));

    if let Some(url) = rec.photo_url() {
        lines.push(format!("{INDENT}Photo : {url}"));
    }

    lines
}
