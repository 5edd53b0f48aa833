//! Text folding for comparison.
//!
//! Removes case and diacritic distinctions so that "Érable", "ERABLE" and
//! "erable" compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison: lowercase, strip diacritics, trim.
///
/// Lowercasing happens before canonical decomposition so that marks
/// introduced by case mapping (`İ` lowercases to `i` + U+0307) are stripped
/// too, which keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// [`normalize`] for optional input. Absent input yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
