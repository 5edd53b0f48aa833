//! User-facing text of the rendered page.
//!
//! Centralized so the renderer and its snapshot tests agree on wording.

/// Page title, printed first.
pub const PAGE_TITLE: &str = "Arbres remarquables de Paris";

/// Shown instead of a missing species.
pub const SPECIES_FALLBACK: &str = "Espèce inconnue";

/// Shown instead of a missing address.
pub const ADDRESS_FALLBACK: &str = "Adresse non renseignée";

/// Shown instead of a missing description.
pub const DESCRIPTION_FALLBACK: &str = "Aucun descriptif";

/// Empty-state message for a query with no match.
pub const NO_RESULTS: &str = "Aucun arbre ne correspond à votre recherche.";

/// Shown while the dataset is being fetched.
pub const LOADING: &str = "Chargement des arbres…";

/// Label of the "load more" affordance.
pub const LOAD_MORE: &str = "Charger plus";

/// Marker after a collapsed description.
pub const SEE_MORE: &str = "[See more]";

/// Marker after an expanded description that had been collapsed.
pub const SEE_LESS: &str = "[See less]";

/// Appended to a truncated description.
pub const ELLIPSIS: &str = "…";

/// Prefix of the active suggestion line.
///
/// Inactive lines are padded to the same width.
pub const ACTIVE_MARKER: &str = "> ";
