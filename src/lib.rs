//! Remarkable trees of Paris (arbres)
//!
//! Fetches the open-data collection of remarkable trees, indexes it for
//! accent-insensitive search, and renders the page as plain text: cards,
//! autocomplete suggestions and incremental "load more" reveal.
//!
//! Pure core (`model`, `index`, `state`, `view`) / impure shell (`source`,
//! `config`, `logging`, the binary).

pub mod config;
pub mod index;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
