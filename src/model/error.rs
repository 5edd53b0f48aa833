//! Error types for arbres.
//!
//! Errors are structured with `thiserror` and compose through `?` and `From`
//! conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`FetchError`] - Ingestion of the remote collection failed (terminal for the load cycle)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file could not be read or parsed
//!   - [`LoggingError`](crate::logging::LoggingError) - Log subscriber could not be installed
//! - [`SourceError`] - A single page request failed; the paginator lifts it into a `FetchError`
//!
//! # Recovery Strategy
//!
//! Ingestion is all-or-nothing: any failed page discards what was accumulated
//! and the view shows a "data unavailable" state. There is no internal retry;
//! the user reloads. Search, reveal and suggestion operations are total and
//! have no error channel. An empty match set is a valid state, not an error.

use thiserror::Error;

/// Message shown to the user for any ingestion failure.
pub const DATA_UNAVAILABLE: &str = "Données indisponibles";

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Dataset ingestion failed.
    #[error("Failed to load dataset: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Writing the rendered page failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single page request, as reported by a [`PageSource`](crate::source::PageSource).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Connection or body read failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {code}")]
    Status {
        /// HTTP status code returned.
        code: u16,
    },

    /// The body did not match the expected `{ results, total_count }` shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Category of an ingestion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Network or HTTP failure on a page request.
    Transport,
    /// Response body did not match the expected shape.
    Malformed,
    /// The safety bound on the number of pages was exceeded.
    ///
    /// Reported to the user like `Transport`, logged distinctly.
    Runaway,
    /// The ingestion was superseded by a newer one.
    Cancelled,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FetchErrorKind::Transport => "transport",
            FetchErrorKind::Malformed => "malformed",
            FetchErrorKind::Runaway => "runaway",
            FetchErrorKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Ingestion of the full collection failed.
///
/// Carries the offset of the page being requested when the failure happened.
/// No partial dataset ever accompanies this error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} error at offset {offset}: {cause}")]
pub struct FetchError {
    /// Offset of the page that failed.
    pub offset: usize,
    /// Failure category.
    pub kind: FetchErrorKind,
    /// Human-readable cause.
    pub cause: String,
}

impl FetchError {
    /// Lift a per-page source error into an ingestion failure at `offset`.
    pub fn from_source(offset: usize, err: SourceError) -> Self {
        let kind = match err {
            SourceError::Transport(_) | SourceError::Status { .. } => FetchErrorKind::Transport,
            SourceError::Malformed(_) => FetchErrorKind::Malformed,
        };
        Self {
            offset,
            kind,
            cause: err.to_string(),
        }
    }

    /// Safety-bound abort after `pages` requests.
    pub fn runaway(offset: usize, pages: usize) -> Self {
        Self {
            offset,
            kind: FetchErrorKind::Runaway,
            cause: format!("source never signalled exhaustion after {pages} pages"),
        }
    }

    /// Ingestion superseded before completion.
    pub fn cancelled(offset: usize) -> Self {
        Self {
            offset,
            kind: FetchErrorKind::Cancelled,
            cause: "ingestion superseded by a newer request".to_string(),
        }
    }

    /// Text shown to the user.
    ///
    /// Every kind reads as "data unavailable"; runaway aborts do not expose
    /// their internal cause.
    pub fn user_message(&self) -> String {
        match self.kind {
            FetchErrorKind::Runaway => format!("{DATA_UNAVAILABLE} : source unreachable"),
            _ => format!("{DATA_UNAVAILABLE} : {}", self.cause),
        }
    }
}
