//! Domain model types (pure).
//!
//! Records, their indexed form, and the error taxonomy.

pub mod error;
pub mod record;

// Re-export for convenience
pub use error::{AppError, FetchError, FetchErrorKind, SourceError};
pub use record::{IndexedRecord, Record, LABEL_SEPARATOR, UNLABELED};
