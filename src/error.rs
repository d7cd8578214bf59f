//! Error types for the scoring engine and its song sources.
//!
//! Detection itself is total: empty text and zero keyword hits resolve to a
//! fallback instead of an error. The variants below cover the few places
//! where a caller can hand the library something it cannot serve.

use thiserror::Error;

/// Errors reported by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any scoring happened.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A mood label outside the fixed set of nine.
    #[error("Unknown mood '{0}'. Available moods: {available}", available = crate::mood::Mood::names().join(", "))]
    UnknownMood(String),

    /// A song source could not produce recommendations.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Transport failure talking to the external catalog.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
