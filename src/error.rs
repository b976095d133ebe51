//! Crate-wide error taxonomy.
//!
//! Guard failures reject synchronously before any field is touched, so a
//! returned error always means nothing was applied.

use thiserror::Error;

use crate::domain::localized::Language;

/// Errors surfaced by the core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// A moderation or mutation guard rejected the actor
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// No usable access method could be derived from the locator
    #[error("unresolvable locator: {0}")]
    UnresolvableLocator(String),

    /// A record store or file store call failed
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Referenced record or entry is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Map-canvas coordinates outside [0, 100]
    #[error("coordinates out of range: ({x}, {y})")]
    InvalidCoordinates { x: f64, y: f64 },

    /// Approval requires every supported language to be filled
    #[error("missing translations: {0:?}")]
    IncompleteLocalization(Vec<Language>),

    /// A locator needs an external URL or a stored file
    #[error("locator has neither URL nor stored file")]
    EmptyLocator,
}
