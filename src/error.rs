//! Error types for docsift
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in docsift
#[derive(Debug, Error)]
pub enum DocsiftError {
    /// A task was enqueued to (or cleared from) a label that was never declared
    #[error("Undeclared label: {0}")]
    UndeclaredLabel(String),

    /// A label was declared twice
    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    /// Generated markup carried a missing or malformed record attribute
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Generated markup could not be interpreted (missing containers, bad selectors)
    #[error("Markup error: {0}")]
    Markup(String),

    /// Focus target missing from the entity index
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// Paged search fetch failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Network error from the HTTP client
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for docsift operations
pub type Result<T> = std::result::Result<T, DocsiftError>;
