//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur when setting up a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid matcher configuration
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    /// Record payload could not be decoded
    #[error("Invalid records: {0}")]
    InvalidRecords(#[from] serde_json::Error),
}
