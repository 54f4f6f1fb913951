//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur when building geo inputs.
///
/// The reduction functions themselves never fail.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Bounds with non-finite or inverted edges
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Unusable viewport or cluster configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with poimap-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Bounds with non-finite or inverted edges
    InvalidBounds = 10001,
    /// Unusable configuration
    InvalidConfig = 10002,
    /// JSON parsing error
    JsonParsing = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidBounds(_) => GeoErrorCode::InvalidBounds,
            GeoError::InvalidConfig(_) => GeoErrorCode::InvalidConfig,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GeoError::InvalidBounds("x".into()).code(), GeoErrorCode::InvalidBounds);
        assert_eq!(GeoErrorCode::InvalidConfig as u32, 10002);
    }
}
