//! Option source error types

use thiserror::Error;

/// Errors a data source can report from `fetch`
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing service could not be reached
    #[error("Option source unavailable: {0}")]
    Unavailable(String),

    /// The source refused the request
    #[error("Fetch rejected: {0}")]
    Rejected(String),

    /// A deferred request was dropped without ever being answered
    #[error("Fetch was abandoned before it resolved")]
    Abandoned,

    /// IO error while reading option data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Option data could not be decoded
    #[error("Invalid option data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;
