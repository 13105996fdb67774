//! Error types for the doc-archive crate

use thiserror::Error;

/// Result type for doc-archive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for doc-archive operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Documentation fetching error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// HTML to text rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
