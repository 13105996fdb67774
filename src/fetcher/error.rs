//! Error types for the fetcher module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for fetcher operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            FetchError::Io(e) => CrateError::Io(e),
            FetchError::UrlParse(e) => CrateError::Other(format!("URL parse error: {}", e)),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
