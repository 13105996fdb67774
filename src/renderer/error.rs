//! Error types for the renderer module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for renderer operations
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input could not be read (missing file, invalid UTF-8, ...)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML parsing or selector error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<RenderError> for CrateError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(e) => CrateError::Io(e),
            _ => CrateError::Render(err.to_string()),
        }
    }
}
