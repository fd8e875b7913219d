//! Error types for serialization.

use thiserror::Error;

/// Errors that can occur while exporting a tree.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// The document has not been instantiated yet.
    #[error("document is not resolved")]
    Unresolved,
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}
