//! Error types for caption templates.

use thiserror::Error;

/// Errors raised while loading or validating a caption template.
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Failed to parse template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template {id}: {reason}")]
    Invalid { id: String, reason: String },
}

pub type CaptionResult<T> = Result<T, CaptionError>;
