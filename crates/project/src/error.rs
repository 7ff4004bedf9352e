//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur while reading or writing a project document.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Project version is unknown or from a newer format.
    #[error("Unsupported project version: {version}")]
    UnsupportedVersion { version: String },

    /// Project document violates a structural requirement.
    #[error("Invalid project file: {reason}")]
    InvalidProject { reason: String },

    /// Migration from an older format failed.
    #[error("Migration failed from version {from} to {to}: {reason}")]
    MigrationFailed {
        from: String,
        to: String,
        reason: String,
    },
}

impl ProjectError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidProject {
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProjectError::UnsupportedVersion {
            version: "9.0.0".into(),
        };
        assert!(err.to_string().contains("9.0.0"));

        let err = ProjectError::invalid("clip ends before it starts");
        assert!(err.to_string().contains("ends before"));

        let err = ProjectError::MigrationFailed {
            from: "0.1.0".into(),
            to: "1.0.0".into(),
            reason: "tracks is not an array".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.1.0") && msg.contains("1.0.0") && msg.contains("tracks"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let proj_err: ProjectError = json_err.into();
        assert!(matches!(proj_err, ProjectError::Json(_)));
    }
}
