//! Central error types for the editing core (thiserror-based).

use thiserror::Error;

/// Why a timeline edit was rejected.
///
/// Edits never panic; a rejection leaves the timeline exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid range: start {start_ms} ms must be before end {end_ms} ms")]
    InvalidRange { start_ms: u64, end_ms: u64 },

    #[error("Clip too short: {duration_ms} ms (minimum {min_ms} ms)")]
    TooShort { duration_ms: u64, min_ms: u64 },

    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Track already exists: {0}")]
    DuplicateTrack(String),

    #[error("Split point {at_ms} ms is outside clip range [{start_ms}, {end_ms}]")]
    SplitOutOfRange {
        at_ms: u64,
        start_ms: u64,
        end_ms: u64,
    },

    #[error("No clip edit session is open")]
    NoEditSession,

    #[error("Invalid timecode: {0}")]
    InvalidTimecode(#[from] TimecodeError),
}

/// Timecode / seconds text that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    #[error("Malformed timecode: {0:?}")]
    Malformed(String),

    #[error("Timecode out of range: {0:?}")]
    OutOfRange(String),
}

/// Failure reported by an external collaborator (probe, export, ...).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{service} failed: {reason}")]
    Failed {
        service: &'static str,
        reason: String,
    },

    #[error("Unsupported input: {0}")]
    Unsupported(String),

    #[error("Service cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading / validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Convenience Result type for timeline edits.
pub type EditResult<T> = Result<T, EditError>;

/// Convenience Result type for external service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
