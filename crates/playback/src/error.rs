//! Media element error types (thiserror-based).

use thiserror::Error;

/// Failure of a single media element. Never fatal to playback as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The element for a clip could not be created or its source failed to load.
    #[error("Failed to load media for clip {clip_id}: {reason}")]
    Load { clip_id: String, reason: String },

    /// The element refused to start playing.
    #[error("Playback failed for clip {clip_id}: {reason}")]
    Play { clip_id: String, reason: String },

    /// The clip has no source to load.
    #[error("Clip {0} has no media source")]
    NoSource(String),
}

impl MediaError {
    pub fn clip_id(&self) -> &str {
        match self {
            Self::Load { clip_id, .. } | Self::Play { clip_id, .. } => clip_id,
            Self::NoSource(clip_id) => clip_id,
        }
    }
}
