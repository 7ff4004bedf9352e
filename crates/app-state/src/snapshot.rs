//! Track-list snapshots for undo/redo.
//!
//! Only the track list is captured. Cursor, zoom, selection and beat markers
//! are outside undo scope.

use serde::{Deserialize, Serialize};

use crate::state::{ClipState, TrackState};
use crate::timeline::Timeline;

/// Immutable copy of the track list at one point in history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    tracks: Vec<TrackState>,
}

impl TimelineSnapshot {
    /// Capture the current track list.
    pub fn capture(timeline: &Timeline) -> Self {
        Self {
            tracks: timeline.tracks().to_vec(),
        }
    }

    /// Rebuild the timeline this snapshot was taken from.
    pub fn restore(&self) -> Timeline {
        tracing::debug!(
            tracks = self.tracks.len(),
            clips = self.clip_count(),
            "Snapshot restored"
        );
        Timeline::from_tracks(self.tracks.clone())
    }

    /// Consume the snapshot into a timeline without cloning.
    pub fn into_timeline(self) -> Timeline {
        Timeline::from_tracks(self.tracks)
    }

    pub fn tracks(&self) -> &[TrackState] {
        &self.tracks
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    /// Rough memory footprint in bytes, for budgeting history depth.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for track in &self.tracks {
            size += std::mem::size_of::<TrackState>();
            size += track.id.len() + track.label.len();
            for clip in &track.clips {
                size += std::mem::size_of::<ClipState>();
                size += clip.id.len() + clip.track_id.len() + clip.label.len() + clip.color.len();
                size += clip.source.as_ref().map_or(0, String::len);
            }
        }
        size
    }
}

impl From<&Timeline> for TimelineSnapshot {
    fn from(timeline: &Timeline) -> Self {
        Self::capture(timeline)
    }
}
