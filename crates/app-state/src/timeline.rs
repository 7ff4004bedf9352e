//! The track list and every structural mutation on it.
//!
//! All mutators return an [`EditResult`]; a rejected edit leaves the timeline
//! untouched. Callers that must never fail (drag handlers) discard the error,
//! see [`crate::commands`].

use serde::{Deserialize, Serialize};
use sf_common::{EditError, EditResult, SubtitleCue};
use tracing::debug;

use crate::state::{ClipState, ClipTransform, TrackKind, TrackState, TransformPatch};

/// Caption clips created from subtitle cues keep at most this many characters
/// in their label.
pub const CUE_LABEL_CHARS: usize = 20;

/// Generate a fresh, globally unique clip id.
pub fn new_clip_id() -> String {
    format!("clip-{}", uuid::Uuid::new_v4().simple())
}

/// What `delete_clip` removed.
#[derive(Clone, Debug, PartialEq)]
pub struct DeletedClip {
    pub clip: ClipState,
    /// Set when the clip was the last one on its track and the track went too.
    pub removed_track: Option<String>,
}

/// Ordered list of tracks making up the edit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    tracks: Vec<TrackState>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<TrackState>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[TrackState] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<TrackState> {
        self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    pub fn clips(&self) -> impl Iterator<Item = &ClipState> {
        self.tracks.iter().flat_map(|t| t.clips.iter())
    }

    pub fn find_track(&self, track_id: &str) -> Option<&TrackState> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    fn find_track_mut(&mut self, track_id: &str) -> Option<&mut TrackState> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub fn find_clip(&self, clip_id: &str) -> Option<&ClipState> {
        self.clips().find(|c| c.id == clip_id)
    }

    /// Track owning the clip.
    pub fn track_of(&self, clip_id: &str) -> Option<&TrackState> {
        self.tracks
            .iter()
            .find(|t| t.clips.iter().any(|c| c.id == clip_id))
    }

    fn find_clip_mut(&mut self, clip_id: &str) -> EditResult<&mut ClipState> {
        self.tracks
            .iter_mut()
            .flat_map(|t| t.clips.iter_mut())
            .find(|c| c.id == clip_id)
            .ok_or_else(|| EditError::ClipNotFound(clip_id.to_string()))
    }

    /// Latest clip end across all tracks.
    pub fn content_end_ms(&self) -> u64 {
        self.tracks.iter().map(TrackState::end_ms).max().unwrap_or(0)
    }

    /// Clips of `kind` whose range contains `time_ms`, in track order.
    pub fn active_clips_at(
        &self,
        kind: TrackKind,
        time_ms: f64,
    ) -> impl Iterator<Item = (&TrackState, &ClipState)> {
        self.tracks
            .iter()
            .filter(move |t| t.kind == kind)
            .flat_map(|t| t.clips.iter().map(move |c| (t, c)))
            .filter(move |(_, c)| c.kind == kind && c.contains(time_ms))
    }

    // ---------------------------------------------------------------------
    // Track mutations
    // ---------------------------------------------------------------------

    /// Append a track. A track with the same id already present is kept and
    /// the new one is rejected.
    pub fn add_track(&mut self, track: TrackState) -> EditResult<()> {
        if self.find_track(&track.id).is_some() {
            return Err(EditError::DuplicateTrack(track.id));
        }
        for clip in &track.clips {
            if clip.start_ms >= clip.end_ms {
                return Err(EditError::InvalidRange {
                    start_ms: clip.start_ms,
                    end_ms: clip.end_ms,
                });
            }
        }
        debug!(track_id = %track.id, kind = ?track.kind, clips = track.clips.len(), "Track added");
        self.tracks.push(track);
        Ok(())
    }

    /// Remove a track and all of its clips.
    pub fn remove_track(&mut self, track_id: &str) -> EditResult<TrackState> {
        let idx = self
            .tracks
            .iter()
            .position(|t| t.id == track_id)
            .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
        let track = self.tracks.remove(idx);
        debug!(track_id, clips = track.clips.len(), "Track removed");
        Ok(track)
    }

    /// Flip a track's mute flag, returning the new value.
    pub fn toggle_track_mute(&mut self, track_id: &str) -> EditResult<bool> {
        let track = self
            .find_track_mut(track_id)
            .ok_or_else(|| EditError::TrackNotFound(track_id.to_string()))?;
        track.muted = !track.muted;
        debug!(track_id, muted = track.muted, "Track mute toggled");
        Ok(track.muted)
    }

    // ---------------------------------------------------------------------
    // Clip mutations
    // ---------------------------------------------------------------------

    /// Relocate a clip, keeping its duration. Negative starts clamp to 0.
    /// Overlap with other clips is left as is.
    pub fn move_clip(&mut self, clip_id: &str, new_start_ms: i64) -> EditResult<()> {
        let clip = self.find_clip_mut(clip_id)?;
        let duration = clip.duration_ms();
        let start = new_start_ms.max(0) as u64;
        clip.start_ms = start;
        clip.end_ms = start.saturating_add(duration);
        debug!(clip_id, start_ms = start, end_ms = clip.end_ms, "Clip moved");
        Ok(())
    }

    /// Set both bounds of a clip.
    ///
    /// Only `start < end` is checked here. Minimum duration and source length
    /// are the caller's concern since the timeline knows neither.
    pub fn trim_clip(&mut self, clip_id: &str, new_start_ms: u64, new_end_ms: u64) -> EditResult<()> {
        let clip = self.find_clip_mut(clip_id)?;
        if new_start_ms >= new_end_ms {
            return Err(EditError::InvalidRange {
                start_ms: new_start_ms,
                end_ms: new_end_ms,
            });
        }
        clip.start_ms = new_start_ms;
        clip.end_ms = new_end_ms;
        debug!(clip_id, start_ms = new_start_ms, end_ms = new_end_ms, "Clip trimmed");
        Ok(())
    }

    /// Replace a clip with two adjacent clips meeting at `at_ms`.
    ///
    /// Both halves get fresh ids and inherit every other field. Returns the
    /// ids of the left and right halves.
    pub fn split_clip(&mut self, clip_id: &str, at_ms: u64) -> EditResult<(String, String)> {
        let (track_idx, clip_idx) = self
            .tracks
            .iter()
            .enumerate()
            .find_map(|(ti, t)| t.clips.iter().position(|c| c.id == clip_id).map(|ci| (ti, ci)))
            .ok_or_else(|| EditError::ClipNotFound(clip_id.to_string()))?;

        let clips = &mut self.tracks[track_idx].clips;
        let original = &clips[clip_idx];
        if !(original.start_ms < at_ms && at_ms < original.end_ms) {
            return Err(EditError::SplitOutOfRange {
                at_ms,
                start_ms: original.start_ms,
                end_ms: original.end_ms,
            });
        }

        let mut left = original.clone();
        left.id = new_clip_id();
        left.end_ms = at_ms;

        let mut right = original.clone();
        right.id = new_clip_id();
        right.start_ms = at_ms;

        let ids = (left.id.clone(), right.id.clone());
        clips.splice(clip_idx..=clip_idx, [left, right]);
        debug!(clip_id, at_ms, left = %ids.0, right = %ids.1, "Clip split");
        Ok(ids)
    }

    /// Remove a clip; an emptied track is removed with it.
    pub fn delete_clip(&mut self, clip_id: &str) -> EditResult<DeletedClip> {
        let (track_idx, clip_idx) = self
            .tracks
            .iter()
            .enumerate()
            .find_map(|(ti, t)| t.clips.iter().position(|c| c.id == clip_id).map(|ci| (ti, ci)))
            .ok_or_else(|| EditError::ClipNotFound(clip_id.to_string()))?;

        let clip = self.tracks[track_idx].clips.remove(clip_idx);
        let removed_track = if self.tracks[track_idx].clips.is_empty() {
            Some(self.tracks.remove(track_idx).id)
        } else {
            None
        };
        debug!(clip_id, removed_track = ?removed_track, "Clip deleted");
        Ok(DeletedClip {
            clip,
            removed_track,
        })
    }

    /// Merge a partial transform onto the clip's current (or default) transform.
    pub fn update_clip_transform(
        &mut self,
        clip_id: &str,
        patch: &TransformPatch,
    ) -> EditResult<ClipTransform> {
        let clip = self.find_clip_mut(clip_id)?;
        let merged = clip.effective_transform().merged(patch);
        clip.transform = Some(merged);
        debug!(clip_id, x = merged.x, y = merged.y, scale_x = merged.scale_x, scale_y = merged.scale_y, "Clip transform updated");
        Ok(merged)
    }

    // ---------------------------------------------------------------------
    // Imports
    // ---------------------------------------------------------------------

    /// Place a media file at 0 on the first track of `kind`, creating that
    /// track if none exists. Returns the new clip id.
    pub fn add_media_clip(&mut self, kind: TrackKind, source: &str, duration_ms: u64) -> EditResult<String> {
        if duration_ms == 0 {
            return Err(EditError::InvalidRange {
                start_ms: 0,
                end_ms: 0,
            });
        }
        let label = source
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(kind.default_label())
            .to_string();

        let track_idx = self.track_index_for(kind);
        let track = &mut self.tracks[track_idx];
        let clip = ClipState {
            id: new_clip_id(),
            track_id: track.id.clone(),
            kind,
            start_ms: 0,
            end_ms: duration_ms,
            label,
            source: Some(source.to_string()),
            color: kind.color().to_string(),
            transform: None,
        };
        let id = clip.id.clone();
        debug!(clip_id = %id, track_id = %track.id, source, duration_ms, "Media clip added");
        track.clips.push(clip);
        Ok(id)
    }

    /// Add a user-authored caption spanning `[start_ms, end_ms)`.
    pub fn add_caption(&mut self, text: &str, start_ms: u64, end_ms: u64) -> EditResult<String> {
        if start_ms >= end_ms {
            return Err(EditError::InvalidRange { start_ms, end_ms });
        }
        let track_idx = self.track_index_for(TrackKind::Caption);
        let track = &mut self.tracks[track_idx];
        let clip = caption_clip(&track.id, text.to_string(), start_ms, end_ms);
        let id = clip.id.clone();
        track.clips.push(clip);
        debug!(clip_id = %id, start_ms, end_ms, "Caption added");
        Ok(id)
    }

    /// Turn parsed subtitle cues into caption clips on the first caption track.
    ///
    /// All cues are validated before any is added.
    pub fn add_caption_cues(&mut self, cues: &[SubtitleCue]) -> EditResult<Vec<String>> {
        if let Some(bad) = cues.iter().find(|c| c.start_ms >= c.end_ms) {
            return Err(EditError::InvalidRange {
                start_ms: bad.start_ms,
                end_ms: bad.end_ms,
            });
        }
        if cues.is_empty() {
            return Ok(Vec::new());
        }
        let track_idx = self.track_index_for(TrackKind::Caption);
        let track = &mut self.tracks[track_idx];
        let mut ids = Vec::with_capacity(cues.len());
        for cue in cues {
            let label: String = cue.text.chars().take(CUE_LABEL_CHARS).collect();
            let clip = caption_clip(&track.id, label, cue.start_ms, cue.end_ms);
            ids.push(clip.id.clone());
            track.clips.push(clip);
        }
        debug!(track_id = %track.id, count = ids.len(), "Caption cues imported");
        Ok(ids)
    }

    /// Index of the first track of `kind`, appending a new one when absent.
    fn track_index_for(&mut self, kind: TrackKind) -> usize {
        if let Some(idx) = self.tracks.iter().position(|t| t.kind == kind) {
            return idx;
        }
        let id = (1..)
            .map(|n| format!("{}-{n}", kind.id_prefix()))
            .find(|id| self.find_track(id).is_none())
            .unwrap_or_else(|| format!("{}-{}", kind.id_prefix(), uuid::Uuid::new_v4().simple()));
        debug!(track_id = %id, kind = ?kind, "Track created implicitly");
        self.tracks.push(TrackState::new(id, kind));
        self.tracks.len() - 1
    }
}

fn caption_clip(track_id: &str, label: String, start_ms: u64, end_ms: u64) -> ClipState {
    ClipState {
        id: new_clip_id(),
        track_id: track_id.to_string(),
        kind: TrackKind::Caption,
        start_ms,
        end_ms,
        label,
        source: None,
        color: TrackKind::Caption.color().to_string(),
        transform: None,
    }
}
