//! Clip and track selection.
//!
//! Selection is outside undo scope. It only holds ids, so the editor must
//! drop ids of clips and tracks that stop existing (`forget_clip`, `forget_track`).

use serde::{Deserialize, Serialize};

/// Tracks which clips and tracks are currently selected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_clips: Vec<String>,
    selected_tracks: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a clip, replacing the clip selection unless `multi`.
    pub fn select_clip(&mut self, clip_id: &str, multi: bool) {
        if !multi {
            self.selected_clips.clear();
        }
        if !self.is_clip_selected(clip_id) {
            self.selected_clips.push(clip_id.to_string());
        }
    }

    pub fn deselect_clip(&mut self, clip_id: &str) {
        self.selected_clips.retain(|id| id != clip_id);
    }

    /// Select a track, replacing the track selection unless `multi`.
    pub fn select_track(&mut self, track_id: &str, multi: bool) {
        if !multi {
            self.selected_tracks.clear();
        }
        if !self.is_track_selected(track_id) {
            self.selected_tracks.push(track_id.to_string());
        }
    }

    pub fn deselect_track(&mut self, track_id: &str) {
        self.selected_tracks.retain(|id| id != track_id);
    }

    /// Drop a clip that no longer exists. Returns whether it was selected.
    pub fn forget_clip(&mut self, clip_id: &str) -> bool {
        let before = self.selected_clips.len();
        self.deselect_clip(clip_id);
        before != self.selected_clips.len()
    }

    /// Drop a removed track along with any of its clips.
    pub fn forget_track<'a>(&mut self, track_id: &str, clip_ids: impl IntoIterator<Item = &'a str>) {
        self.deselect_track(track_id);
        for clip_id in clip_ids {
            self.deselect_clip(clip_id);
        }
    }

    pub fn clear(&mut self) {
        self.selected_clips.clear();
        self.selected_tracks.clear();
    }

    pub fn selected_clips(&self) -> &[String] {
        &self.selected_clips
    }

    /// The most recently selected clip, the one single-clip tools act on.
    pub fn primary_clip(&self) -> Option<&str> {
        self.selected_clips.last().map(String::as_str)
    }

    pub fn selected_tracks(&self) -> &[String] {
        &self.selected_tracks
    }

    pub fn is_clip_selected(&self, clip_id: &str) -> bool {
        self.selected_clips.iter().any(|id| id == clip_id)
    }

    pub fn is_track_selected(&self, track_id: &str) -> bool {
        self.selected_tracks.iter().any(|id| id == track_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_clips.is_empty() && self.selected_tracks.is_empty()
    }
}
