//! The editor: document state plus the history that records its mutations.
//!
//! Every timeline mutation goes through [`Editor`], which captures the track
//! list before applying the edit and records it in the [`HistoryManager`] only
//! when the edit succeeds. Cursor, zoom, selection, beats and the edit session
//! are outside undo scope.

use std::collections::HashMap;

use sf_common::{BeatAnalysis, BeatMarker, EditError, EditResult, EditorConfig, Platform, SubtitleCue};
use tracing::{debug, warn};

use crate::edit_session::ClipEditSession;
use crate::history::HistoryManager;
use crate::playback::{PlaybackCursor, Transport};
use crate::selection::SelectionState;
use crate::snap;
use crate::snapshot::TimelineSnapshot;
use crate::state::{ClipTransform, TrackKind, TrackState, TransformPatch};
use crate::timeline::{DeletedClip, Timeline};

/// Everything the editing UI observes.
#[derive(Clone, Debug)]
pub struct EditorState {
    pub timeline: Timeline,
    pub cursor: PlaybackCursor,
    pub selection: SelectionState,
    /// The open clip-edit session, if any.
    pub edit_session: Option<ClipEditSession>,
    pub beats: Vec<BeatMarker>,
    pub bpm: Option<f64>,
    pub snap_enabled: bool,
    /// Global mute applied on top of per-track mute.
    pub master_muted: bool,
    pub platform: Platform,
}

/// Owns the document and its undo history.
#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    history: HistoryManager,
    config: EditorConfig,
    /// Probed length of each imported source, keyed by source path.
    media_durations: HashMap<String, u64>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Build an editor. A config that fails validation is replaced by the
    /// defaults.
    pub fn new(config: EditorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(error = %err, "Invalid editor config, using defaults");
                EditorConfig::default()
            }
        };
        let state = EditorState {
            timeline: Timeline::new(),
            cursor: PlaybackCursor::new(config.default_duration_ms, config.zoom.clone()),
            selection: SelectionState::new(),
            edit_session: None,
            beats: Vec::new(),
            bpm: None,
            snap_enabled: config.snap.enabled,
            master_muted: false,
            platform: Platform::default(),
        };
        Self {
            history: HistoryManager::new(config.history_depth),
            state,
            config,
            media_durations: HashMap::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.state.timeline
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.state.cursor
    }

    /// Mutable cursor for the playback engine.
    pub fn cursor_mut(&mut self) -> &mut PlaybackCursor {
        &mut self.state.cursor
    }

    /// The timeline together with the cursor, as the playback engine needs both.
    pub fn playback_view(&mut self) -> (&Timeline, &mut PlaybackCursor) {
        (&self.state.timeline, &mut self.state.cursor)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state.selection
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Reject ranges shorter than the configured minimum clip length.
    fn check_new_clip(&self, start_ms: u64, end_ms: u64) -> EditResult<()> {
        if start_ms >= end_ms {
            return Err(EditError::InvalidRange { start_ms, end_ms });
        }
        let min_ms = self.config.min_clip_duration_ms;
        if end_ms - start_ms < min_ms {
            return Err(EditError::TooShort {
                duration_ms: end_ms - start_ms,
                min_ms,
            });
        }
        Ok(())
    }

    /// Apply `edit` to the timeline, recording the prior state on success.
    fn commit<T>(
        &mut self,
        label: &str,
        edit: impl FnOnce(&mut Timeline) -> EditResult<T>,
    ) -> EditResult<T> {
        let before = TimelineSnapshot::capture(&self.state.timeline);
        let out = edit(&mut self.state.timeline)?;
        self.history.record(label, before);
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // Tracks
    // ---------------------------------------------------------------------

    pub fn add_track(&mut self, track: TrackState) -> EditResult<()> {
        self.commit("Add track", |tl| tl.add_track(track))
    }

    /// Remove a track; selection and edit session pointing into it are dropped.
    pub fn remove_track(&mut self, track_id: &str) -> EditResult<TrackState> {
        let removed = self.commit("Remove track", |tl| tl.remove_track(track_id))?;
        self.state
            .selection
            .forget_track(track_id, removed.clips.iter().map(|c| c.id.as_str()));
        if self
            .edit_session_clip()
            .is_some_and(|id| removed.clips.iter().any(|c| c.id == id))
        {
            self.close_edit_session();
        }
        Ok(removed)
    }

    pub fn toggle_track_mute(&mut self, track_id: &str) -> EditResult<bool> {
        self.commit("Toggle mute", |tl| tl.toggle_track_mute(track_id))
    }

    // ---------------------------------------------------------------------
    // Clips
    // ---------------------------------------------------------------------

    pub fn move_clip(&mut self, clip_id: &str, new_start_ms: i64) -> EditResult<()> {
        self.commit("Move clip", |tl| tl.move_clip(clip_id, new_start_ms))
    }

    /// Move a clip with its start snapped to the nearest beat when snapping is on.
    pub fn move_clip_snapped(&mut self, clip_id: &str, new_start_ms: i64) -> EditResult<()> {
        let start = self.snap_time(new_start_ms.max(0) as u64);
        self.move_clip(clip_id, start as i64)
    }

    pub fn trim_clip(&mut self, clip_id: &str, new_start_ms: u64, new_end_ms: u64) -> EditResult<()> {
        self.commit("Trim clip", |tl| tl.trim_clip(clip_id, new_start_ms, new_end_ms))
    }

    pub fn split_clip(&mut self, clip_id: &str, at_ms: u64) -> EditResult<(String, String)> {
        let ids = self.commit("Split clip", |tl| tl.split_clip(clip_id, at_ms))?;
        if self.state.selection.forget_clip(clip_id) {
            self.state.selection.select_clip(&ids.0, true);
        }
        Ok(ids)
    }

    /// Delete a clip; selection and edit session referencing it are cleared.
    pub fn delete_clip(&mut self, clip_id: &str) -> EditResult<DeletedClip> {
        let deleted = self.commit("Delete clip", |tl| tl.delete_clip(clip_id))?;
        self.state.selection.forget_clip(clip_id);
        if let Some(track_id) = &deleted.removed_track {
            self.state.selection.deselect_track(track_id);
        }
        if self.edit_session_clip() == Some(clip_id) {
            self.close_edit_session();
        }
        Ok(deleted)
    }

    pub fn update_clip_transform(
        &mut self,
        clip_id: &str,
        patch: &TransformPatch,
    ) -> EditResult<ClipTransform> {
        self.commit("Transform clip", |tl| tl.update_clip_transform(clip_id, patch))
    }

    // ---------------------------------------------------------------------
    // Imports
    // ---------------------------------------------------------------------

    /// Add a probed video file at 0. The timeline grows to fit it.
    pub fn add_video_clip(&mut self, source: &str, duration_ms: u64) -> EditResult<String> {
        self.check_new_clip(0, duration_ms)?;
        let id = self.commit("Add video", |tl| {
            tl.add_media_clip(TrackKind::Video, source, duration_ms)
        })?;
        self.media_durations.insert(source.to_string(), duration_ms);
        self.state.cursor.extend_duration(duration_ms);
        Ok(id)
    }

    pub fn add_audio_clip(&mut self, source: &str, duration_ms: u64) -> EditResult<String> {
        self.check_new_clip(0, duration_ms)?;
        let id = self.commit("Add audio", |tl| {
            tl.add_media_clip(TrackKind::Audio, source, duration_ms)
        })?;
        self.media_durations.insert(source.to_string(), duration_ms);
        Ok(id)
    }

    pub fn add_caption(&mut self, text: &str, start_ms: u64, end_ms: u64) -> EditResult<String> {
        self.check_new_clip(start_ms, end_ms)?;
        self.commit("Add caption", |tl| tl.add_caption(text, start_ms, end_ms))
    }

    /// Import parsed subtitle cues as one undo step. One cue below the
    /// minimum length rejects the whole import.
    pub fn import_caption_cues(&mut self, cues: &[SubtitleCue]) -> EditResult<Vec<String>> {
        for cue in cues {
            self.check_new_clip(cue.start_ms, cue.end_ms)?;
        }
        self.commit("Import subtitles", |tl| tl.add_caption_cues(cues))
    }

    /// Remember a probed source length so edit sessions can cap trims to it.
    pub fn register_media_duration(&mut self, source: &str, duration_ms: u64) {
        self.media_durations.insert(source.to_string(), duration_ms);
    }

    /// Replace the document with a loaded track list.
    ///
    /// History, selection and any edit session are discarded and the cursor
    /// rewinds to 0.
    pub fn load_tracks(&mut self, tracks: Vec<TrackState>, duration_ms: u64) {
        self.state.timeline = Timeline::from_tracks(tracks);
        self.state.cursor.rewind();
        self.state.cursor.set_duration(duration_ms);
        self.state.selection.clear();
        self.state.edit_session = None;
        self.history.clear();
        self.media_durations.clear();
        debug!(
            tracks = self.state.timeline.track_count(),
            clips = self.state.timeline.clip_count(),
            duration_ms,
            "Document loaded"
        );
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Restore the previous track list. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = TimelineSnapshot::capture(&self.state.timeline);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone track list. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = TimelineSnapshot::capture(&self.state.timeline);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Restore without recording, then drop pointers to clips that vanished.
    fn restore(&mut self, snapshot: TimelineSnapshot) {
        self.state.timeline = snapshot.into_timeline();
        let timeline = &self.state.timeline;
        let gone: Vec<String> = self
            .state
            .selection
            .selected_clips()
            .iter()
            .filter(|id| timeline.find_clip(id).is_none())
            .cloned()
            .collect();
        for id in &gone {
            self.state.selection.forget_clip(id);
        }
        let gone_tracks: Vec<String> = self
            .state
            .selection
            .selected_tracks()
            .iter()
            .filter(|id| timeline.find_track(id).is_none())
            .cloned()
            .collect();
        for id in &gone_tracks {
            self.state.selection.deselect_track(id);
        }
        if self
            .edit_session_clip()
            .is_some_and(|id| self.state.timeline.find_clip(id).is_none())
        {
            self.close_edit_session();
        }
    }

    /// Start a continuous gesture (drag, slider). Edits until
    /// [`end_gesture`](Self::end_gesture) collapse into one undo step.
    pub fn begin_gesture(&mut self, label: &str) {
        let before = TimelineSnapshot::capture(&self.state.timeline);
        self.history.pause(label, before);
    }

    /// Close the gesture. Returns whether an undo step was recorded.
    pub fn end_gesture(&mut self) -> bool {
        let current = TimelineSnapshot::capture(&self.state.timeline);
        self.history.resume(&current)
    }

    // ---------------------------------------------------------------------
    // Cursor, selection, beats
    // ---------------------------------------------------------------------

    pub fn seek(&mut self, ms: f64) {
        self.state.cursor.set_current_time(ms);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.state.cursor.set_zoom(zoom);
    }

    pub fn set_master_muted(&mut self, muted: bool) {
        self.state.master_muted = muted;
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.state.platform = platform;
    }

    pub fn select_clip(&mut self, clip_id: &str, multi: bool) -> EditResult<()> {
        if self.state.timeline.find_clip(clip_id).is_none() {
            return Err(EditError::ClipNotFound(clip_id.to_string()));
        }
        self.state.selection.select_clip(clip_id, multi);
        Ok(())
    }

    pub fn select_track(&mut self, track_id: &str, multi: bool) -> EditResult<()> {
        if self.state.timeline.find_track(track_id).is_none() {
            return Err(EditError::TrackNotFound(track_id.to_string()));
        }
        self.state.selection.select_track(track_id, multi);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Store a beat analysis. Beats are kept sorted by time.
    pub fn set_beats(&mut self, analysis: BeatAnalysis) {
        self.load_beats(analysis.beats, Some(analysis.bpm));
    }

    /// Replace the beat markers, e.g. from a saved project that may not
    /// carry a tempo.
    pub fn load_beats(&mut self, mut beats: Vec<BeatMarker>, bpm: Option<f64>) {
        beats.sort_by_key(|b| b.time_ms);
        debug!(count = beats.len(), bpm = ?bpm, "Beats set");
        self.state.beats = beats;
        self.state.bpm = bpm;
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.state.snap_enabled = enabled;
    }

    /// `time_ms` snapped to a nearby beat, or unchanged when snapping is off.
    pub fn snap_time(&self, time_ms: u64) -> u64 {
        if !self.state.snap_enabled {
            return time_ms;
        }
        snap::snap_to_beat(&self.state.beats, time_ms, self.config.snap.threshold_ms)
    }

    // ---------------------------------------------------------------------
    // Clip-edit session
    // ---------------------------------------------------------------------

    /// Open the modal editor on a clip. Playback is stopped through
    /// `transport` before this returns.
    pub fn open_edit_session(
        &mut self,
        clip_id: &str,
        transport: &mut dyn Transport,
    ) -> EditResult<&mut ClipEditSession> {
        let clip = self
            .state
            .timeline
            .find_clip(clip_id)
            .ok_or_else(|| EditError::ClipNotFound(clip_id.to_string()))?;
        let source_duration = clip
            .source
            .as_deref()
            .and_then(|src| self.media_durations.get(src).copied());
        let session = ClipEditSession::open(
            clip,
            source_duration,
            self.state.cursor.duration_ms(),
            self.config.min_clip_duration_ms,
        );
        transport.interrupt_playback(&self.state.timeline, &mut self.state.cursor);
        self.state.cursor.set_playing(false);
        Ok(self.state.edit_session.insert(session))
    }

    pub fn edit_session(&self) -> Option<&ClipEditSession> {
        self.state.edit_session.as_ref()
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut ClipEditSession> {
        self.state.edit_session.as_mut()
    }

    fn edit_session_clip(&self) -> Option<&str> {
        self.state.edit_session.as_ref().map(ClipEditSession::clip_id)
    }

    /// Discard the session and its staged changes.
    pub fn close_edit_session(&mut self) {
        if let Some(session) = self.state.edit_session.take() {
            debug!(clip_id = %session.clip_id(), "Clip edit session closed");
        }
    }

    /// Commit the staged range as one trim and close the session. Returns
    /// whether the clip changed.
    pub fn apply_edit_session(&mut self) -> EditResult<bool> {
        let session = self.state.edit_session.as_ref().ok_or(EditError::NoEditSession)?;
        let changed = match session.staged_trim() {
            Some((start, end)) => {
                let clip_id = session.clip_id().to_string();
                self.trim_clip(&clip_id, start, end)?;
                true
            }
            None => false,
        };
        self.close_edit_session();
        Ok(changed)
    }

    /// Split the session's clip at its cursor and close the session.
    pub fn split_at_edit_cursor(&mut self) -> EditResult<(String, String)> {
        let session = self.state.edit_session.as_ref().ok_or(EditError::NoEditSession)?;
        let at = session.split_point().ok_or(EditError::SplitOutOfRange {
            at_ms: session.cursor_ms(),
            start_ms: session.start_ms(),
            end_ms: session.end_ms(),
        })?;
        let clip_id = session.clip_id().to_string();
        let ids = self.split_clip(&clip_id, at)?;
        self.close_edit_session();
        Ok(ids)
    }

    /// Delete the session's clip (the session closes with it).
    pub fn delete_edit_clip(&mut self) -> EditResult<DeletedClip> {
        let clip_id = self
            .edit_session_clip()
            .ok_or(EditError::NoEditSession)?
            .to_string();
        self.delete_clip(&clip_id)
    }
}
