//! Conversion between the project wire form and the editor's timeline.

use sf_app_state::{ClipState, Editor, Timeline, TrackState};
use tracing::{debug, info};

use crate::types::{ClipData, ProjectFile, TrackData};

impl From<&ClipState> for ClipData {
    fn from(clip: &ClipState) -> Self {
        Self {
            id: clip.id.clone(),
            track_id: clip.track_id.clone(),
            kind: clip.kind,
            start_ms: clip.start_ms,
            end_ms: clip.end_ms,
            label: clip.label.clone(),
            source: clip.source.clone(),
            color: clip.color.clone(),
            transform: clip.transform.filter(|t| !t.is_default()),
        }
    }
}

impl From<&TrackState> for TrackData {
    fn from(track: &TrackState) -> Self {
        let label = (track.label != track.kind.default_label()).then(|| track.label.clone());
        Self {
            id: track.id.clone(),
            kind: track.kind,
            label,
            muted: track.muted,
            clips: track.clips.iter().map(ClipData::from).collect(),
        }
    }
}

impl TrackData {
    /// The editor track. Clips are re-parented onto this track and take its kind.
    pub fn to_track_state(&self) -> TrackState {
        let mut track = TrackState::new(self.id.clone(), self.kind);
        if let Some(label) = &self.label {
            track.label = label.clone();
        }
        track.muted = self.muted;
        track.clips = self
            .clips
            .iter()
            .map(|clip| ClipState {
                id: clip.id.clone(),
                track_id: self.id.clone(),
                kind: self.kind,
                start_ms: clip.start_ms,
                end_ms: clip.end_ms,
                label: clip.label.clone(),
                source: clip.source.clone(),
                color: clip.color.clone(),
                transform: clip.transform.filter(|t| !t.is_default()),
            })
            .collect();
        track
    }
}

impl ProjectFile {
    /// Capture the editor's document under a new project name.
    pub fn from_editor(editor: &Editor, name: impl Into<String>) -> Self {
        let mut project = Self::new(name, editor.state().platform);
        project.sync_from_editor(editor);
        project
    }

    /// Overwrite tracks, beats, platform and duration from the editor,
    /// keeping name and creation time.
    pub fn sync_from_editor(&mut self, editor: &Editor) {
        let state = editor.state();
        self.metadata.platform = state.platform;
        self.canvas.duration_ms = state.cursor.duration_ms();
        self.tracks = state.timeline.tracks().iter().map(TrackData::from).collect();
        self.beat_markers = state.beats.clone();
        self.bpm = state.bpm;
        debug!(
            project_name = %self.metadata.name,
            tracks = self.tracks.len(),
            clips = self.clip_count(),
            "Project captured from editor"
        );
    }

    pub fn to_timeline(&self) -> Timeline {
        Timeline::from_tracks(self.tracks.iter().map(TrackData::to_track_state).collect())
    }

    /// Timeline length to load with: the stored duration, or when unset the
    /// longer of the content and `default_ms`.
    pub fn effective_duration_ms(&self, default_ms: u64) -> u64 {
        if self.canvas.duration_ms > 0 {
            return self.canvas.duration_ms;
        }
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter().map(|c| c.end_ms))
            .max()
            .unwrap_or(0)
            .max(default_ms)
    }

    /// Replace the editor's document with this project.
    ///
    /// History, selection and the edit session are discarded and the cursor
    /// rewinds to 0.
    pub fn load_into(&self, editor: &mut Editor) {
        let duration = self.effective_duration_ms(editor.config().default_duration_ms);
        let tracks = self.tracks.iter().map(TrackData::to_track_state).collect();
        editor.load_tracks(tracks, duration);
        editor.set_platform(self.metadata.platform);
        editor.load_beats(self.beat_markers.clone(), self.bpm);
        info!(
            project_name = %self.metadata.name,
            tracks = self.tracks.len(),
            clips = self.clip_count(),
            duration_ms = duration,
            "Project loaded into editor"
        );
    }
}
