//! Every user action on the editor expressed as an [`EditorCommand`].
//!
//! UI code emits commands and the host feeds them to [`Editor::dispatch`],
//! which never fails: a rejected command is logged at debug and dropped, and
//! the document is left exactly as it was. The host passes its [`Transport`]
//! along so commands that stop playback do so before returning.

use sf_common::{EditError, EditResult, Platform, SubtitleCue};

use crate::edit_session::ClipEditSession;
use crate::editor::Editor;
use crate::playback::Transport;
use crate::state::{TrackState, TransformPatch};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // ── Tracks ───────────────────────────────────────────────────────────────
    AddTrack(TrackState),
    RemoveTrack(String),
    ToggleTrackMute(String),

    // ── Clips ────────────────────────────────────────────────────────────────
    /// `snap` applies beat snapping to the new start when snapping is enabled.
    MoveClip { clip_id: String, start_ms: i64, snap: bool },
    TrimClip { clip_id: String, start_ms: u64, end_ms: u64 },
    SplitClip { clip_id: String, at_ms: u64 },
    DeleteClip(String),
    UpdateClipTransform { clip_id: String, patch: TransformPatch },

    // ── Imports ──────────────────────────────────────────────────────────────
    AddVideoClip { source: String, duration_ms: u64 },
    AddAudioClip { source: String, duration_ms: u64 },
    AddCaption { text: String, start_ms: u64, end_ms: u64 },
    ImportCaptionCues(Vec<SubtitleCue>),

    // ── History ──────────────────────────────────────────────────────────────
    Undo,
    Redo,
    /// Start a drag or slider gesture; edits until `EndGesture` are one undo step.
    BeginGesture(String),
    EndGesture,

    // ── Cursor / view ────────────────────────────────────────────────────────
    Seek(f64),
    SetZoom(f64),
    ZoomIn,
    ZoomOut,
    SetMasterMuted(bool),
    SetSnapEnabled(bool),
    SetPlatform(Platform),

    // ── Selection ────────────────────────────────────────────────────────────
    SelectClip { clip_id: String, multi: bool },
    SelectTrack { track_id: String, multi: bool },
    ClearSelection,

    // ── Clip-edit session ────────────────────────────────────────────────────
    OpenEditSession(String),
    CloseEditSession,
    CommitStartText(String),
    CommitEndText(String),
    CommitCursorText(String),
    CommitDurationText(String),
    StepCursor(i64),
    SetInAtCursor,
    SetOutAtCursor,
    DragStartHandle(f64),
    DragEndHandle(f64),
    SlideRange(f64),
    SetEditCursor(f64),
    ApplyEditSession,
    SplitAtEditCursor,
    DeleteEditClip,
}

impl EditorCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTrack(_) => "add_track",
            Self::RemoveTrack(_) => "remove_track",
            Self::ToggleTrackMute(_) => "toggle_track_mute",
            Self::MoveClip { .. } => "move_clip",
            Self::TrimClip { .. } => "trim_clip",
            Self::SplitClip { .. } => "split_clip",
            Self::DeleteClip(_) => "delete_clip",
            Self::UpdateClipTransform { .. } => "update_clip_transform",
            Self::AddVideoClip { .. } => "add_video_clip",
            Self::AddAudioClip { .. } => "add_audio_clip",
            Self::AddCaption { .. } => "add_caption",
            Self::ImportCaptionCues(_) => "import_caption_cues",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::BeginGesture(_) => "begin_gesture",
            Self::EndGesture => "end_gesture",
            Self::Seek(_) => "seek",
            Self::SetZoom(_) => "set_zoom",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::SetMasterMuted(_) => "set_master_muted",
            Self::SetSnapEnabled(_) => "set_snap_enabled",
            Self::SetPlatform(_) => "set_platform",
            Self::SelectClip { .. } => "select_clip",
            Self::SelectTrack { .. } => "select_track",
            Self::ClearSelection => "clear_selection",
            Self::OpenEditSession(_) => "open_edit_session",
            Self::CloseEditSession => "close_edit_session",
            Self::CommitStartText(_) => "commit_start_text",
            Self::CommitEndText(_) => "commit_end_text",
            Self::CommitCursorText(_) => "commit_cursor_text",
            Self::CommitDurationText(_) => "commit_duration_text",
            Self::StepCursor(_) => "step_cursor",
            Self::SetInAtCursor => "set_in_at_cursor",
            Self::SetOutAtCursor => "set_out_at_cursor",
            Self::DragStartHandle(_) => "drag_start_handle",
            Self::DragEndHandle(_) => "drag_end_handle",
            Self::SlideRange(_) => "slide_range",
            Self::SetEditCursor(_) => "set_edit_cursor",
            Self::ApplyEditSession => "apply_edit_session",
            Self::SplitAtEditCursor => "split_at_edit_cursor",
            Self::DeleteEditClip => "delete_edit_clip",
        }
    }
}

impl Editor {
    /// Run a command. Returns whether it was applied; rejections are logged
    /// and leave the editor unchanged.
    pub fn dispatch(&mut self, command: EditorCommand, transport: &mut dyn Transport) -> bool {
        let name = command.name();
        match self.execute(command, transport) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(command = name, error = %err, "Command rejected");
                false
            }
        }
    }

    fn execute(&mut self, command: EditorCommand, transport: &mut dyn Transport) -> EditResult<()> {
        use EditorCommand as C;

        match command {
            C::AddTrack(track) => self.add_track(track),
            C::RemoveTrack(id) => self.remove_track(&id).map(drop),
            C::ToggleTrackMute(id) => self.toggle_track_mute(&id).map(drop),

            C::MoveClip { clip_id, start_ms, snap: true } => self.move_clip_snapped(&clip_id, start_ms),
            C::MoveClip { clip_id, start_ms, snap: false } => self.move_clip(&clip_id, start_ms),
            C::TrimClip { clip_id, start_ms, end_ms } => self.trim_clip(&clip_id, start_ms, end_ms),
            C::SplitClip { clip_id, at_ms } => self.split_clip(&clip_id, at_ms).map(drop),
            C::DeleteClip(id) => self.delete_clip(&id).map(drop),
            C::UpdateClipTransform { clip_id, patch } => {
                self.update_clip_transform(&clip_id, &patch).map(drop)
            }

            C::AddVideoClip { source, duration_ms } => self.add_video_clip(&source, duration_ms).map(drop),
            C::AddAudioClip { source, duration_ms } => self.add_audio_clip(&source, duration_ms).map(drop),
            C::AddCaption { text, start_ms, end_ms } => self.add_caption(&text, start_ms, end_ms).map(drop),
            C::ImportCaptionCues(cues) => self.import_caption_cues(&cues).map(drop),

            C::Undo => {
                self.undo();
                Ok(())
            }
            C::Redo => {
                self.redo();
                Ok(())
            }
            C::BeginGesture(label) => {
                self.begin_gesture(&label);
                Ok(())
            }
            C::EndGesture => {
                self.end_gesture();
                Ok(())
            }

            C::Seek(ms) => {
                self.seek(ms);
                Ok(())
            }
            C::SetZoom(zoom) => {
                self.set_zoom(zoom);
                Ok(())
            }
            C::ZoomIn => {
                self.cursor_mut().zoom_in();
                Ok(())
            }
            C::ZoomOut => {
                self.cursor_mut().zoom_out();
                Ok(())
            }
            C::SetMasterMuted(muted) => {
                self.set_master_muted(muted);
                Ok(())
            }
            C::SetSnapEnabled(enabled) => {
                self.set_snap_enabled(enabled);
                Ok(())
            }
            C::SetPlatform(platform) => {
                self.set_platform(platform);
                Ok(())
            }

            C::SelectClip { clip_id, multi } => self.select_clip(&clip_id, multi),
            C::SelectTrack { track_id, multi } => self.select_track(&track_id, multi),
            C::ClearSelection => {
                self.clear_selection();
                Ok(())
            }

            C::OpenEditSession(id) => self.open_edit_session(&id, transport).map(drop),
            C::CloseEditSession => {
                self.close_edit_session();
                Ok(())
            }
            C::CommitStartText(text) => self.in_session(|s| s.commit_start_text(&text)),
            C::CommitEndText(text) => self.in_session(|s| s.commit_end_text(&text)),
            C::CommitCursorText(text) => self.in_session(|s| s.commit_cursor_text(&text)),
            C::CommitDurationText(text) => self.in_session(|s| s.commit_duration_text(&text)),
            C::StepCursor(delta) => self.in_session(|s| {
                s.step_cursor(delta);
                Ok(())
            }),
            C::SetInAtCursor => self.in_session(ClipEditSession::set_in_at_cursor),
            C::SetOutAtCursor => self.in_session(ClipEditSession::set_out_at_cursor),
            C::DragStartHandle(ms) => self.in_session(|s| {
                s.drag_start_handle(ms);
                Ok(())
            }),
            C::DragEndHandle(ms) => self.in_session(|s| {
                s.drag_end_handle(ms);
                Ok(())
            }),
            C::SlideRange(delta) => self.in_session(|s| {
                s.slide_range(delta);
                Ok(())
            }),
            C::SetEditCursor(ms) => self.in_session(|s| {
                s.set_cursor(ms);
                Ok(())
            }),
            C::ApplyEditSession => self.apply_edit_session().map(drop),
            C::SplitAtEditCursor => self.split_at_edit_cursor().map(drop),
            C::DeleteEditClip => self.delete_edit_clip().map(drop),
        }
    }

    /// Run `op` on the open session; without one the command is rejected.
    fn in_session(
        &mut self,
        op: impl FnOnce(&mut ClipEditSession) -> EditResult<()>,
    ) -> EditResult<()> {
        let session = self.edit_session_mut().ok_or(EditError::NoEditSession)?;
        op(session)
    }
}
