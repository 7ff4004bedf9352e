//! `sf-app-state` -- Document state and editing operations for the ShortForge editor.
//!
//! This crate provides:
//!
//! - **`Timeline`**: The track list and every structural mutation (move, trim, split, delete, transform).
//! - **`HistoryManager`**: Snapshot-based undo/redo with gesture batching.
//! - **`TimelineSnapshot`**: Immutable copy of the track list stored by the history.
//! - **`SelectionState`**: Clip and track selection.
//! - **`PlaybackCursor`**: Logical playback time, play flag, zoom and timeline duration.
//! - **`Transport`**: Hook the editor uses to stop media synchronously.
//! - **`ClipEditSession`**: Staged trim/split editing of a single clip.
//! - **`Editor`**: Owns all of the above and records every timeline edit in history.
//! - **`EditorCommand`**: Non-failing command surface over the editor.
//!
//! # Architecture
//!
//! ```text
//! Editor
//! ├── state: EditorState
//! │   ├── timeline: Timeline             (tracks → clips, undoable)
//! │   ├── cursor: PlaybackCursor         (time, zoom, duration)
//! │   ├── selection: SelectionState      (what's selected)
//! │   ├── edit_session: Option<ClipEditSession>
//! │   └── beats / snap / master mute
//! ├── history: HistoryManager
//! │   ├── undo_stack: Vec<HistoryEntry>  (past snapshots)
//! │   ├── redo_stack: Vec<HistoryEntry>  (undone snapshots)
//! │   └── pending gesture                (pause/resume)
//! └── config: EditorConfig
//! ```

pub mod commands;
pub mod edit_session;
pub mod editor;
pub mod history;
pub mod playback;
pub mod selection;
pub mod snap;
pub mod snapshot;
pub mod state;
pub mod timeline;

// Re-export primary types at crate root for convenience.
pub use commands::EditorCommand;
pub use edit_session::{ClipEditSession, PreviewAction, PreviewTick, SliderBounds, STEP_PRESETS};
pub use editor::{Editor, EditorState};
pub use history::{HistoryEntry, HistoryManager};
pub use playback::{PlaybackCursor, Transport};
pub use selection::SelectionState;
pub use snapshot::TimelineSnapshot;
pub use state::{ClipState, ClipTransform, TrackKind, TrackState, TransformPatch};
pub use timeline::{new_clip_id, DeletedClip, Timeline, CUE_LABEL_CHARS};
