//! Snapshot-based undo/redo history.
//!
//! - Undo/redo stacks of `TimelineSnapshot`
//! - Pause/resume to collapse a continuous gesture into one undo step
//! - Configurable maximum history depth (oldest entries evicted)
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(100);
//!
//! // Before a user action, capture the current track list
//! let before = TimelineSnapshot::capture(&timeline);
//! timeline.move_clip("clip-1", 2000)?;
//! history.record("Move clip", before);
//!
//! // Undo hands back the state to restore and keeps the current one for redo
//! if let Some(prev) = history.undo(TimelineSnapshot::capture(&timeline)) {
//!     timeline = prev.into_timeline();
//! }
//!
//! // Drag gestures
//! history.pause("Drag clip", TimelineSnapshot::capture(&timeline));
//! // ... many edits, none recorded ...
//! history.resume(&TimelineSnapshot::capture(&timeline));
//! ```

use std::time::Instant;

use crate::snapshot::TimelineSnapshot;

/// One undoable step: the track list as it was before the edit.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Human-readable label describing the action (e.g., "Move clip", "Split clip").
    pub label: String,
    /// The track list to restore when this entry is applied.
    pub snapshot: TimelineSnapshot,
    pub timestamp: Instant,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: TimelineSnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// State captured when history recording was paused.
#[derive(Clone, Debug)]
struct PendingGesture {
    label: String,
    before: TimelineSnapshot,
}

/// Manages undo/redo history using track-list snapshots.
///
/// - Two stacks: undo (past states) and redo (states undone)
/// - Recording a new entry clears the redo stack
/// - While paused, `record()` calls are suppressed and `resume()` creates a
///   single entry holding the pre-pause state
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
    /// When Some, recording is paused for a gesture.
    pending: Option<PendingGesture>,
}

impl HistoryManager {
    /// History keeping at most `max_entries` undo snapshots.
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
            pending: None,
        }
    }

    /// Record the state *before* a committed edit.
    ///
    /// - Clears the redo stack.
    /// - Suppressed while paused.
    pub fn record(&mut self, label: &str, before: TimelineSnapshot) {
        if self.pending.is_some() {
            tracing::trace!(label, "Record suppressed: history paused");
            return;
        }
        self.push_entry(HistoryEntry::new(label, before));
        tracing::debug!(
            label,
            undo_depth = self.undo_stack.len(),
            "History entry recorded"
        );
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        self.undo_stack.push(entry);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last action.
    ///
    /// `current` is the live track list; it is kept on the redo stack.
    /// Returns the snapshot to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: TimelineSnapshot) -> Option<TimelineSnapshot> {
        // End any stuck gesture first (lost pointer-up, etc.)
        self.close_stuck_gesture(&current, "undo");

        let entry = self.undo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        self.redo_stack.push(HistoryEntry::new(entry.label, current));
        Some(entry.snapshot)
    }

    /// Redo the last undone action.
    ///
    /// `current` is the live track list; it goes back on the undo stack.
    pub fn redo(&mut self, current: TimelineSnapshot) -> Option<TimelineSnapshot> {
        self.close_stuck_gesture(&current, "redo");

        let entry = self.redo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        self.undo_stack.push(HistoryEntry::new(entry.label, current));
        self.enforce_limit();
        Some(entry.snapshot)
    }

    fn close_stuck_gesture(&mut self, current: &TimelineSnapshot, action: &str) {
        if self.pending.is_some() {
            tracing::warn!(action, "Closing stuck gesture");
            self.resume(current);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pause recording for a gesture. `before` is the track list at gesture start.
    ///
    /// Pausing while already paused is ignored; the first gesture wins.
    pub fn pause(&mut self, label: &str, before: TimelineSnapshot) {
        if self.pending.is_some() {
            tracing::warn!(label, "pause called while already paused, ignoring");
            return;
        }
        self.pending = Some(PendingGesture {
            label: label.to_string(),
            before,
        });
        tracing::debug!(label, "History paused");
    }

    /// Resume recording. If the track list changed since `pause`, one entry
    /// holding the pre-pause state is recorded. Returns whether an entry was added.
    ///
    /// Resuming while not paused is a no-op.
    pub fn resume(&mut self, current: &TimelineSnapshot) -> bool {
        let Some(PendingGesture { label, before }) = self.pending.take() else {
            return false;
        };

        if &before == current {
            tracing::debug!(label = %label, "History resumed, gesture made no change");
            return false;
        }

        self.push_entry(HistoryEntry::new(label, before));
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            "History resumed, gesture recorded"
        );
        true
    }

    /// Whether recording is currently paused.
    pub fn is_paused(&self) -> bool {
        self.pending.is_some()
    }

    /// Label shown on the undo button.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history (undo and redo stacks, pending gesture).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the depth cap, dropping the oldest snapshots beyond it.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max.max(1);
        self.enforce_limit();
    }

    /// Approximate memory held by both stacks, in bytes.
    pub fn estimated_size(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|e| e.snapshot.estimated_size() + e.label.len())
            .sum()
    }
}
