//! Playback notifications broadcast over crossbeam channels.

use crossbeam::channel::{unbounded, Receiver, Sender};

/// Something observers of playback may want to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    Started { at_ms: f64 },
    Paused { at_ms: f64 },
    /// The end of the timeline was reached; the cursor is back at 0.
    Ended,
    /// Throttled cursor update while playing.
    CursorPublished { at_ms: f64 },
    /// An audio element was re-seeked after drifting past the tolerance.
    DriftCorrected { clip_id: String, drift_ms: f64 },
    MediaUnavailable { clip_id: String, reason: String },
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<PlaybackEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send to all subscribers, dropping those whose receiver is gone.
    pub fn emit(&mut self, event: PlaybackEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
