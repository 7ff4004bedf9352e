//! Media elements and the per-clip registry that owns them.
//!
//! The registry handles:
//! - Creating one element per media clip, lazily, through a [`MediaFactory`]
//! - Keeping elements for the lifetime of the document (keyed by clip id)
//! - Remembering clips whose element failed so they are not retried every frame

use std::collections::HashMap;

use sf_app_state::ClipState;
use tracing::{debug, warn};

use crate::error::MediaError;

/// A native playable element (a video or audio tag, a decoder handle, ...).
///
/// Positions are seconds into the clip's source.
pub trait MediaElement {
    /// Current playback position in seconds.
    fn position_secs(&self) -> f64;
    fn seek(&mut self, secs: f64);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Creates elements for media clips.
pub trait MediaFactory {
    fn create(&mut self, clip: &ClipState) -> Result<Box<dyn MediaElement>, MediaError>;
}

enum Slot {
    Ready(Box<dyn MediaElement>),
    Unavailable(String),
}

/// Owns every element created for the current document.
pub struct MediaRegistry<F> {
    factory: F,
    slots: HashMap<String, Slot>,
    /// Failures not yet reported to the engine.
    new_failures: Vec<MediaError>,
}

impl<F: MediaFactory> std::fmt::Debug for MediaRegistry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaRegistry")
            .field("elements", &self.len())
            .field("unavailable", &self.unavailable_count())
            .finish()
    }
}

impl<F: MediaFactory> MediaRegistry<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slots: HashMap::new(),
            new_failures: Vec::new(),
        }
    }

    /// The element for `clip`, created on first use.
    ///
    /// Returns `None` if the clip is (or just became) unavailable.
    pub fn acquire(&mut self, clip: &ClipState) -> Option<&mut dyn MediaElement> {
        if !self.slots.contains_key(&clip.id) {
            let slot = match self.create(clip) {
                Ok(element) => {
                    debug!(clip_id = %clip.id, source = ?clip.source, "Media element created");
                    Slot::Ready(element)
                }
                Err(err) => {
                    warn!(clip_id = %clip.id, error = %err, "Media unavailable");
                    let reason = err.to_string();
                    self.new_failures.push(err);
                    Slot::Unavailable(reason)
                }
            };
            self.slots.insert(clip.id.clone(), slot);
        }
        match self.slots.get_mut(&clip.id) {
            Some(Slot::Ready(element)) => Some(element.as_mut()),
            _ => None,
        }
    }

    fn create(&mut self, clip: &ClipState) -> Result<Box<dyn MediaElement>, MediaError> {
        if clip.source.is_none() {
            return Err(MediaError::NoSource(clip.id.clone()));
        }
        self.factory.create(clip)
    }

    /// An existing element, without creating one.
    pub fn get_mut(&mut self, clip_id: &str) -> Option<&mut dyn MediaElement> {
        match self.slots.get_mut(clip_id) {
            Some(Slot::Ready(element)) => Some(element.as_mut()),
            _ => None,
        }
    }

    /// Drop a working element after a runtime failure (e.g. play rejected).
    pub fn mark_unavailable(&mut self, err: MediaError) {
        warn!(clip_id = %err.clip_id(), error = %err, "Media marked unavailable");
        self.slots
            .insert(err.clip_id().to_string(), Slot::Unavailable(err.to_string()));
        self.new_failures.push(err);
    }

    pub fn is_unavailable(&self, clip_id: &str) -> bool {
        matches!(self.slots.get(clip_id), Some(Slot::Unavailable(_)))
    }

    /// Why the clip's media is unavailable, if it is.
    pub fn unavailable_reason(&self, clip_id: &str) -> Option<&str> {
        match self.slots.get(clip_id) {
            Some(Slot::Unavailable(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Failures recorded since the last call.
    pub fn take_failures(&mut self) -> Vec<MediaError> {
        std::mem::take(&mut self.new_failures)
    }

    /// Ids of clips with a live element.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|(id, slot)| match slot {
            Slot::Ready(_) => Some(id.as_str()),
            Slot::Unavailable(_) => None,
        })
    }

    pub fn pause_all(&mut self) {
        for slot in self.slots.values_mut() {
            if let Slot::Ready(element) = slot {
                if !element.is_paused() {
                    element.pause();
                }
            }
        }
    }

    /// Apply `f` to every live element with its clip id.
    pub fn for_each_element(&mut self, mut f: impl FnMut(&str, &mut dyn MediaElement)) {
        for (id, slot) in self.slots.iter_mut() {
            if let Slot::Ready(element) = slot {
                f(id, element.as_mut());
            }
        }
    }

    /// Pause and drop every element and forget all failures.
    pub fn clear(&mut self) {
        self.pause_all();
        let count = self.slots.len();
        self.slots.clear();
        self.new_failures.clear();
        debug!(count, "Media registry cleared");
    }

    pub fn len(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unavailable_count(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, Slot::Unavailable(_)))
            .count()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
