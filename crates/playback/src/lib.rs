//! `sf-playback` -- Playback synchronization for the ShortForge editor.
//!
//! This crate drives native media elements from the editor's timeline:
//!
//! - **Engine**: play/pause/seek state machine ticked once per display frame
//! - **Clock**: video element as master clock, wall-clock fallback, throttles
//! - **Media**: `MediaElement` / `MediaFactory` traits and a lazy per-clip registry
//! - **Events**: `PlaybackEvent` broadcast over crossbeam channels
//!
//! # Architecture
//!
//! ```text
//! host frame loop ──tick(now)──> PlaybackEngine ──seek/play/pause──> MediaElement (video)
//!                                   │    │                          MediaElement (audio) x N
//!                     &Timeline ────┘    └──> &mut PlaybackCursor (throttled ~30 Hz)
//!                                         └──> PlaybackEvent channel
//! ```
//!
//! The video element owns the clock when one is playing; audio elements are
//! re-evaluated at a slower cadence (~2 Hz) and hard-seeked only when their
//! drift exceeds the configured tolerance.

pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod media;

// Re-export primary types at crate root for convenience
pub use clock::{ClockSource, LogicalClock, Throttle};
pub use engine::{primary_video_at, EngineState, PlaybackEngine};
pub use error::MediaError;
pub use events::{EventBus, PlaybackEvent};
pub use media::{MediaElement, MediaFactory, MediaRegistry};
