//! The playback synchronization engine.
//!
//! One primary video element is the master clock; audio elements run on
//! their own and are nudged back into sync at a bounded rate. The host calls
//! [`PlaybackEngine::tick`] once per display frame while
//! [`is_frame_scheduled`](PlaybackEngine::is_frame_scheduled) is true.
//!
//! The engine never mutates the timeline. It borrows it read-only per call
//! along with the shared [`PlaybackCursor`].

use std::time::Instant;

use sf_app_state::{ClipState, PlaybackCursor, Timeline, TrackKind, TrackState, Transport};
use sf_common::PlaybackConfig;
use tracing::debug;

use crate::clock::{ClockSource, LogicalClock, Throttle};
use crate::events::{EventBus, PlaybackEvent};
use crate::media::{MediaFactory, MediaRegistry};

/// Transport state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Paused,
    Playing,
}

/// The video clip that drives the clock at `time_ms`: the first video clip
/// in track order whose range contains it.
pub fn primary_video_at(timeline: &Timeline, time_ms: f64) -> Option<(&TrackState, &ClipState)> {
    timeline.active_clips_at(TrackKind::Video, time_ms).next()
}

/// Drives media elements from the timeline and the shared cursor.
pub struct PlaybackEngine<F> {
    registry: MediaRegistry<F>,
    config: PlaybackConfig,
    state: EngineState,
    frame_scheduled: bool,
    clock: LogicalClock,
    source: ClockSource,
    /// Clip whose video element is currently positioned for display.
    active_video: Option<String>,
    publish: Throttle,
    resync: Throttle,
    master_muted: bool,
    events: EventBus,
}

impl<F: MediaFactory> std::fmt::Debug for PlaybackEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("state", &self.state)
            .field("frame_scheduled", &self.frame_scheduled)
            .field("time_ms", &self.clock.time_ms())
            .field("source", &self.source)
            .field("active_video", &self.active_video)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<F: MediaFactory> PlaybackEngine<F> {
    pub fn new(factory: F, config: PlaybackConfig) -> Self {
        Self {
            registry: MediaRegistry::new(factory),
            publish: Throttle::per_second(config.publish_hz),
            resync: Throttle::new(std::time::Duration::from_millis(config.resync_interval_ms)),
            config,
            state: EngineState::Paused,
            frame_scheduled: false,
            clock: LogicalClock::default(),
            source: ClockSource::WallClock,
            active_video: None,
            master_muted: false,
            events: EventBus::default(),
        }
    }

    pub fn subscribe(&mut self) -> crossbeam::channel::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == EngineState::Playing
    }

    /// Whether the host should call `tick` on the next frame.
    pub fn is_frame_scheduled(&self) -> bool {
        self.frame_scheduled
    }

    /// Clock used by the latest tick.
    pub fn clock_source(&self) -> &ClockSource {
        &self.source
    }

    /// Unthrottled logical time.
    pub fn logical_time_ms(&self) -> f64 {
        self.clock.time_ms()
    }

    pub fn active_video_clip(&self) -> Option<&str> {
        self.active_video.as_deref()
    }

    pub fn is_master_muted(&self) -> bool {
        self.master_muted
    }

    pub fn registry(&self) -> &MediaRegistry<F> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MediaRegistry<F> {
        &mut self.registry
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    /// Start playback at the cursor. No-op while already playing.
    ///
    /// Starting at the very end of the timeline restarts from 0.
    pub fn play(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor, now: Instant) {
        if self.state == EngineState::Playing {
            debug!("Play requested while already playing");
            return;
        }
        if cursor.current_time_ms() >= cursor.duration_ms() as f64 {
            cursor.set_current_time(0.0);
        }
        let at_ms = cursor.current_time_ms();
        self.clock.start_at(at_ms, now);
        self.state = EngineState::Playing;
        self.frame_scheduled = true;
        cursor.set_playing(true);
        self.start_media(timeline, now);
        debug!(at_ms, video = ?self.active_video, "Playback started");
        self.events.emit(PlaybackEvent::Started { at_ms });
    }

    /// Stop playback, leaving every element positioned at the cursor.
    pub fn pause(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor) {
        if self.state == EngineState::Paused && !self.frame_scheduled {
            return;
        }
        self.halt(timeline, cursor);
        debug!(at_ms = cursor.current_time_ms(), "Playback paused");
    }

    pub fn toggle(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor, now: Instant) {
        match self.state {
            EngineState::Playing => self.pause(timeline, cursor),
            EngineState::Paused => self.play(timeline, cursor, now),
        }
    }

    /// Stop because something outside the transport took over (an edit
    /// session opening, a modal dialog, a project load).
    ///
    /// If the cursor was already stopped by someone else, its position is
    /// theirs and is kept.
    pub fn interrupt(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor) {
        if self.state == EngineState::Playing || self.frame_scheduled {
            debug!("Playback interrupted");
            self.halt(timeline, cursor);
        }
    }

    /// Move the cursor. While playing, media restarts from the new position;
    /// while paused, elements are positioned without playing.
    pub fn seek(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor, ms: f64, now: Instant) {
        cursor.set_current_time(ms);
        let t = cursor.current_time_ms();
        match self.state {
            EngineState::Playing => {
                self.registry.pause_all();
                self.clock.start_at(t, now);
                self.start_media(timeline, now);
            }
            EngineState::Paused => {
                self.clock.set(t);
                self.frame_scheduled = false;
                self.sync_paused(timeline, t);
            }
        }
        debug!(at_ms = t, playing = self.is_playing(), "Seek");
    }

    /// Advance one frame. Returns whether another frame is needed.
    pub fn tick(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor, now: Instant) -> bool {
        if !self.frame_scheduled {
            return false;
        }
        if !cursor.is_playing() {
            // Someone paused the shared cursor behind our back.
            self.interrupt(timeline, cursor);
            return false;
        }

        let logical = self.advance_clock(timeline, now);

        let next_video = primary_video_at(timeline, logical).map(|(_, c)| c.id.as_str());
        if next_video != self.active_video.as_deref() {
            self.switch_video(timeline, logical, true);
        }

        if logical >= cursor.duration_ms() as f64 {
            self.finish(cursor);
            return false;
        }

        if self.publish.ready(now) {
            cursor.set_current_time(logical);
            self.events.emit(PlaybackEvent::CursorPublished { at_ms: logical });
        }

        if self.resync.ready(now) {
            self.resync_audio(timeline, logical);
        }

        self.report_failures();
        true
    }

    // ---------------------------------------------------------------------
    // Mute
    // ---------------------------------------------------------------------

    /// Push every track's mute state (combined with master mute) onto its
    /// elements. Playback and the clock are unaffected.
    pub fn apply_mute(&mut self, timeline: &Timeline) {
        let master = self.master_muted;
        self.registry.for_each_element(|clip_id, element| {
            if let Some(track) = timeline.track_of(clip_id) {
                element.set_muted(track.muted || master);
            }
        });
    }

    pub fn set_master_muted(&mut self, timeline: &Timeline, muted: bool) {
        self.master_muted = muted;
        self.apply_mute(timeline);
        debug!(muted, "Master mute set");
    }

    /// Forget every element, e.g. when a new project is loaded.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.state = EngineState::Paused;
        self.frame_scheduled = false;
        self.clock = LogicalClock::default();
        self.source = ClockSource::WallClock;
        self.active_video = None;
        self.publish.reset();
        self.resync.reset();
        debug!("Playback engine reset");
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// Step 1 of a tick: pick the clock source and compute logical time.
    fn advance_clock(&mut self, timeline: &Timeline, now: Instant) -> f64 {
        let mut reading = None;
        if let Some(id) = &self.active_video {
            if let (Some(clip), Some(element)) = (timeline.find_clip(id), self.registry.get_mut(id)) {
                if !element.is_paused() {
                    reading = Some((element.position_secs(), clip.start_ms, clip.id.clone()));
                }
            }
        }
        match reading {
            Some((position, start_ms, clip_id)) => {
                self.source = ClockSource::Video { clip_id };
                self.clock.follow_video(position, start_ms, now)
            }
            None => {
                self.source = ClockSource::WallClock;
                self.clock.advance_wall(now)
            }
        }
    }

    /// Position (and optionally play) the primary video for `t`, pausing the
    /// previous one if it changed.
    fn switch_video(&mut self, timeline: &Timeline, t: f64, play: bool) {
        let next = primary_video_at(timeline, t);
        if let Some(prev) = self.active_video.take() {
            if next.map(|(_, c)| c.id.as_str()) != Some(prev.as_str()) {
                if let Some(element) = self.registry.get_mut(&prev) {
                    element.pause();
                }
                debug!(from = %prev, to = ?next.map(|(_, c)| &c.id), "Video clip changed");
            }
        }

        let Some((track, clip)) = next else {
            return;
        };
        let muted = track.muted || self.master_muted;
        let Some(element) = self.registry.acquire(clip) else {
            return;
        };
        element.set_muted(muted);
        element.seek(clip.source_offset_secs(t));
        if play {
            if let Err(err) = element.play() {
                self.registry.mark_unavailable(err);
                return;
            }
        }
        self.active_video = Some(clip.id.clone());
    }

    /// Seek and start the primary video and every audible audio clip at the
    /// clock's time.
    fn start_media(&mut self, timeline: &Timeline, now: Instant) {
        let t = self.clock.time_ms();
        self.switch_video(timeline, t, true);
        for (track, clip) in timeline.active_clips_at(TrackKind::Audio, t) {
            if track.muted {
                continue;
            }
            let muted = self.master_muted;
            let Some(element) = self.registry.acquire(clip) else {
                continue;
            };
            element.set_muted(muted);
            element.seek(clip.source_offset_secs(t));
            if let Err(err) = element.play() {
                self.registry.mark_unavailable(err);
            }
        }
        self.publish.reset();
        self.resync.arm(now);
        self.report_failures();
    }

    /// Position elements for `t` without playing them.
    fn sync_paused(&mut self, timeline: &Timeline, t: f64) {
        self.switch_video(timeline, t, false);
        for (track, clip) in timeline.active_clips_at(TrackKind::Audio, t) {
            let muted = track.muted || self.master_muted;
            if let Some(element) = self.registry.acquire(clip) {
                element.set_muted(muted);
                element.seek(clip.source_offset_secs(t));
            }
        }
        self.report_failures();
    }

    /// Bounded-rate audio correction: start what should play, re-seek what
    /// drifted past the tolerance, pause what should not play.
    fn resync_audio(&mut self, timeline: &Timeline, t: f64) {
        let tolerance = self.config.drift_tolerance_ms as f64;
        for track in timeline.tracks().iter().filter(|tr| tr.kind == TrackKind::Audio) {
            for clip in &track.clips {
                let should_play = !track.muted && clip.kind == TrackKind::Audio && clip.contains(t);
                if !should_play {
                    if let Some(element) = self.registry.get_mut(&clip.id) {
                        if !element.is_paused() {
                            element.pause();
                        }
                    }
                    continue;
                }

                let expected = clip.source_offset_secs(t);
                let muted = self.master_muted;
                let Some(element) = self.registry.acquire(clip) else {
                    continue;
                };
                if element.is_paused() {
                    element.set_muted(muted);
                    element.seek(expected);
                    if let Err(err) = element.play() {
                        self.registry.mark_unavailable(err);
                    }
                    continue;
                }
                let drift_ms = (element.position_secs() - expected) * 1000.0;
                if drift_ms.abs() > tolerance {
                    element.seek(expected);
                    debug!(clip_id = %clip.id, drift_ms, "Audio drift corrected");
                    self.events.emit(PlaybackEvent::DriftCorrected {
                        clip_id: clip.id.clone(),
                        drift_ms,
                    });
                }
            }
        }

        // Elements whose clip was deleted while playing.
        self.registry.for_each_element(|clip_id, element| {
            if timeline.find_clip(clip_id).is_none() && !element.is_paused() {
                element.pause();
            }
        });
    }

    /// Stop media and the frame loop. A cursor still marked playing takes the
    /// engine's time; a cursor stopped from outside keeps its own.
    fn halt(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor) {
        self.frame_scheduled = false;
        self.state = EngineState::Paused;
        self.source = ClockSource::WallClock;
        self.registry.pause_all();
        if cursor.is_playing() {
            cursor.set_current_time(self.clock.time_ms());
        }
        cursor.set_playing(false);
        let at_ms = cursor.current_time_ms();
        self.clock.set(at_ms);
        self.sync_paused(timeline, at_ms);
        self.events.emit(PlaybackEvent::Paused { at_ms });
    }

    /// End of timeline: everything stops and the cursor rewinds.
    fn finish(&mut self, cursor: &mut PlaybackCursor) {
        self.registry.pause_all();
        self.frame_scheduled = false;
        self.state = EngineState::Paused;
        self.source = ClockSource::WallClock;
        self.active_video = None;
        self.clock.set(0.0);
        cursor.set_current_time(0.0);
        cursor.set_playing(false);
        debug!(duration_ms = cursor.duration_ms(), "Reached end of timeline");
        self.events.emit(PlaybackEvent::Ended);
    }

    fn report_failures(&mut self) {
        for err in self.registry.take_failures() {
            self.events.emit(PlaybackEvent::MediaUnavailable {
                clip_id: err.clip_id().to_string(),
                reason: err.to_string(),
            });
        }
    }
}

impl<F: MediaFactory> Transport for PlaybackEngine<F> {
    fn interrupt_playback(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor) {
        self.interrupt(timeline, cursor);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::MediaError;
    use crate::media::MediaElement;

    struct Silent {
        paused: bool,
    }

    impl MediaElement for Silent {
        fn position_secs(&self) -> f64 {
            0.0
        }
        fn seek(&mut self, _secs: f64) {}
        fn play(&mut self) -> Result<(), MediaError> {
            self.paused = false;
            Ok(())
        }
        fn pause(&mut self) {
            self.paused = true;
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn set_muted(&mut self, _muted: bool) {}
        fn is_muted(&self) -> bool {
            false
        }
    }

    struct SilentFactory;

    impl MediaFactory for SilentFactory {
        fn create(&mut self, _clip: &ClipState) -> Result<Box<dyn MediaElement>, MediaError> {
            Ok(Box::new(Silent { paused: true }))
        }
    }

    fn engine() -> PlaybackEngine<SilentFactory> {
        PlaybackEngine::new(SilentFactory, PlaybackConfig::default())
    }

    #[test]
    fn tick_without_play_does_nothing() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        assert!(!eng.tick(&tl, &mut cursor, Instant::now()));
        assert_eq!(cursor.current_time_ms(), 0.0);
    }

    #[test]
    fn empty_timeline_runs_on_wall_clock() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        assert!(eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(100)));
        assert_eq!(eng.clock_source(), &ClockSource::WallClock);
        assert!((cursor.current_time_ms() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn second_play_is_noop() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let events = eng.subscribe();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        eng.play(&tl, &mut cursor, t0 + Duration::from_millis(10));
        assert_eq!(events.try_iter().count(), 1);
    }

    #[test]
    fn pause_cancels_scheduled_frame() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        eng.pause(&tl, &mut cursor);
        assert!(!eng.is_frame_scheduled());
        assert!(!eng.tick(&tl, &mut cursor, t0 + Duration::from_secs(1)));
        assert!(!cursor.is_playing());
    }

    #[test]
    fn external_cursor_pause_interrupts() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        cursor.set_playing(false);
        assert!(!eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(16)));
        assert_eq!(eng.state(), EngineState::Paused);
    }

    #[test]
    fn external_stop_keeps_the_cursor_position() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(800));
        cursor.rewind();
        assert!(!eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(816)));
        assert_eq!(cursor.current_time_ms(), 0.0);
        assert_eq!(eng.logical_time_ms(), 0.0);
    }

    #[test]
    fn interrupt_while_live_flushes_engine_time() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        let t0 = Instant::now();
        eng.play(&tl, &mut cursor, t0);
        eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(100));
        // Within the publish window the cursor lags the engine.
        eng.tick(&tl, &mut cursor, t0 + Duration::from_millis(110));
        assert!((cursor.current_time_ms() - 100.0).abs() < 1e-6);
        eng.interrupt_playback(&tl, &mut cursor);
        assert!((cursor.current_time_ms() - 110.0).abs() < 1e-6);
        assert!(!cursor.is_playing());
        assert!(!eng.is_frame_scheduled());
    }

    #[test]
    fn play_at_end_restarts_from_zero() {
        let mut eng = engine();
        let tl = Timeline::new();
        let mut cursor = PlaybackCursor::default();
        cursor.set_current_time(15_000.0);
        eng.play(&tl, &mut cursor, Instant::now());
        assert_eq!(cursor.current_time_ms(), 0.0);
    }
}
