//! Modal trim/split editor over a single clip.
//!
//! A session stages `start`, `end` and a cursor without touching the timeline.
//! Nothing is committed until the editor applies the session; closing it
//! discards every staged change.
//!
//! Staged values always satisfy `start + min_len <= end` and
//! `start <= cursor <= end`. Every operation either keeps that or is rejected.
//! Typed bounds and in/out points must leave strictly more than `min_len`;
//! typed durations and handle drags may land on it exactly.

use sf_common::{
    format_seconds, format_timecode, parse_seconds, parse_timecode, EditError, EditResult,
};

use crate::state::ClipState;

/// Cursor step presets offered by the editor, in ms.
pub const STEP_PRESETS: [i64; 6] = [-1000, -100, -33, 33, 100, 1000];

/// Visible range of the range bar, padded around the clip's original range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderBounds {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl SliderBounds {
    /// 15% of the original duration on each side, at least 500 ms, never below 0.
    pub fn around(orig_start_ms: u64, orig_end_ms: u64) -> Self {
        let padding = ((orig_end_ms - orig_start_ms) as f64 * 0.15).max(500.0);
        Self {
            min_ms: (orig_start_ms as f64 - padding).max(0.0),
            max_ms: orig_end_ms as f64 + padding,
        }
    }

    pub fn span_ms(&self) -> f64 {
        self.max_ms - self.min_ms
    }

    /// Position of `ms` on the bar as a fraction in `[0, 1]`.
    pub fn fraction_of(&self, ms: f64) -> f64 {
        if self.span_ms() <= 0.0 {
            return 0.0;
        }
        ((ms - self.min_ms) / self.span_ms()).clamp(0.0, 1.0)
    }

    /// Inverse of [`fraction_of`](Self::fraction_of), rounded to whole ms.
    pub fn ms_at(&self, fraction: f64) -> f64 {
        (self.min_ms + fraction.clamp(0.0, 1.0) * self.span_ms()).round()
    }
}

/// What the host should do with the preview video after `toggle_preview`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PreviewAction {
    /// Seek the preview element to `seek_secs` into the clip and play.
    Play { seek_secs: f64 },
    Pause,
}

/// Result of feeding one preview frame into the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PreviewTick {
    /// Keep scheduling frames.
    Continue,
    /// Reached the staged end; the preview is paused at `end`.
    Ended,
    /// The preview is not running.
    Idle,
}

/// Staged edits for one clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipEditSession {
    clip_id: String,
    orig_start_ms: u64,
    orig_end_ms: u64,
    start_ms: u64,
    end_ms: u64,
    cursor_ms: u64,
    /// Length of the source media, `None` when unknown or not media-backed.
    source_duration_ms: Option<u64>,
    timeline_duration_ms: u64,
    min_len_ms: u64,
    slider: SliderBounds,
    previewing: bool,
}

impl ClipEditSession {
    /// Open a session on `clip` with the cursor at its start.
    pub fn open(
        clip: &ClipState,
        source_duration_ms: Option<u64>,
        timeline_duration_ms: u64,
        min_len_ms: u64,
    ) -> Self {
        tracing::debug!(
            clip_id = %clip.id,
            start_ms = clip.start_ms,
            end_ms = clip.end_ms,
            source_duration_ms = ?source_duration_ms,
            "Clip edit session opened"
        );
        Self {
            clip_id: clip.id.clone(),
            orig_start_ms: clip.start_ms,
            orig_end_ms: clip.end_ms,
            start_ms: clip.start_ms,
            end_ms: clip.end_ms,
            cursor_ms: clip.start_ms,
            source_duration_ms,
            timeline_duration_ms,
            min_len_ms,
            slider: SliderBounds::around(clip.start_ms, clip.end_ms),
            previewing: false,
        }
    }

    pub fn clip_id(&self) -> &str {
        &self.clip_id
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn cursor_ms(&self) -> u64 {
        self.cursor_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    pub fn original_range(&self) -> (u64, u64) {
        (self.orig_start_ms, self.orig_end_ms)
    }

    pub fn slider_bounds(&self) -> SliderBounds {
        self.slider
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Whether the staged range differs from the clip's range at open time.
    pub fn is_modified(&self) -> bool {
        (self.start_ms, self.end_ms) != (self.orig_start_ms, self.orig_end_ms)
    }

    // ---------------------------------------------------------------------
    // Display text
    // ---------------------------------------------------------------------

    pub fn start_text(&self) -> String {
        format_timecode(self.start_ms)
    }

    pub fn end_text(&self) -> String {
        format_timecode(self.end_ms)
    }

    pub fn cursor_text(&self) -> String {
        format_timecode(self.cursor_ms)
    }

    pub fn duration_text(&self) -> String {
        format_seconds(self.duration_ms())
    }

    // ---------------------------------------------------------------------
    // Constraints
    // ---------------------------------------------------------------------

    fn fits_source(&self, start_ms: u64, end_ms: u64) -> bool {
        self.source_duration_ms
            .map_or(true, |max| end_ms - start_ms <= max)
    }

    fn check_range(&self, start_ms: u64, end_ms: u64) -> EditResult<()> {
        if start_ms >= end_ms {
            return Err(EditError::InvalidRange { start_ms, end_ms });
        }
        if end_ms - start_ms <= self.min_len_ms {
            return Err(EditError::TooShort {
                duration_ms: end_ms - start_ms,
                min_ms: self.min_len_ms,
            });
        }
        if !self.fits_source(start_ms, end_ms) {
            return Err(EditError::InvalidRange { start_ms, end_ms });
        }
        Ok(())
    }

    fn clamp_cursor(&mut self) {
        self.cursor_ms = self.cursor_ms.clamp(self.start_ms, self.end_ms);
    }

    fn set_start(&mut self, start_ms: u64) {
        self.start_ms = start_ms;
        if self.cursor_ms < start_ms {
            self.cursor_ms = start_ms;
        }
    }

    fn set_end(&mut self, end_ms: u64) {
        self.end_ms = end_ms;
        if self.cursor_ms > end_ms {
            self.cursor_ms = end_ms;
        }
    }

    // ---------------------------------------------------------------------
    // Text commits
    // ---------------------------------------------------------------------

    /// Commit a typed start timecode. It must leave more than the minimum length.
    pub fn commit_start_text(&mut self, text: &str) -> EditResult<()> {
        let ms = parse_timecode(text)?;
        self.check_range(ms, self.end_ms)?;
        self.set_start(ms);
        Ok(())
    }

    /// Commit a typed end timecode. It must leave more than the minimum length.
    pub fn commit_end_text(&mut self, text: &str) -> EditResult<()> {
        let ms = parse_timecode(text)?;
        self.check_range(self.start_ms, ms)?;
        self.set_end(ms);
        Ok(())
    }

    /// Commit a typed cursor timecode inside `[start, end]`.
    pub fn commit_cursor_text(&mut self, text: &str) -> EditResult<()> {
        let ms = parse_timecode(text)?;
        if ms < self.start_ms || ms > self.end_ms {
            return Err(EditError::InvalidRange {
                start_ms: self.start_ms,
                end_ms: self.end_ms,
            });
        }
        self.cursor_ms = ms;
        Ok(())
    }

    /// Commit a typed duration in seconds.
    ///
    /// The duration is capped at the source length. The range keeps its start
    /// unless the end would pass the timeline end, in which case it is shifted
    /// back (never below 0).
    pub fn commit_duration_text(&mut self, text: &str) -> EditResult<()> {
        let mut desired = parse_seconds(text)?;
        if desired == 0 {
            return Err(EditError::TooShort {
                duration_ms: 0,
                min_ms: self.min_len_ms,
            });
        }
        if let Some(max) = self.source_duration_ms {
            desired = desired.min(max);
        }
        if desired < self.min_len_ms {
            return Err(EditError::TooShort {
                duration_ms: desired,
                min_ms: self.min_len_ms,
            });
        }

        let mut start = self.start_ms as i64;
        let mut end = start + desired as i64;
        let timeline_end = self.timeline_duration_ms as i64;
        if end > timeline_end {
            start = timeline_end - desired as i64;
            end = timeline_end;
        }
        if start < 0 {
            start = 0;
            end = desired as i64;
        }

        self.start_ms = start as u64;
        self.end_ms = end as u64;
        self.clamp_cursor();
        tracing::debug!(
            clip_id = %self.clip_id,
            start_ms = self.start_ms,
            end_ms = self.end_ms,
            "Duration committed"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Cursor and in/out
    // ---------------------------------------------------------------------

    /// Move the cursor by `delta_ms`, staying inside `[start, end]`.
    pub fn step_cursor(&mut self, delta_ms: i64) {
        let target = (self.cursor_ms as i64).saturating_add(delta_ms).max(0) as u64;
        self.cursor_ms = target.clamp(self.start_ms, self.end_ms);
    }

    /// Place the cursor (bar click or cursor drag), clamped to `[start, end]`.
    pub fn set_cursor(&mut self, ms: f64) {
        let ms = if ms.is_finite() { ms.round().max(0.0) as u64 } else { self.start_ms };
        self.cursor_ms = ms.clamp(self.start_ms, self.end_ms);
    }

    /// Make the cursor the new start.
    pub fn set_in_at_cursor(&mut self) -> EditResult<()> {
        self.check_range(self.cursor_ms, self.end_ms)?;
        self.start_ms = self.cursor_ms;
        Ok(())
    }

    /// Make the cursor the new end.
    pub fn set_out_at_cursor(&mut self) -> EditResult<()> {
        self.check_range(self.start_ms, self.cursor_ms)?;
        self.end_ms = self.cursor_ms;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Range bar gestures
    // ---------------------------------------------------------------------

    /// Drag the start handle to `ms`, clamped between the bar minimum and
    /// `end - min_len`.
    pub fn drag_start_handle(&mut self, ms: f64) {
        let mut lower = self.slider.min_ms;
        if let Some(max) = self.source_duration_ms {
            lower = lower.max(self.end_ms.saturating_sub(max) as f64);
        }
        let upper = self.end_ms.saturating_sub(self.min_len_ms) as f64;
        let start = ms.min(upper).max(lower).round().max(0.0) as u64;
        if start + self.min_len_ms <= self.end_ms {
            self.set_start(start);
        }
    }

    /// Drag the end handle to `ms`, clamped between `start + min_len` and the
    /// bar maximum (or the source end). Ignored when the source is too short
    /// to leave the minimum length.
    pub fn drag_end_handle(&mut self, ms: f64) {
        let mut upper = self.slider.max_ms;
        if let Some(max) = self.source_duration_ms {
            upper = upper.min(self.start_ms.saturating_add(max) as f64);
        }
        let lower = self.start_ms.saturating_add(self.min_len_ms) as f64;
        if upper < lower {
            return;
        }
        let end = ms.min(upper).max(lower).round() as u64;
        self.set_end(end);
    }

    /// Slide the whole range by `delta_ms` without resizing it, staying inside
    /// the bar. The cursor moves by the same amount.
    pub fn slide_range(&mut self, delta_ms: f64) {
        if !delta_ms.is_finite() {
            return;
        }
        let duration = self.duration_ms() as f64;
        let mut start = self.start_ms as f64 + delta_ms;
        let mut end = self.end_ms as f64 + delta_ms;
        if start < self.slider.min_ms {
            start = self.slider.min_ms;
            end = start + duration;
        }
        if end > self.slider.max_ms {
            end = self.slider.max_ms;
            start = end - duration;
        }
        let start = start.round().max(0.0) as u64;
        let end = start + self.duration_ms();

        let applied = start as i64 - self.start_ms as i64;
        self.start_ms = start;
        self.end_ms = end;
        self.cursor_ms = ((self.cursor_ms as i64 + applied).max(0) as u64).clamp(start, end);
    }

    // ---------------------------------------------------------------------
    // Preview playback
    // ---------------------------------------------------------------------

    /// Start or stop the preview. Starting at or past the end restarts at `start`.
    pub fn toggle_preview(&mut self) -> PreviewAction {
        if self.previewing {
            self.previewing = false;
            return PreviewAction::Pause;
        }
        if self.cursor_ms >= self.end_ms {
            self.cursor_ms = self.start_ms;
        }
        self.previewing = true;
        PreviewAction::Play {
            seek_secs: (self.cursor_ms - self.start_ms) as f64 / 1000.0,
        }
    }

    /// Stop the preview, e.g. when its video element failed to play.
    pub fn stop_preview(&mut self) {
        self.previewing = false;
    }

    /// Feed the preview element's position (seconds into the clip).
    pub fn preview_tick(&mut self, video_position_secs: f64) -> PreviewTick {
        if !self.previewing {
            return PreviewTick::Idle;
        }
        let timeline_ms = self.start_ms as f64 + video_position_secs.max(0.0) * 1000.0;
        if timeline_ms >= self.end_ms as f64 {
            self.previewing = false;
            self.cursor_ms = self.end_ms;
            return PreviewTick::Ended;
        }
        self.cursor_ms = (timeline_ms.round() as u64).clamp(self.start_ms, self.end_ms);
        PreviewTick::Continue
    }

    /// Where a paused preview element should sit for the current cursor, in
    /// seconds into the clip. `None` while previewing or outside the media.
    pub fn preview_seek_target(&self, media_duration_secs: Option<f64>) -> Option<f64> {
        if self.previewing {
            return None;
        }
        let secs = (self.cursor_ms - self.start_ms) as f64 / 1000.0;
        match media_duration_secs {
            Some(d) if d.is_finite() && secs <= d => Some(secs),
            Some(_) => None,
            None => Some(secs),
        }
    }

    // ---------------------------------------------------------------------
    // Results
    // ---------------------------------------------------------------------

    /// The range to trim the clip to, or `None` when unchanged.
    pub fn staged_trim(&self) -> Option<(u64, u64)> {
        self.is_modified().then_some((self.start_ms, self.end_ms))
    }

    /// The split point, if the cursor is strictly inside the staged range.
    pub fn split_point(&self) -> Option<u64> {
        (self.start_ms < self.cursor_ms && self.cursor_ms < self.end_ms).then_some(self.cursor_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TrackKind;

    fn clip(start: u64, end: u64) -> ClipState {
        ClipState {
            id: "clip-1".into(),
            track_id: "video-1".into(),
            kind: TrackKind::Video,
            start_ms: start,
            end_ms: end,
            label: "a.mp4".into(),
            source: Some("/m/a.mp4".into()),
            color: TrackKind::Video.color().into(),
            transform: None,
        }
    }

    fn session(start: u64, end: u64) -> ClipEditSession {
        ClipEditSession::open(&clip(start, end), None, 15_000, 100)
    }

    #[test]
    fn open_places_cursor_at_start() {
        let s = session(1000, 4000);
        assert_eq!(s.cursor_ms(), 1000);
        assert_eq!(s.start_text(), "00:01.000");
        assert_eq!(s.end_text(), "00:04.000");
        assert_eq!(s.duration_text(), "3.000");
        assert!(!s.is_modified());
        assert_eq!(s.staged_trim(), None);
    }

    #[test]
    fn start_commit_respects_minimum_and_pushes_cursor() {
        let mut s = session(1000, 4000);
        s.commit_start_text("00:02.000").unwrap();
        assert_eq!(s.start_ms(), 2000);
        assert_eq!(s.cursor_ms(), 2000);

        assert!(matches!(
            s.commit_start_text("00:03.950"),
            Err(EditError::TooShort { .. })
        ));
        assert!(matches!(
            s.commit_start_text("later"),
            Err(EditError::InvalidTimecode(_))
        ));
        assert_eq!(s.start_ms(), 2000);
    }

    #[test]
    fn end_commit_pulls_cursor_back() {
        let mut s = session(1000, 4000);
        s.step_cursor(2500);
        assert_eq!(s.cursor_ms(), 3500);
        s.commit_end_text("00:03.000").unwrap();
        assert_eq!(s.end_ms(), 3000);
        assert_eq!(s.cursor_ms(), 3000);
        assert!(s.commit_end_text("00:01.050").is_err());
    }

    #[test]
    fn cursor_commit_must_be_inside_range() {
        let mut s = session(1000, 4000);
        s.commit_cursor_text("00:02.500").unwrap();
        assert_eq!(s.cursor_ms(), 2500);
        s.commit_cursor_text("00:04.000").unwrap();
        assert!(s.commit_cursor_text("00:04.001").is_err());
        assert!(s.commit_cursor_text("00:00.999").is_err());
        assert_eq!(s.cursor_ms(), 4000);
    }

    #[test]
    fn duration_commit_keeps_start() {
        let mut s = session(1000, 4000);
        s.commit_duration_text("2").unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (1000, 3000));
    }

    #[test]
    fn duration_commit_shifts_back_at_timeline_end() {
        let mut s = session(12_000, 14_000);
        s.step_cursor(1500);
        s.commit_duration_text("5").unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (10_000, 15_000));
        assert_eq!(s.cursor_ms(), 13_500);
    }

    #[test]
    fn duration_commit_never_goes_negative() {
        let mut s = session(12_000, 14_000);
        s.commit_duration_text("20").unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (0, 20_000));
    }

    #[test]
    fn duration_commit_is_capped_by_source() {
        let mut s = ClipEditSession::open(&clip(0, 1000), Some(2500), 15_000, 100);
        s.commit_duration_text("10").unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (0, 2500));
    }

    #[test]
    fn duration_commit_rejects_tiny_and_garbage() {
        let mut s = session(1000, 4000);
        assert!(s.commit_duration_text("0").is_err());
        assert!(s.commit_duration_text("0.05").is_err());
        assert!(s.commit_duration_text("-2").is_err());
        assert!(s.commit_duration_text("long").is_err());
        assert_eq!((s.start_ms(), s.end_ms()), (1000, 4000));
    }

    #[test]
    fn step_presets_clamp_to_range() {
        let mut s = session(1000, 2000);
        s.step_cursor(STEP_PRESETS[0]);
        assert_eq!(s.cursor_ms(), 1000);
        s.step_cursor(33);
        assert_eq!(s.cursor_ms(), 1033);
        s.step_cursor(5000);
        assert_eq!(s.cursor_ms(), 2000);
    }

    #[test]
    fn in_out_at_cursor() {
        let mut s = session(1000, 4000);
        s.set_cursor(1500.0);
        s.set_in_at_cursor().unwrap();
        assert_eq!(s.start_ms(), 1500);

        s.set_cursor(3000.0);
        s.set_out_at_cursor().unwrap();
        assert_eq!(s.end_ms(), 3000);

        s.set_cursor(2950.0);
        assert!(s.set_in_at_cursor().is_err());
        s.set_cursor(1550.0);
        assert!(s.set_out_at_cursor().is_err());
        assert_eq!((s.start_ms(), s.end_ms()), (1500, 3000));
    }

    #[test]
    fn typed_bounds_need_more_than_minimum() {
        let mut s = session(1000, 4000);
        assert!(matches!(
            s.commit_start_text("00:03.900"),
            Err(EditError::TooShort { duration_ms: 100, .. })
        ));
        assert!(s.commit_end_text("00:01.100").is_err());
        s.commit_start_text("00:03.899").unwrap();
        assert_eq!(s.duration_ms(), 101);

        let mut s = session(1000, 4000);
        s.set_cursor(3900.0);
        assert!(s.set_in_at_cursor().is_err());
        s.set_cursor(1100.0);
        assert!(s.set_out_at_cursor().is_err());
        s.set_cursor(1101.0);
        s.set_out_at_cursor().unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (1000, 1101));
    }

    #[test]
    fn typed_duration_may_equal_minimum() {
        let mut s = session(1000, 4000);
        s.commit_duration_text("0.1").unwrap();
        assert_eq!((s.start_ms(), s.end_ms()), (1000, 1100));
    }

    #[test]
    fn end_handle_never_passes_a_short_source() {
        let mut s = ClipEditSession::open(&clip(1000, 1050), Some(50), 15_000, 100);
        s.drag_end_handle(5000.0);
        assert_eq!(s.end_ms(), 1050);
        s.drag_end_handle(0.0);
        assert_eq!(s.end_ms(), 1050);
    }

    #[test]
    fn slider_padding() {
        let b = SliderBounds::around(10_000, 20_000);
        assert_eq!((b.min_ms, b.max_ms), (8_500.0, 21_500.0));

        let b = SliderBounds::around(200, 1200);
        assert_eq!((b.min_ms, b.max_ms), (0.0, 1700.0));

        assert_eq!(b.fraction_of(0.0), 0.0);
        assert_eq!(b.fraction_of(5000.0), 1.0);
        assert_eq!(b.ms_at(0.5), 850.0);
    }

    #[test]
    fn handle_drags_are_clamped() {
        let mut s = session(10_000, 20_000);
        s.drag_start_handle(0.0);
        assert_eq!(s.start_ms(), 8_500);
        s.drag_start_handle(19_990.0);
        assert_eq!(s.start_ms(), 19_900);
        assert_eq!(s.cursor_ms(), 19_900);

        s.drag_end_handle(50_000.0);
        assert_eq!(s.end_ms(), 21_500);
        s.drag_end_handle(0.0);
        assert_eq!(s.end_ms(), 20_000);
        assert_eq!(s.cursor_ms(), 19_900);
    }

    #[test]
    fn end_handle_respects_source_length() {
        let mut s = ClipEditSession::open(&clip(10_000, 20_000), Some(10_500), 60_000, 100);
        s.drag_end_handle(21_500.0);
        assert_eq!(s.end_ms(), 20_500);
    }

    #[test]
    fn slide_keeps_duration_inside_bar() {
        let mut s = session(10_000, 20_000);
        s.set_cursor(12_000.0);
        s.slide_range(1000.0);
        assert_eq!((s.start_ms(), s.end_ms()), (11_000, 21_000));
        assert_eq!(s.cursor_ms(), 13_000);

        s.slide_range(5000.0);
        assert_eq!((s.start_ms(), s.end_ms()), (11_500, 21_500));
        assert_eq!(s.cursor_ms(), 13_500);

        s.slide_range(-50_000.0);
        assert_eq!((s.start_ms(), s.end_ms()), (8_500, 18_500));
        assert_eq!(s.cursor_ms(), 10_500);
        assert_eq!(s.duration_ms(), 10_000);
    }

    #[test]
    fn preview_runs_to_end_and_restarts() {
        let mut s = session(1000, 3000);
        assert_eq!(s.toggle_preview(), PreviewAction::Play { seek_secs: 0.0 });
        assert_eq!(s.preview_tick(0.5), PreviewTick::Continue);
        assert_eq!(s.cursor_ms(), 1500);
        assert_eq!(s.preview_tick(2.1), PreviewTick::Ended);
        assert_eq!(s.cursor_ms(), 3000);
        assert!(!s.is_previewing());
        assert_eq!(s.preview_tick(0.1), PreviewTick::Idle);

        // At the end, playing again restarts from the start.
        assert_eq!(s.toggle_preview(), PreviewAction::Play { seek_secs: 0.0 });
        assert_eq!(s.cursor_ms(), 1000);
        assert_eq!(s.toggle_preview(), PreviewAction::Pause);
    }

    #[test]
    fn preview_resumes_from_cursor() {
        let mut s = session(1000, 3000);
        s.set_cursor(2000.0);
        assert_eq!(s.toggle_preview(), PreviewAction::Play { seek_secs: 1.0 });
        assert_eq!(s.preview_seek_target(Some(5.0)), None);
        s.stop_preview();
        assert_eq!(s.preview_seek_target(Some(5.0)), Some(1.0));
        assert_eq!(s.preview_seek_target(Some(0.5)), None);
        assert_eq!(s.preview_seek_target(None), Some(1.0));
    }

    #[test]
    fn split_point_requires_interior_cursor() {
        let mut s = session(1000, 3000);
        assert_eq!(s.split_point(), None);
        s.set_cursor(3000.0);
        assert_eq!(s.split_point(), None);
        s.set_cursor(2000.0);
        assert_eq!(s.split_point(), Some(2000));
    }

    #[test]
    fn staged_trim_reports_changes() {
        let mut s = session(1000, 3000);
        s.commit_end_text("00:02.500").unwrap();
        assert_eq!(s.staged_trim(), Some((1000, 2500)));
    }
}
