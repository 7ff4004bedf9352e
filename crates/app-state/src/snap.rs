//! Snapping timeline positions to detected beats.

use sf_common::BeatMarker;

/// Beat closest to `time_ms`. Ties go to the earlier marker in the list.
pub fn nearest_beat(beats: &[BeatMarker], time_ms: u64) -> Option<&BeatMarker> {
    beats.iter().min_by_key(|b| b.time_ms.abs_diff(time_ms))
}

/// Snap `time_ms` to the nearest beat when it lies within `threshold_ms`,
/// otherwise return it unchanged.
pub fn snap_to_beat(beats: &[BeatMarker], time_ms: u64, threshold_ms: u64) -> u64 {
    match nearest_beat(beats, time_ms) {
        Some(beat) if beat.time_ms.abs_diff(time_ms) <= threshold_ms => beat.time_ms,
        _ => time_ms,
    }
}

/// Beats inside `[start_ms, end_ms]`.
pub fn beats_in_range(beats: &[BeatMarker], start_ms: u64, end_ms: u64) -> impl Iterator<Item = &BeatMarker> {
    beats
        .iter()
        .filter(move |b| b.time_ms >= start_ms && b.time_ms <= end_ms)
}
