//! Per-unit staggered timing.
//!
//! Unit `i` starts `i * delay_per_unit_ms` after the caption clip starts and
//! animates for `duration_ms`. Live rendering and static previews both go
//! through [`unit_state`], so a preview at a given progress matches the frame
//! rendered at the equivalent clip time.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::keyframe::state_at;
use crate::types::{AnimationUnit, CaptionAnimation, VisualState};

/// One rendered unit of caption text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitState {
    pub text: String,
    pub state: VisualState,
}

/// Split `text` into animation units: one per character, or one per
/// whitespace-separated word.
pub fn split_units(text: &str, unit: AnimationUnit) -> Vec<String> {
    match unit {
        AnimationUnit::Character => text.chars().map(String::from).collect(),
        AnimationUnit::Word => text.split_whitespace().map(String::from).collect(),
    }
}

/// Raw (un-eased) progress of unit `index` at `elapsed_ms` since clip start.
///
/// Always in `[0, 1]`. A zero-duration animation jumps to 1 once the unit
/// has started.
pub fn unit_progress(animation: &CaptionAnimation, index: usize, elapsed_ms: f64) -> f64 {
    let unit_start = index as f64 * animation.delay_per_unit_ms as f64;
    let since_start = elapsed_ms - unit_start;
    if animation.duration_ms == 0 {
        return if since_start >= 0.0 { 1.0 } else { 0.0 };
    }
    let elapsed = since_start.max(0.0);
    (elapsed / animation.duration_ms as f64).min(1.0)
}

/// Time from clip start until the last of `unit_count` units finishes.
pub fn total_duration_ms(animation: &CaptionAnimation, unit_count: usize) -> u64 {
    match unit_count {
        0 => 0,
        n => animation.duration_ms + (n as u64 - 1) * animation.delay_per_unit_ms,
    }
}

/// Visual state of unit `index` at `elapsed_ms` since clip start.
pub fn unit_state(animation: &CaptionAnimation, index: usize, elapsed_ms: f64) -> VisualState {
    unit_state_with(animation, Easing::parse(&animation.easing), index, elapsed_ms)
}

fn unit_state_with(
    animation: &CaptionAnimation,
    easing: Easing,
    index: usize,
    elapsed_ms: f64,
) -> VisualState {
    let progress = unit_progress(animation, index, elapsed_ms);
    state_at(animation, easing.apply(progress))
}

/// States of every unit of `text` at `elapsed_ms` since the caption clip
/// started (the live render path).
pub fn caption_states(animation: &CaptionAnimation, text: &str, elapsed_ms: f64) -> Vec<UnitState> {
    let easing = Easing::parse(&animation.easing);
    split_units(text, animation.unit)
        .into_iter()
        .enumerate()
        .map(|(i, text)| UnitState {
            state: unit_state_with(animation, easing, i, elapsed_ms),
            text,
        })
        .collect()
}

/// States of every unit of `text` at normalized `progress` through the whole
/// staggered animation (the template preview path).
pub fn preview_states(animation: &CaptionAnimation, text: &str, progress: f64) -> Vec<UnitState> {
    let units = split_units(text, animation.unit).len();
    let total = total_duration_ms(animation, units) as f64;
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    caption_states(animation, text, p * total)
}
