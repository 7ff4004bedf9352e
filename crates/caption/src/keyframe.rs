//! Keyframe interpolation of caption visual state.
//!
//! Given keyframes sorted by `t` and a progress value, computes the visual
//! state by linear interpolation between the bracketing pair.

use crate::types::{CaptionAnimation, CaptionKeyframe, VisualState};

/// Evaluate a keyframe list at `progress`.
///
/// An empty list yields the neutral state. Before the first keyframe the
/// first keyframe's state is returned; after the last, the last one's.
pub fn interpolate_keyframes(keyframes: &[CaptionKeyframe], progress: f64) -> VisualState {
    let (first, last) = match (keyframes.first(), keyframes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return VisualState::default(),
    };

    if keyframes.len() == 1 || progress <= first.t {
        return first.state();
    }
    if progress >= last.t {
        return last.state();
    }

    for pair in keyframes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if progress >= a.t && progress <= b.t {
            let span = b.t - a.t;
            let local = if span > 0.0 {
                (progress - a.t) / span
            } else {
                1.0
            };
            return a.state().lerp(&b.state(), local);
        }
    }

    // Unsorted input
    last.state()
}

/// Visual state of one unit at eased progress `progress`.
///
/// Keyframe animations interpolate their keyframes; from/to animations fade
/// opacity from `from.opacity` (default 0) to `to.opacity` (default 1) and
/// leave every other property neutral.
pub fn state_at(animation: &CaptionAnimation, progress: f64) -> VisualState {
    if let Some(keyframes) = animation.active_keyframes() {
        return interpolate_keyframes(keyframes, progress);
    }

    let from = animation
        .from
        .as_ref()
        .and_then(|e| e.opacity)
        .unwrap_or(0.0);
    let to = animation
        .to
        .as_ref()
        .and_then(|e| e.opacity)
        .unwrap_or(1.0);
    VisualState {
        opacity: crate::types::lerp(from, to, progress),
        ..VisualState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnimationEndpoint;

    fn kf(t: f64, opacity: f64, translate_y: f64, scale: f64) -> CaptionKeyframe {
        CaptionKeyframe {
            t,
            opacity: Some(opacity),
            translate_y: Some(translate_y),
            scale: Some(scale),
            ..Default::default()
        }
    }

    fn bounce() -> Vec<CaptionKeyframe> {
        vec![
            kf(0.0, 0.0, 40.0, 0.3),
            kf(0.5, 1.0, -12.0, 1.05),
            kf(1.0, 1.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(interpolate_keyframes(&[], 0.5), VisualState::default());
    }

    #[test]
    fn single_keyframe_is_constant() {
        let only = [kf(0.3, 0.2, 5.0, 2.0)];
        assert_eq!(interpolate_keyframes(&only, 0.0).opacity, 0.2);
        assert_eq!(interpolate_keyframes(&only, 0.9).scale, 2.0);
    }

    #[test]
    fn exact_keyframe_positions() {
        let kfs = bounce();
        let s = interpolate_keyframes(&kfs, 0.0);
        assert!((s.opacity - 0.0).abs() < 1e-9);
        assert!((s.translate_y - 40.0).abs() < 1e-9);

        let s = interpolate_keyframes(&kfs, 0.5);
        assert!((s.opacity - 1.0).abs() < 1e-9);
        assert!((s.translate_y + 12.0).abs() < 1e-9);

        let s = interpolate_keyframes(&kfs, 1.0);
        assert!((s.translate_y - 0.0).abs() < 1e-9);
        assert!((s.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn interpolates_between_brackets() {
        let s = interpolate_keyframes(&bounce(), 0.25);
        assert!((s.opacity - 0.5).abs() < 1e-9);
        assert!((s.translate_y - 14.0).abs() < 1e-9);
        assert!((s.scale - 0.675).abs() < 1e-9);
    }

    #[test]
    fn clamps_outside_keyframe_range() {
        let kfs = vec![kf(0.2, 0.1, 0.0, 1.0), kf(0.8, 0.9, 0.0, 1.0)];
        assert_eq!(interpolate_keyframes(&kfs, 0.0).opacity, 0.1);
        assert_eq!(interpolate_keyframes(&kfs, 1.3).opacity, 0.9);
    }

    #[test]
    fn zero_width_segment_takes_later_keyframe() {
        let kfs = vec![
            kf(0.0, 0.0, 0.0, 1.0),
            kf(0.5, 0.2, 0.0, 1.0),
            kf(0.5, 0.8, 0.0, 1.0),
            kf(1.0, 1.0, 0.0, 1.0),
        ];
        assert_eq!(interpolate_keyframes(&kfs, 0.5).opacity, 0.2);
        let after = interpolate_keyframes(&kfs, 0.75);
        assert!((after.opacity - 0.9).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_interpolate_from_neutral() {
        let kfs = vec![
            CaptionKeyframe {
                t: 0.0,
                rotate: Some(90.0),
                ..Default::default()
            },
            CaptionKeyframe {
                t: 1.0,
                ..Default::default()
            },
        ];
        let s = interpolate_keyframes(&kfs, 0.5);
        assert!((s.rotate - 45.0).abs() < 1e-9);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn from_to_defaults() {
        let mut anim = CaptionAnimation::fade(100, 0);
        anim.from = None;
        anim.to = None;
        assert_eq!(state_at(&anim, 0.0).opacity, 0.0);
        assert_eq!(state_at(&anim, 1.0).opacity, 1.0);
        assert_eq!(state_at(&anim, 0.5).scale, 1.0);
    }

    #[test]
    fn from_to_custom_endpoints() {
        let mut anim = CaptionAnimation::fade(100, 0);
        anim.from = Some(AnimationEndpoint { opacity: Some(1.0) });
        anim.to = Some(AnimationEndpoint { opacity: Some(0.5) });
        assert!((state_at(&anim, 0.5).opacity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn keyframes_take_precedence() {
        let mut anim = CaptionAnimation::fade(100, 0);
        anim.keyframes = Some(bounce());
        assert!((state_at(&anim, 0.0).translate_y - 40.0).abs() < 1e-9);
    }
}
