//! `sf-caption` -- Caption animation for the ShortForge editor.
//!
//! Evaluates how each unit (character or word) of a caption looks at a given
//! moment. It handles:
//!
//! - **Templates**: JSON presets pairing an animation with a default style
//! - **Easing**: `linear`, the CSS named curves and `cubic-bezier(...)`
//! - **Keyframes**: linear interpolation of opacity, translation, scale, rotation
//! - **Staggering**: per-unit start offsets, live render and preview paths
//!
//! # Usage
//!
//! ```rust
//! use sf_caption::{caption_states, CaptionAnimation};
//!
//! let fade = CaptionAnimation::fade(100, 50);
//! let units = caption_states(&fade, "Hi!", 75.0);
//! assert_eq!(units.len(), 3);
//! assert!(units[0].state.opacity > units[1].state.opacity);
//! ```

pub mod easing;
pub mod error;
pub mod keyframe;
pub mod stagger;
pub mod template;
pub mod types;

pub use easing::{apply_easing, parse_cubic_bezier, Easing};
pub use error::{CaptionError, CaptionResult};
pub use keyframe::{interpolate_keyframes, state_at};
pub use stagger::{
    caption_states, preview_states, split_units, total_duration_ms, unit_progress, unit_state,
    UnitState,
};
pub use template::{load_templates_from_dir, CaptionTemplate};
pub use types::{
    AnimationEndpoint, AnimationUnit, CaptionAnimation, CaptionKeyframe, CaptionPosition,
    CaptionStyle, OutlineStyle, ShadowStyle, VisualState,
};
