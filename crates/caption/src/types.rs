//! Caption template data model: animation description, keyframes, visual
//! state and text style.
//!
//! All types round-trip through the template JSON format (snake_case keys).

use serde::{Deserialize, Serialize};

/// The granularity a caption animation staggers over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationUnit {
    #[default]
    Character,
    /// Whitespace-separated words.
    Word,
}

/// One keyframe of a multi-property animation.
///
/// `t` is normalized progress in `[0, 1]`. Missing properties take the
/// neutral value of [`VisualState::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionKeyframe {
    pub t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

impl CaptionKeyframe {
    /// The visual state this keyframe pins, with neutral defaults filled in.
    pub fn state(&self) -> VisualState {
        let neutral = VisualState::default();
        VisualState {
            opacity: self.opacity.unwrap_or(neutral.opacity),
            translate_x: self.translate_x.unwrap_or(neutral.translate_x),
            translate_y: self.translate_y.unwrap_or(neutral.translate_y),
            scale: self.scale.unwrap_or(neutral.scale),
            rotate: self.rotate.unwrap_or(neutral.rotate),
        }
    }
}

/// Endpoint of a single-property (from/to) animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// How the units of a caption animate in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionAnimation {
    #[serde(default)]
    pub unit: AnimationUnit,
    /// Animated property of a from/to animation (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Animated properties of a keyframe animation (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<AnimationEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<AnimationEndpoint>,
    /// When present and non-empty, takes precedence over `from`/`to`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes: Option<Vec<CaptionKeyframe>>,
    /// Animation length of one unit.
    pub duration_ms: u64,
    /// Start offset between consecutive units.
    #[serde(default)]
    pub delay_per_unit_ms: u64,
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_easing() -> String {
    "linear".into()
}

impl CaptionAnimation {
    /// A from/to opacity fade.
    pub fn fade(duration_ms: u64, delay_per_unit_ms: u64) -> Self {
        Self {
            unit: AnimationUnit::Character,
            property: Some("opacity".into()),
            properties: None,
            from: Some(AnimationEndpoint { opacity: Some(0.0) }),
            to: Some(AnimationEndpoint { opacity: Some(1.0) }),
            keyframes: None,
            duration_ms,
            delay_per_unit_ms,
            easing: default_easing(),
        }
    }

    /// Keyframes, if this is a keyframe animation.
    pub fn active_keyframes(&self) -> Option<&[CaptionKeyframe]> {
        self.keyframes.as_deref().filter(|k| !k.is_empty())
    }
}

/// Rendered state of one caption unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    /// Degrees.
    pub rotate: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotate: 0.0,
        }
    }
}

impl VisualState {
    /// Component-wise linear interpolation.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            opacity: lerp(self.opacity, other.opacity, t),
            translate_x: lerp(self.translate_x, other.translate_x, t),
            translate_y: lerp(self.translate_y, other.translate_y, t),
            scale: lerp(self.scale, other.scale, t),
            rotate: lerp(self.rotate, other.rotate, t),
        }
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Text outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    pub enabled: bool,
    pub color: String,
    pub width: f32,
}

/// Drop shadow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub enabled: bool,
    pub color: String,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
}

/// Position on the canvas, normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionPosition {
    pub x: f32,
    pub y: f32,
}

/// Default text style shipped with a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<CaptionPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_family: "Noto Sans JP".into(),
            font_size: 40.0,
            font_weight: 900,
            color: "#FFFFFF".into(),
            outline: None,
            shadow: None,
            position: None,
            alignment: None,
        }
    }
}
