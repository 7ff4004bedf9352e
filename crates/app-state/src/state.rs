//! Timeline entities: tracks, clips and clip transforms.
//!
//! Times are whole milliseconds. A clip always satisfies `start_ms < end_ms`;
//! every mutator in [`crate::timeline::Timeline`] rejects edits that would
//! break that.

use serde::{Deserialize, Serialize};
use sf_common::{colors, Resolution};

/// Kind of content a track (and each of its clips) carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    /// Text overlays. Legacy project files call these `"telop"`.
    #[serde(alias = "telop")]
    Caption,
    Audio,
}

impl TrackKind {
    /// Timeline color for clips of this kind.
    pub fn color(self) -> &'static str {
        match self {
            TrackKind::Video => colors::VIDEO,
            TrackKind::Caption => colors::CAPTION,
            TrackKind::Audio => colors::AUDIO,
        }
    }

    /// Display label for an implicitly created track.
    pub fn default_label(self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Caption => "Captions",
            TrackKind::Audio => "Audio",
        }
    }

    /// Id prefix for implicitly created tracks (`video-1`, `caption-1`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Caption => "caption",
            TrackKind::Audio => "audio",
        }
    }

    /// Whether clips of this kind reference source media.
    pub fn is_media(self) -> bool {
        !matches!(self, TrackKind::Caption)
    }
}

/// Position and scale of a clip on the 1080x1920 canvas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipTransform {
    /// Horizontal center in canvas pixels.
    pub x: f64,
    /// Vertical center in canvas pixels.
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ClipTransform {
    fn default() -> Self {
        let (x, y) = Resolution::VERTICAL_HD.center();
        Self {
            x,
            y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl ClipTransform {
    /// Return this transform with every field present in `patch` overwritten.
    pub fn merged(self, patch: &TransformPatch) -> Self {
        Self {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            scale_x: patch.scale_x.unwrap_or(self.scale_x),
            scale_y: patch.scale_y.unwrap_or(self.scale_y),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial transform update; `None` fields are left untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

impl TransformPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.scale_x.is_none() && self.scale_y.is_none()
    }
}

/// A time-bounded unit of content on a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipState {
    /// Unique clip identifier.
    pub id: String,
    /// Owning track.
    pub track_id: String,
    pub kind: TrackKind,
    /// Start on the timeline (ms).
    pub start_ms: u64,
    /// End on the timeline (ms), exclusive for splitting, inclusive for activity.
    pub end_ms: u64,
    /// File name for media clips, literal text for caption clips.
    pub label: String,
    /// Source media path; `None` for captions.
    #[serde(default)]
    pub source: Option<String>,
    pub color: String,
    /// `None` means the default centered, unscaled transform.
    #[serde(default)]
    pub transform: Option<ClipTransform>,
}

impl ClipState {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Whether `time_ms` falls inside `[start_ms, end_ms]`.
    pub fn contains(&self, time_ms: f64) -> bool {
        time_ms >= self.start_ms as f64 && time_ms <= self.end_ms as f64
    }

    /// Offset into the clip (seconds) for a timeline position.
    pub fn source_offset_secs(&self, time_ms: f64) -> f64 {
        ((time_ms - self.start_ms as f64) / 1000.0).max(0.0)
    }

    /// The transform in effect, falling back to the default.
    pub fn effective_transform(&self) -> ClipTransform {
        self.transform.unwrap_or_default()
    }
}

/// An ordered collection of clips of a single kind.
///
/// Clip order is insertion order, not time order; overlapping clips are allowed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackState {
    /// Unique track identifier.
    pub id: String,
    pub kind: TrackKind,
    /// Display name.
    pub label: String,
    /// Whether the track's audio is muted.
    #[serde(default)]
    pub muted: bool,
    /// Clips on this track.
    #[serde(default)]
    pub clips: Vec<ClipState>,
}

impl TrackState {
    /// Create an empty, unmuted track.
    pub fn new(id: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: kind.default_label().to_string(),
            muted: false,
            clips: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Latest clip end on this track.
    pub fn end_ms(&self) -> u64 {
        self.clips.iter().map(|c| c.end_ms).max().unwrap_or(0)
    }
}
