//! Project wire form: the JSON document a ShortForge project is saved as.
//!
//! Project-level keys are snake_case; clip keys are camelCase. A clip's
//! transform is omitted when it is the default centered, unscaled one.

use serde::{Deserialize, Serialize};
use sf_app_state::{ClipTransform, TrackKind};
use sf_common::{BeatMarker, Platform, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_FPS};

/// Project format version written by this crate.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Top-level project document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: String,
    pub metadata: ProjectMetadata,
    pub canvas: Canvas,
    #[serde(default)]
    pub tracks: Vec<TrackData>,
    #[serde(default)]
    pub beat_markers: Vec<BeatMarker>,
    /// Tempo of the analyzed music, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
}

impl ProjectFile {
    /// A new empty project on the default vertical canvas.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            metadata: ProjectMetadata {
                name: name.into(),
                created_at: current_iso_timestamp(),
                platform,
            },
            canvas: Canvas::default(),
            tracks: Vec::new(),
            beat_markers: Vec::new(),
            bpm: None,
        }
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    #[serde(default)]
    pub platform: Platform,
}

/// Output canvas. Transforms are always expressed in the 1080x1920 space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Timeline length; 0 lets the loader pick one.
    #[serde(default)]
    pub duration_ms: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            fps: DEFAULT_FPS,
            duration_ms: 0,
        }
    }
}

/// A track as stored in the project file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub muted: bool,
    #[serde(default)]
    pub clips: Vec<ClipData>,
}

/// A clip as stored in the project file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipData {
    pub id: String,
    pub track_id: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub start_ms: u64,
    pub end_ms: u64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub color: String,
    #[serde(default, skip_serializing_if = "is_default_transform")]
    pub transform: Option<ClipTransform>,
}

fn is_default_transform(transform: &Option<ClipTransform>) -> bool {
    transform.map_or(true, |t| t.is_default())
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
pub(crate) fn current_iso_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    iso_timestamp(secs)
}

fn iso_timestamp(epoch_secs: u64) -> String {
    let (year, month, day) = civil_from_days((epoch_secs / 86_400) as i64);
    let rem = epoch_secs % 86_400;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem / 60) % 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(transform: Option<ClipTransform>) -> ClipData {
        ClipData {
            id: "c1".into(),
            track_id: "video-1".into(),
            kind: TrackKind::Video,
            start_ms: 0,
            end_ms: 3000,
            label: "a.mp4".into(),
            source: Some("/media/a.mp4".into()),
            color: TrackKind::Video.color().into(),
            transform,
        }
    }

    #[test]
    fn clip_keys_are_camel_case() {
        let json = serde_json::to_value(clip(None)).unwrap();
        assert_eq!(json["trackId"], "video-1");
        assert_eq!(json["startMs"], 0);
        assert_eq!(json["endMs"], 3000);
        assert_eq!(json["type"], "video");
        assert!(json.get("transform").is_none());
    }

    #[test]
    fn default_transform_is_omitted() {
        let json = serde_json::to_value(clip(Some(ClipTransform::default()))).unwrap();
        assert!(json.get("transform").is_none());

        let moved = ClipTransform {
            x: 100.0,
            ..ClipTransform::default()
        };
        let json = serde_json::to_value(clip(Some(moved))).unwrap();
        assert_eq!(json["transform"]["x"], 100.0);
        assert_eq!(json["transform"]["scaleX"], 1.0);
    }

    #[test]
    fn caption_tracks_accept_legacy_type() {
        let track: TrackData =
            serde_json::from_str(r#"{ "id": "t", "type": "telop", "clips": [] }"#).unwrap();
        assert_eq!(track.kind, TrackKind::Caption);
        assert!(!track.muted);
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["type"], "caption");
        assert!(json.get("muted").is_none());
    }

    #[test]
    fn new_project_defaults() {
        let p = ProjectFile::new("Reel", Platform::InstagramReels);
        assert_eq!(p.version, CURRENT_VERSION);
        assert_eq!(p.canvas.width, 1080);
        assert_eq!(p.canvas.height, 1920);
        assert_eq!(p.canvas.fps, 30);
        assert!(p.metadata.created_at.ends_with('Z'));
        assert_eq!(p.clip_count(), 0);
    }

    #[test]
    fn iso_timestamp_known_dates() {
        assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(iso_timestamp(951_782_400), "2000-02-29T00:00:00Z");
        assert_eq!(iso_timestamp(1_700_000_000), "2023-11-14T22:13:20Z");
    }
}
