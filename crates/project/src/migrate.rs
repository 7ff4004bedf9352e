//! Version migration: rewrites older project JSON into the current layout.
//!
//! Version history:
//! - `0.1.0`: snake_case clip keys, caption tracks typed `"telop"`, clips
//!   without `type`/`trackId`/`color`, captions carrying their text in `text`.
//! - `1.0.0`: the current wire form (see [`crate::types`]).

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ProjectError, ProjectResult};
use crate::types::CURRENT_VERSION;

/// Oldest layout the loader understands.
pub const LEGACY_VERSION: &str = "0.1.0";

/// Migrate a project JSON value to [`CURRENT_VERSION`] in place.
///
/// Returns the version the document had before migration.
pub fn migrate_project(value: &mut Value) -> ProjectResult<String> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| ProjectError::invalid("project root must be a JSON object"))?;

    let version = extract_version(obj)?;
    let parsed = parse_version(&version).ok_or_else(|| ProjectError::UnsupportedVersion {
        version: version.clone(),
    })?;
    let current = parse_version(CURRENT_VERSION).unwrap_or((1, 0, 0));

    if parsed > current {
        return Err(ProjectError::UnsupportedVersion { version });
    }
    if parsed == current {
        debug!(version = %version, "Project is at current version, no migration needed");
        return Ok(version);
    }

    match version.as_str() {
        LEGACY_VERSION => {
            info!(from = LEGACY_VERSION, to = CURRENT_VERSION, "Migrating project");
            migrate_0_1_to_1_0(obj)?;
        }
        other => {
            return Err(ProjectError::MigrationFailed {
                from: other.to_string(),
                to: CURRENT_VERSION.to_string(),
                reason: format!("no migration path from version {other}"),
            });
        }
    }

    obj.insert("version".into(), Value::String(CURRENT_VERSION.into()));
    info!(from = %version, to = CURRENT_VERSION, "Project migration complete");
    Ok(version)
}

fn extract_version(obj: &Map<String, Value>) -> ProjectResult<String> {
    match obj.get("version") {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(ProjectError::invalid("version field must be a string")),
        None => {
            warn!("Project has no version field, assuming {LEGACY_VERSION}");
            Ok(LEGACY_VERSION.to_string())
        }
    }
}

/// `"MAJOR.MINOR.PATCH"` as a comparable tuple.
fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let triple = (parts.next()??, parts.next()??, parts.next()??);
    parts.next().is_none().then_some(triple)
}

fn migrate_0_1_to_1_0(obj: &mut Map<String, Value>) -> ProjectResult<()> {
    with_object(obj, "metadata", |metadata| {
        ensure_field(metadata, "name", Value::from("Untitled Project"));
        ensure_field(metadata, "created_at", Value::from("1970-01-01T00:00:00Z"));
        ensure_field(metadata, "platform", Value::from("tiktok"));
    });
    with_object(obj, "canvas", |canvas| {
        ensure_field(canvas, "width", Value::from(sf_common::CANVAS_WIDTH));
        ensure_field(canvas, "height", Value::from(sf_common::CANVAS_HEIGHT));
        ensure_field(canvas, "fps", Value::from(sf_common::DEFAULT_FPS));
        ensure_field(canvas, "duration_ms", Value::from(0u64));
    });

    ensure_field(obj, "beat_markers", Value::Array(Vec::new()));

    let tracks = match obj
        .entry("tracks")
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(tracks) => tracks,
        _ => return Err(legacy_failure("tracks is not an array")),
    };

    for track in tracks.iter_mut() {
        let track = track
            .as_object_mut()
            .ok_or_else(|| legacy_failure("track is not an object"))?;
        migrate_track(track)?;
    }
    Ok(())
}

fn migrate_track(track: &mut Map<String, Value>) -> ProjectResult<()> {
    if track.get("type").and_then(Value::as_str) == Some("telop") {
        track.insert("type".into(), Value::from("caption"));
    }
    let track_id = track.get("id").cloned().unwrap_or(Value::Null);
    let kind = track.get("type").cloned().unwrap_or(Value::Null);
    let color = kind
        .as_str()
        .and_then(kind_color)
        .ok_or_else(|| legacy_failure(format!("track {track_id} has unknown type {kind}")))?;

    let Some(Value::Array(clips)) = track.get_mut("clips") else {
        track.insert("clips".into(), Value::Array(Vec::new()));
        return Ok(());
    };

    for clip in clips.iter_mut() {
        let clip = clip
            .as_object_mut()
            .ok_or_else(|| legacy_failure("clip is not an object"))?;
        rename_key(clip, "track_id", "trackId");
        rename_key(clip, "start_ms", "startMs");
        rename_key(clip, "end_ms", "endMs");
        rename_key(clip, "text", "label");
        for dropped in ["trim_start_ms", "trim_end_ms", "volume"] {
            if clip.remove(dropped).is_some() {
                debug!(key = dropped, "Dropping legacy clip field");
            }
        }

        ensure_field(clip, "trackId", track_id.clone());
        ensure_field(clip, "type", kind.clone());
        ensure_field(clip, "color", Value::from(color));
        let label = clip
            .get("source")
            .and_then(Value::as_str)
            .map(file_name)
            .unwrap_or_default();
        ensure_field(clip, "label", Value::from(label));
    }
    Ok(())
}

fn kind_color(kind: &str) -> Option<&'static str> {
    match kind {
        "video" => Some(sf_common::colors::VIDEO),
        "caption" => Some(sf_common::colors::CAPTION),
        "audio" => Some(sf_common::colors::AUDIO),
        _ => None,
    }
}

fn file_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

fn legacy_failure(reason: impl Into<String>) -> ProjectError {
    ProjectError::MigrationFailed {
        from: LEGACY_VERSION.into(),
        to: CURRENT_VERSION.into(),
        reason: reason.into(),
    }
}

/// Run `f` on the object at `key`, creating it (or replacing a non-object).
fn with_object(obj: &mut Map<String, Value>, key: &str, f: impl FnOnce(&mut Map<String, Value>)) {
    let mut map = match obj.remove(key) {
        Some(Value::Object(map)) => map,
        Some(_) => {
            warn!(key, "Replacing non-object field during migration");
            Map::new()
        }
        None => Map::new(),
    };
    f(&mut map);
    obj.insert(key.to_string(), Value::Object(map));
}

fn ensure_field(obj: &mut Map<String, Value>, key: &str, default: Value) {
    obj.entry(key).or_insert(default);
}

fn rename_key(obj: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = obj.remove(from) {
        obj.entry(to).or_insert(value);
    }
}
