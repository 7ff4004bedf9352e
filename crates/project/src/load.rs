//! Project deserialization: parsing, migrating and validating project JSON.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{ProjectError, ProjectResult};
use crate::migrate::migrate_project;
use crate::types::ProjectFile;

/// Deserialize a project from a JSON string.
///
/// Runs version migration if the project uses an older format, then checks
/// the structural requirements the editor relies on.
pub fn from_json_string(json: &str) -> ProjectResult<ProjectFile> {
    // Parse as a generic value first so older layouts can be rewritten
    let mut value: serde_json::Value = serde_json::from_str(json)?;

    let original_version = migrate_project(&mut value)?;
    let project: ProjectFile = serde_json::from_value(value)?;

    debug!(
        project_name = %project.metadata.name,
        original_version = %original_version,
        tracks = project.tracks.len(),
        clips = project.clip_count(),
        "Deserialized project from JSON"
    );

    validate_project(&project)?;
    Ok(project)
}

/// Validate basic structural requirements of a loaded project.
///
/// Broken geometry, empty names, duplicate ids and empty clips are errors.
/// Clips whose `trackId` or `type` disagree with their track only warn; they
/// are re-parented on conversion.
pub fn validate_project(project: &ProjectFile) -> ProjectResult<()> {
    if project.metadata.name.trim().is_empty() {
        warn!("Project has empty name");
        return Err(ProjectError::invalid("project name is empty"));
    }

    let canvas = &project.canvas;
    if canvas.width == 0 || canvas.height == 0 {
        return Err(ProjectError::invalid(format!(
            "invalid canvas: {}x{}",
            canvas.width, canvas.height
        )));
    }
    if canvas.fps == 0 {
        return Err(ProjectError::invalid("invalid frame rate: 0"));
    }

    let mut track_ids = HashSet::new();
    let mut clip_ids = HashSet::new();
    for track in &project.tracks {
        if !track_ids.insert(track.id.as_str()) {
            return Err(ProjectError::invalid(format!(
                "duplicate track id {}",
                track.id
            )));
        }
        for clip in &track.clips {
            if !clip_ids.insert(clip.id.as_str()) {
                return Err(ProjectError::invalid(format!("duplicate clip id {}", clip.id)));
            }
            if clip.end_ms <= clip.start_ms {
                return Err(ProjectError::invalid(format!(
                    "clip {} ends at {} ms, not after its start at {} ms",
                    clip.id, clip.end_ms, clip.start_ms
                )));
            }
            if clip.track_id != track.id {
                warn!(
                    clip_id = %clip.id,
                    clip_track = %clip.track_id,
                    track_id = %track.id,
                    "Clip listed under a different track"
                );
            }
            if clip.kind != track.kind {
                warn!(
                    clip_id = %clip.id,
                    clip_kind = ?clip.kind,
                    track_kind = ?track.kind,
                    "Clip type differs from its track"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::to_json_string;
    use serde_json::json;
    use sf_app_state::TrackKind;
    use sf_common::Platform;

    fn current(tracks: serde_json::Value) -> String {
        json!({
            "version": "1.0.0",
            "metadata": { "name": "Reel", "created_at": "2024-06-01T12:00:00Z", "platform": "youtube_shorts" },
            "canvas": { "width": 1080, "height": 1920, "fps": 30, "duration_ms": 15000 },
            "tracks": tracks,
            "beat_markers": [{ "time_ms": 1000, "strength": 0.7 }]
        })
        .to_string()
    }

    fn video_track(clips: serde_json::Value) -> serde_json::Value {
        json!([{ "id": "video-1", "type": "video", "clips": clips }])
    }

    fn clip(id: &str, start: u64, end: u64) -> serde_json::Value {
        json!({
            "id": id, "trackId": "video-1", "type": "video",
            "startMs": start, "endMs": end, "label": "a.mp4",
            "source": "/media/a.mp4", "color": "#3b82f6"
        })
    }

    #[test]
    fn parses_current_format() {
        let project = from_json_string(&current(video_track(json!([clip("c1", 0, 4000)])))).unwrap();
        assert_eq!(project.metadata.platform, Platform::YoutubeShorts);
        assert_eq!(project.tracks[0].kind, TrackKind::Video);
        assert_eq!(project.tracks[0].clips[0].end_ms, 4000);
        assert_eq!(project.beat_markers[0].time_ms, 1000);
        assert!(project.bpm.is_none());
    }

    #[test]
    fn serialized_project_parses_back() {
        let project = from_json_string(&current(video_track(json!([clip("c1", 0, 4000)])))).unwrap();
        let again = from_json_string(&to_json_string(&project).unwrap()).unwrap();
        assert_eq!(project, again);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            from_json_string("this is not json").unwrap_err(),
            ProjectError::Json(_)
        ));
    }

    #[test]
    fn rejects_inverted_clip() {
        let err = from_json_string(&current(video_track(json!([clip("c1", 4000, 4000)])))).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidProject { .. }));
    }

    #[test]
    fn rejects_duplicate_clip_ids() {
        let json = current(video_track(json!([clip("c1", 0, 1000), clip("c1", 2000, 3000)])));
        let err = from_json_string(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate clip id c1"));
    }

    #[test]
    fn rejects_empty_name_and_canvas() {
        let mut value: serde_json::Value = serde_json::from_str(&current(json!([]))).unwrap();
        value["metadata"]["name"] = json!("  ");
        assert!(from_json_string(&value.to_string()).is_err());

        let mut value: serde_json::Value = serde_json::from_str(&current(json!([]))).unwrap();
        value["canvas"]["height"] = json!(0);
        assert!(from_json_string(&value.to_string()).is_err());
    }

    #[test]
    fn loads_legacy_project() {
        let json = json!({
            "version": "0.1.0",
            "metadata": { "name": "Old", "created_at": "2024-01-01T00:00:00Z", "platform": "tiktok" },
            "canvas": { "width": 1080, "height": 1920, "fps": 30, "duration_ms": 0 },
            "tracks": [{
                "id": "t1",
                "type": "telop",
                "clips": [{ "id": "c1", "text": "Hi there", "start_ms": 0, "end_ms": 900 }]
            }]
        });
        let project = from_json_string(&json.to_string()).unwrap();
        assert_eq!(project.version, "1.0.0");
        let caption = &project.tracks[0].clips[0];
        assert_eq!(project.tracks[0].kind, TrackKind::Caption);
        assert_eq!(caption.label, "Hi there");
        assert_eq!(caption.track_id, "t1");
        assert!(caption.source.is_none());
    }
}
