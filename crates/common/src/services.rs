//! Contracts for the external collaborators the editor calls into.
//!
//! Media probing, beat detection, subtitle parsing, font enumeration and
//! export live outside the editing core. The core programs against these
//! traits only; a failure is returned to the caller and never touches
//! timeline state.

use std::path::{Path, PathBuf};

use crossbeam::channel::Sender;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::{BeatMarker, Platform};

/// Result of probing a source media file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub duration_ms: u64,
    pub fps: f64,
    pub has_audio: bool,
}

/// Beat/tempo analysis of an audio source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeatAnalysis {
    pub bpm: f64,
    pub beats: Vec<BeatMarker>,
}

/// One cue parsed from a subtitle file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// An audio source placed on the timeline, as handed to the exporter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSource {
    pub path: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Everything the exporter needs to render the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub input_video: PathBuf,
    pub output_path: PathBuf,
    pub platform: Platform,
    pub subtitle_file: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
    pub audio_sources: Vec<AudioSource>,
}

/// Progress report emitted while an export runs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportProgress {
    pub current_frame: u64,
    pub total_frames: u64,
    pub percent: f64,
}

impl ExportProgress {
    pub fn new(current_frame: u64, total_frames: u64) -> Self {
        let percent = if total_frames == 0 {
            100.0
        } else {
            (current_frame as f64 / total_frames as f64 * 100.0).min(100.0)
        };
        Self {
            current_frame,
            total_frames,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_frame >= self.total_frames
    }
}

/// Extracts duration, resolution and frame rate from a source file.
pub trait MediaProbe {
    fn probe(&self, path: &Path) -> ServiceResult<MediaInfo>;
}

/// Detects beats and tempo in an audio source.
pub trait BeatDetector {
    fn detect_beats(&self, path: &Path) -> ServiceResult<BeatAnalysis>;
}

/// Parses a subtitle file (SRT) into cues.
pub trait SubtitleParser {
    fn parse_subtitles(&self, path: &Path) -> ServiceResult<Vec<SubtitleCue>>;
}

/// Enumerates fonts installed on the host.
pub trait FontCatalog {
    fn list_fonts(&self) -> ServiceResult<Vec<String>>;
}

/// Renders the final video.
///
/// Progress is streamed through `progress`; the UI drains the receiver.
/// A dropped receiver must not abort the export.
pub trait Exporter {
    fn export(
        &self,
        request: &ExportRequest,
        progress: Sender<ExportProgress>,
    ) -> ServiceResult<PathBuf>;
}
