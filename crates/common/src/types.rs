//! Core shared types: canvas geometry, beat markers, target platforms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas resolution in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// The fixed 9:16 vertical canvas every clip transform is expressed in.
    pub const VERTICAL_HD: Self = Self {
        width: 1080,
        height: 1920,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Center point of the canvas, the default clip position.
    pub fn center(self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VERTICAL_HD
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Width of the editing canvas.
pub const CANVAS_WIDTH: u32 = Resolution::VERTICAL_HD.width;
/// Height of the editing canvas.
pub const CANVAS_HEIGHT: u32 = Resolution::VERTICAL_HD.height;
/// Frame rate new projects are created with.
pub const DEFAULT_FPS: u32 = 30;

/// A detected beat on the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeatMarker {
    pub time_ms: u64,
    /// Relative onset strength in `[0, 1]`.
    pub strength: f64,
}

impl BeatMarker {
    pub fn new(time_ms: u64, strength: f64) -> Self {
        Self { time_ms, strength }
    }
}

/// Short-form platform a project targets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Tiktok,
    YoutubeShorts,
    InstagramReels,
}

impl Platform {
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Tiktok => "TikTok",
            Platform::YoutubeShorts => "YouTube Shorts",
            Platform::InstagramReels => "Instagram Reels",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Timeline colors per track kind.
pub mod colors {
    pub const VIDEO: &str = "#3b82f6";
    pub const CAPTION: &str = "#f59e0b";
    pub const AUDIO: &str = "#22c55e";
}
