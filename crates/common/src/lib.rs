//! `sf-common` -- Shared types, time utilities, errors and configuration for the
//! ShortForge editing core.
//!
//! This crate is the foundation the other editor crates depend on:
//!
//! - **Timecode**: `format_timecode` / `parse_timecode` (`MM:SS.mmm`), `Timecode`
//! - **Types**: `Resolution` (the fixed 1080x1920 canvas), `BeatMarker`, `Platform`
//! - **Errors**: `EditError`, `TimecodeError`, `ServiceError`, `ConfigError` (thiserror-based)
//! - **Config**: `EditorConfig` with TOML loading
//! - **Services**: `MediaProbe`, `BeatDetector`, `SubtitleParser`, `FontCatalog`, `Exporter`
//! - **Logging**: `init_logging` (tracing-subscriber with `EnvFilter`)

pub mod config;
pub mod error;
pub mod logging;
pub mod services;
pub mod timecode;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{EditorConfig, PlaybackConfig, SnapConfig, ZoomConfig};
pub use error::{
    ConfigError, EditError, EditResult, ServiceError, ServiceResult, TimecodeError,
};
pub use logging::{init_logging, init_test_logging};
pub use services::{
    AudioSource, BeatAnalysis, BeatDetector, ExportProgress, ExportRequest, Exporter,
    FontCatalog, MediaInfo, MediaProbe, SubtitleCue, SubtitleParser,
};
pub use timecode::{format_seconds, format_timecode, parse_seconds, parse_timecode, Timecode};
pub use types::{colors, BeatMarker, Platform, Resolution, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_FPS};
