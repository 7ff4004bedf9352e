//! Editor configuration: history depth, clip limits, zoom, playback cadence, snapping.
//!
//! Every field has a default, so a TOML file only needs the keys it overrides:
//!
//! ```toml
//! history_depth = 50
//!
//! [playback]
//! drift_tolerance_ms = 200
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo entries kept (oldest discarded).
    pub history_depth: usize,
    /// Shortest clip the interactive editors will produce.
    pub min_clip_duration_ms: u64,
    /// Timeline duration for an empty project.
    pub default_duration_ms: u64,
    pub zoom: ZoomConfig,
    pub playback: PlaybackConfig,
    pub snap: SnapConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 100,
            min_clip_duration_ms: 100,
            default_duration_ms: 15_000,
            zoom: ZoomConfig::default(),
            playback: PlaybackConfig::default(),
            snap: SnapConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(
            history_depth = config.history_depth,
            min_clip_ms = config.min_clip_duration_ms,
            "Editor config loaded"
        );
        Ok(config)
    }

    /// Reject values the editor cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "history_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.min_clip_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "min_clip_duration_ms",
                reason: "must be positive".into(),
            });
        }
        if !(self.zoom.min > 0.0 && self.zoom.min <= self.zoom.max) {
            return Err(ConfigError::Invalid {
                field: "zoom",
                reason: format!("bounds [{}, {}] are inverted or non-positive", self.zoom.min, self.zoom.max),
            });
        }
        if self.zoom.step.is_nan() || self.zoom.step <= 1.0 {
            return Err(ConfigError::Invalid {
                field: "zoom.step",
                reason: format!("{} must be greater than 1", self.zoom.step),
            });
        }
        if !(self.playback.publish_hz.is_finite() && self.playback.publish_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "playback.publish_hz",
                reason: format!("{} is not a positive rate", self.playback.publish_hz),
            });
        }
        if self.playback.resync_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "playback.resync_interval_ms",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

/// Timeline zoom limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Multiplier applied by zoom-in, divisor applied by zoom-out.
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
            step: 1.25,
        }
    }
}

/// Playback engine cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Rate at which the cursor is published to observers.
    pub publish_hz: f64,
    /// Interval between audio re-synchronization passes.
    pub resync_interval_ms: u64,
    /// Audio drift beyond this is corrected with a hard seek.
    pub drift_tolerance_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            publish_hz: 30.0,
            resync_interval_ms: 500,
            drift_tolerance_ms: 300,
        }
    }
}

/// Snap-to-beat behavior for drag gestures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    pub threshold_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_behavior() {
        let config = EditorConfig::default();
        assert_eq!(config.history_depth, 100);
        assert_eq!(config.min_clip_duration_ms, 100);
        assert_eq!(config.default_duration_ms, 15_000);
        assert_eq!(config.playback.drift_tolerance_ms, 300);
        assert_eq!(config.playback.resync_interval_ms, 500);
        assert!(config.snap.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EditorConfig::from_toml_str(
            r#"
            history_depth = 20

            [playback]
            drift_tolerance_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.history_depth, 20);
        assert_eq!(config.playback.drift_tolerance_ms, 150);
        assert_eq!(config.playback.resync_interval_ms, 500);
        assert_eq!(config.zoom, ZoomConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn rejects_inverted_zoom() {
        let err = EditorConfig::from_toml_str("[zoom]\nmin = 5.0\nmax = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom", .. }));
    }

    #[test]
    fn rejects_zero_history() {
        let err = EditorConfig::from_toml_str("history_depth = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "history_depth",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = EditorConfig::from_toml_str("history_depth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_nan_in_code_built_config() {
        let mut config = EditorConfig::default();
        config.zoom.max = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.zoom.step = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "zoom.step", .. })
        ));

        let mut config = EditorConfig::default();
        config.playback.publish_hz = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "playback.publish_hz", .. })
        ));
    }
}
