//! Caption templates: a named animation plus its default text style.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CaptionError, CaptionResult};
use crate::stagger::{self, UnitState};
use crate::types::{CaptionAnimation, CaptionStyle};

/// A reusable caption animation preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub animation: CaptionAnimation,
    #[serde(default)]
    pub default_style: CaptionStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
}

impl CaptionTemplate {
    /// Parse and validate a template from JSON.
    pub fn from_json_str(json: &str) -> CaptionResult<Self> {
        let template: Self = serde_json::from_str(json)?;
        template.validate()?;
        debug!(id = %template.id, "Caption template loaded");
        Ok(template)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CaptionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> CaptionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject templates the interpolator cannot evaluate meaningfully.
    pub fn validate(&self) -> CaptionResult<()> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("empty id"));
        }
        if let Some(keyframes) = &self.animation.keyframes {
            if keyframes.iter().any(|k| !k.t.is_finite()) {
                return Err(self.invalid("non-finite keyframe position"));
            }
            if keyframes.windows(2).any(|w| w[1].t < w[0].t) {
                return Err(self.invalid("keyframes not sorted by t"));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> CaptionError {
        CaptionError::Invalid {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }

    /// Live states for `text` at `elapsed_ms` since the caption clip started.
    pub fn states_at(&self, text: &str, elapsed_ms: f64) -> Vec<UnitState> {
        stagger::caption_states(&self.animation, text, elapsed_ms)
    }

    /// Preview states of the template's preview text (or its name) at
    /// normalized `progress`.
    pub fn preview(&self, progress: f64) -> Vec<UnitState> {
        let text = self.preview_text.as_deref().unwrap_or(&self.name);
        stagger::preview_states(&self.animation, text, progress)
    }

    /// Total animation length for `text`.
    pub fn total_duration_ms(&self, text: &str) -> u64 {
        let units = stagger::split_units(text, self.animation.unit).len();
        stagger::total_duration_ms(&self.animation, units)
    }
}

/// Load every `*.json` template in `dir`, sorted by id.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_templates_from_dir(dir: impl AsRef<Path>) -> CaptionResult<Vec<CaptionTemplate>> {
    let dir = dir.as_ref();
    let io_err = |source| CaptionError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut templates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            match CaptionTemplate::from_file(&path) {
                Ok(template) => templates.push(template),
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping caption template"),
            }
        }
    }
    templates.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(templates)
}
