//! Project serialization to JSON strings. Writing to disk is up to the host.

use tracing::debug;

use crate::error::ProjectResult;
use crate::types::ProjectFile;

/// Serialize a project to a pretty-printed JSON string.
pub fn to_json_string(project: &ProjectFile) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(project)?;
    debug!(
        project_name = %project.metadata.name,
        json_len = json.len(),
        "Serialized project to JSON"
    );
    Ok(json)
}

/// Serialize a project to a compact (non-pretty) JSON string.
pub fn to_json_string_compact(project: &ProjectFile) -> ProjectResult<String> {
    let json = serde_json::to_string(project)?;
    debug!(
        project_name = %project.metadata.name,
        json_len = json.len(),
        "Serialized project to compact JSON"
    );
    Ok(json)
}
