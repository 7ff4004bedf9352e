//! `sf-project` -- Project documents for the ShortForge editor.
//!
//! This crate converts between the editor's timeline and the JSON project
//! document. It supports:
//!
//! - **Wire form**: `ProjectFile` with metadata, canvas, tracks and beat markers
//! - **Migration**: rewriting legacy `0.1.0` documents to the current layout
//! - **Validation**: rejecting documents the editor cannot represent
//! - **Conversion**: capturing an `Editor` and loading a project into one
//!
//! Reading and writing files is left to the host application.
//!
//! # Usage
//!
//! ```rust
//! use sf_app_state::Editor;
//! use sf_project::{from_json_string, to_json_string, ProjectFile};
//!
//! let mut editor = Editor::default();
//! editor.add_caption("Hello", 0, 1500).unwrap();
//!
//! let json = to_json_string(&ProjectFile::from_editor(&editor, "Demo")).unwrap();
//! let project = from_json_string(&json).unwrap();
//!
//! let mut restored = Editor::default();
//! project.load_into(&mut restored);
//! assert_eq!(restored.timeline(), editor.timeline());
//! ```

pub mod convert;
pub mod error;
pub mod load;
pub mod migrate;
pub mod save;
pub mod types;

// Re-export primary API at crate root
pub use error::{ProjectError, ProjectResult};
pub use load::{from_json_string, validate_project};
pub use migrate::{migrate_project, LEGACY_VERSION};
pub use save::{to_json_string, to_json_string_compact};
pub use types::{Canvas, ClipData, ProjectFile, ProjectMetadata, TrackData, CURRENT_VERSION};
