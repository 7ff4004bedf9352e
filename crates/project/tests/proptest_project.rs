//! Property-based tests for project capture, serialization and reload.

use proptest::prelude::*;
use sf_app_state::{Editor, TransformPatch};
use sf_project::{from_json_string, to_json_string_compact, ProjectFile};

// =============================================================================
// Editor -> JSON -> Editor
// =============================================================================

proptest! {
    #[test]
    fn saved_document_reloads_identically(
        videos in prop::collection::vec(100u64..20_000, 0..4),
        captions in prop::collection::vec((0u64..10_000, 100u64..3000), 0..4),
        offset in 0.0f64..500.0,
    ) {
        let mut editor = Editor::default();
        for (i, duration) in videos.iter().enumerate() {
            let id = editor.add_video_clip(&format!("/media/v{i}.mp4"), *duration).unwrap();
            if i % 2 == 1 {
                editor.update_clip_transform(&id, &TransformPatch::position(offset, 960.0)).unwrap();
            }
        }
        for (start, len) in &captions {
            editor.add_caption("caption", *start, start + len).unwrap();
        }

        let json = to_json_string_compact(&ProjectFile::from_editor(&editor, "prop")).unwrap();
        let project = from_json_string(&json).unwrap();
        let mut restored = Editor::default();
        project.load_into(&mut restored);

        prop_assert_eq!(restored.timeline(), editor.timeline());
        prop_assert_eq!(restored.cursor().duration_ms(), editor.cursor().duration_ms());
    }
}
