//! End-to-end editing flows through the `Editor`.

use sf_app_state::{Editor, EditorCommand, TrackKind, TransformPatch};
use sf_common::{EditorConfig, SubtitleCue};

fn cue(index: u32, start_ms: u64, end_ms: u64, text: &str) -> SubtitleCue {
    SubtitleCue {
        index,
        start_ms,
        end_ms,
        text: text.into(),
    }
}

#[test]
fn import_edit_and_undo_everything() {
    let mut ed = Editor::default();
    let video = ed.add_video_clip("/media/intro.mp4", 12_000).unwrap();
    ed.add_audio_clip("/media/bgm.mp3", 30_000).unwrap();
    ed.import_caption_cues(&[
        cue(1, 0, 2000, "Welcome back"),
        cue(2, 2000, 4000, "Today we build a bike"),
    ])
    .unwrap();

    let kinds: Vec<TrackKind> = ed.timeline().tracks().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TrackKind::Video, TrackKind::Audio, TrackKind::Caption]);

    let (left, _right) = ed.split_clip(&video, 6000).unwrap();
    ed.update_clip_transform(&left, &TransformPatch::scale(1.5, 1.5))
        .unwrap();
    ed.toggle_track_mute("audio-1").unwrap();

    let steps = ed.history().undo_count();
    assert_eq!(steps, 6);
    for _ in 0..steps {
        assert!(ed.undo());
    }
    assert!(ed.timeline().is_empty());
    assert!(!ed.undo());
}

#[test]
fn new_edit_clears_redo() {
    let mut ed = Editor::default();
    let id = ed.add_video_clip("/media/a.mp4", 5000).unwrap();
    ed.move_clip(&id, 1000).unwrap();
    ed.undo();
    assert!(ed.history().can_redo());

    ed.move_clip(&id, 2000).unwrap();
    assert!(!ed.history().can_redo());
    assert!(!ed.redo());
}

#[test]
fn history_depth_is_capped() {
    let config = EditorConfig {
        history_depth: 5,
        ..EditorConfig::default()
    };
    let mut ed = Editor::new(config);
    let id = ed.add_video_clip("/media/a.mp4", 5000).unwrap();
    for i in 1..=10 {
        ed.move_clip(&id, i * 100).unwrap();
    }
    assert_eq!(ed.history().undo_count(), 5);
    for _ in 0..5 {
        ed.undo();
    }
    // The oldest surviving entry is the state before the sixth move.
    assert_eq!(ed.timeline().find_clip(&id).unwrap().start_ms, 500);
}

#[test]
fn deleting_last_caption_drops_track_and_selection() {
    let mut ed = Editor::default();
    let caption = ed.add_caption("Subscribe!", 1000, 3000).unwrap();
    ed.select_clip(&caption, false).unwrap();
    ed.select_track("caption-1", false).unwrap();

    ed.delete_clip(&caption).unwrap();
    assert!(ed.timeline().find_track("caption-1").is_none());
    assert!(ed.selection().is_empty());

    ed.undo();
    assert!(ed.timeline().find_clip(&caption).is_some());
    assert!(ed.selection().is_empty());
}

#[test]
fn drag_gesture_through_commands_is_one_step() {
    let mut ed = Editor::default();
    let id = ed.add_video_clip("/media/a.mp4", 5000).unwrap();
    let depth = ed.history().undo_count();

    ed.dispatch(EditorCommand::BeginGesture("Drag clip".into()), &mut ());
    for start in (0..2000).step_by(250) {
        ed.dispatch(
            EditorCommand::MoveClip {
                clip_id: id.clone(),
                start_ms: start,
                snap: false,
            },
            &mut (),
        );
    }
    ed.dispatch(EditorCommand::EndGesture, &mut ());

    assert_eq!(ed.history().undo_count(), depth + 1);
    assert_eq!(ed.history().undo_label(), Some("Drag clip"));
    ed.dispatch(EditorCommand::Undo, &mut ());
    assert_eq!(ed.timeline().find_clip(&id).unwrap().start_ms, 0);
}

#[test]
fn gesture_without_change_records_nothing() {
    let mut ed = Editor::default();
    ed.add_video_clip("/media/a.mp4", 5000).unwrap();
    let depth = ed.history().undo_count();
    ed.begin_gesture("Scrub");
    assert!(!ed.end_gesture());
    assert_eq!(ed.history().undo_count(), depth);
}

#[test]
fn removing_track_closes_session_on_its_clip() {
    let mut ed = Editor::default();
    let id = ed.add_audio_clip("/media/bgm.mp3", 8000).unwrap();
    ed.open_edit_session(&id, &mut ()).unwrap();
    ed.remove_track("audio-1").unwrap();
    assert!(ed.edit_session().is_none());
    assert!(ed.timeline().is_empty());
}
