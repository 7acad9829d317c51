#![allow(clippy::float_cmp)]

use super::*;
use crate::config::EditorConfig;

fn seeded_core() -> EngineCore {
    EngineCore::new(&EditorConfig { color_seed: Some(1), ..EditorConfig::default() })
}

#[test]
fn parse_reads_every_event_type() {
    let events = parse(
        r#"[
            {"type": "down", "x": 1, "y": 2},
            {"type": "move", "x": 3, "y": 4},
            {"type": "up"},
            {"type": "transform", "scale_x": 0.5, "scale_y": 1, "x": 1, "y": 2},
            {"type": "marker_drop", "x": 10, "y": 20},
            {"type": "camera", "pan_x": 0, "pan_y": 0, "zoom": 2},
            {"type": "background_loaded", "width": 200, "height": 300}
        ]"#,
    )
    .unwrap();
    assert_eq!(events.len(), 7);
    assert_eq!(events[0], ScriptEvent::Down { x: 1.0, y: 2.0, button: 0 });
    assert_eq!(events[2], ScriptEvent::Up);
    assert_eq!(events[4], ScriptEvent::MarkerDrop { x: 10.0, y: 20.0 });
}

#[test]
fn parse_rejects_unknown_type() {
    let err = parse(r#"[{"type": "teleport"}]"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid gesture script"));
}

#[test]
fn parse_rejects_non_array() {
    assert!(parse(r#"{"type": "up"}"#).is_err());
}

#[test]
fn run_draws_rectangle() {
    let mut core = seeded_core();
    let events = vec![
        ScriptEvent::Down { x: 100.0, y: 100.0, button: 0 },
        ScriptEvent::Move { x: 180.0, y: 160.0 },
        ScriptEvent::Up,
    ];
    let summary = run(&mut core, &events);
    assert_eq!(summary.events, 3);
    assert!(summary.actions >= 3);
    let r = core.shape().copied().unwrap();
    assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 80.0, 60.0));
}

#[test]
fn run_samples_at_most_one_frame_per_event() {
    let mut core = seeded_core();
    let events = vec![
        ScriptEvent::Down { x: 100.0, y: 100.0, button: 0 },
        ScriptEvent::Move { x: 120.0, y: 120.0 },
        ScriptEvent::Move { x: 140.0, y: 140.0 },
        ScriptEvent::Up,
    ];
    let summary = run(&mut core, &events);
    // The release needs no redraw because the rectangle is already normalized.
    assert_eq!(summary.frames, 3);
}

#[test]
fn apply_background_loaded_updates_slot() {
    let mut core = seeded_core();
    apply(&mut core, &ScriptEvent::BackgroundLoaded { width: 200.0, height: 300.0 });
    assert!(core.state.background.is_loaded());
}

#[test]
fn parse_reads_optional_button() {
    let events = parse(r#"[{"type": "down", "x": 5, "y": 6, "button": 2}]"#).unwrap();
    assert_eq!(events[0], ScriptEvent::Down { x: 5.0, y: 6.0, button: 2 });
}

#[test]
fn back_button_down_does_not_replace_rectangle() {
    let mut core = seeded_core();
    let events = parse(
        r#"[
            {"type": "down", "x": 100, "y": 100},
            {"type": "move", "x": 180, "y": 160},
            {"type": "up"},
            {"type": "down", "x": 400, "y": 400, "button": 3},
            {"type": "up"}
        ]"#,
    )
    .unwrap();
    run(&mut core, &events);
    let r = core.shape().copied().unwrap();
    assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 80.0, 60.0));
}
