//! End-to-end gesture scripts through the public API.
#![allow(clippy::float_cmp)]

use shape_editor::camera::Point;
use shape_editor::config::EditorConfig;
use shape_editor::engine::{Action, EngineCore};
use shape_editor::hit::NodeTag;
use shape_editor::info::RectInfo;
use shape_editor::input::{Button, GestureMode};
use shape_editor::script;

fn core() -> EngineCore {
    EngineCore::new(&EditorConfig { color_seed: Some(7), ..EditorConfig::default() })
}

fn replay(core: &mut EngineCore, json: &str) {
    let events = script::parse(json).unwrap();
    script::run(core, &events);
}

#[test]
fn draw_drag_and_reported_resize() {
    let mut core = core();
    replay(
        &mut core,
        r#"[
            {"type": "down", "x": 100, "y": 100},
            {"type": "move", "x": 180, "y": 160},
            {"type": "up"},
            {"type": "down", "x": 140, "y": 130},
            {"type": "move", "x": 120, "y": 130},
            {"type": "up"},
            {"type": "transform", "scale_x": 0.5, "scale_y": 1, "x": 80, "y": 100}
        ]"#,
    );
    assert_eq!(core.info(), RectInfo::Shape { x: 80, y: 100, width: 40, height: 60 });
    assert_eq!(core.handle_scale(), (1.0, 1.0));
    assert_eq!(core.mode(), GestureMode::Idle);
    assert_eq!(core.info().to_string(), "Rectangle Info\nX: 80\nY: 100\nWidth: 40\nHeight: 60");
}

#[test]
fn handle_drag_under_zoom_keeps_opposite_edge() {
    let mut core = core();
    replay(
        &mut core,
        r#"[
            {"type": "camera", "pan_x": 0, "pan_y": 0, "zoom": 2},
            {"type": "down", "x": 200, "y": 200},
            {"type": "move", "x": 400, "y": 400},
            {"type": "up"},
            {"type": "down", "x": 300, "y": 300},
            {"type": "up"},
            {"type": "down", "x": 200, "y": 200},
            {"type": "move", "x": 300, "y": 200},
            {"type": "up"}
        ]"#,
    );
    // World rect 100..200 square; the NW handle moved 50 world units right.
    let r = core.shape().copied().unwrap();
    assert_eq!((r.x, r.y, r.width, r.height), (150.0, 100.0, 50.0, 100.0));
}

#[test]
fn scene_json_tags_nodes() {
    let mut core = core();
    replay(
        &mut core,
        r#"[
            {"type": "background_loaded", "width": 800, "height": 600},
            {"type": "down", "x": 100, "y": 100},
            {"type": "move", "x": 180, "y": 160},
            {"type": "up"},
            {"type": "down", "x": 120, "y": 120}
        ]"#,
    );
    let json = serde_json::to_value(core.scene()).unwrap();
    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 11);
    assert_eq!(nodes[0]["tag"]["node"], "background");
    assert_eq!(nodes[0]["kind"]["type"], "image");
    assert_eq!(nodes[2]["kind"]["type"], "rect");
    assert_eq!(nodes[3]["tag"]["node"], "handle");
}

#[test]
fn marker_drop_recolors_every_time() {
    let mut core = core();
    let mut previous = core.marker().fill.clone();
    for i in 0..10 {
        let at = Point::new(f64::from(i) * 10.0, 50.0);
        let actions = core.on_marker_drag_end(at);
        assert!(actions.iter().any(|a| matches!(a, Action::MarkerMoved(_))));
        assert_ne!(core.marker().fill, previous);
        previous = core.marker().fill.clone();
    }
    assert_eq!((core.marker().x, core.marker().y), (90.0, 50.0));
}

#[test]
fn stale_selection_never_resizes_new_shape() {
    let mut core = core();
    core.on_pointer_down(Point::new(100.0, 100.0), Button::Primary);
    core.on_pointer_move(Point::new(180.0, 160.0));
    core.on_pointer_up();
    core.on_pointer_down(Point::new(120.0, 120.0), Button::Primary);
    core.on_pointer_up();
    let old = core.selection().unwrap();

    // Drawing a new rectangle retires the old id.
    core.on_pointer_down(Point::new(400.0, 400.0), Button::Primary);
    core.on_pointer_move(Point::new(450.0, 450.0));
    core.on_pointer_up();

    core.on_pointer_down_on(
        Point::new(180.0, 160.0),
        Button::Primary,
        NodeTag::Handle(old, shape_editor::hit::ResizeAnchor::Se),
    );
    core.on_pointer_move(Point::new(300.0, 300.0));
    core.on_pointer_up();

    let r = core.shape().copied().unwrap();
    assert_ne!(r.id, old);
    assert_eq!((r.x, r.y, r.width, r.height), (400.0, 400.0, 50.0, 50.0));
}

#[test]
fn invalid_script_reports_error() {
    let err = script::parse(r#"[{"type": "down", "x": "left"}]"#).unwrap_err();
    assert!(err.to_string().contains("invalid gesture script"));
}
