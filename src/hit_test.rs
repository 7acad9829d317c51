use uuid::Uuid;

use super::*;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::with_id(Uuid::new_v4(), x, y, w, h)
}

fn far_marker() -> Marker {
    Marker { x: -1000.0, y: -1000.0, ..Marker::default() }
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn resize_anchor_all_variants_distinct() {
    for (i, a) in ResizeAnchor::ALL.iter().enumerate() {
        for (j, b) in ResizeAnchor::ALL.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn resize_anchor_edges_are_exclusive_per_axis() {
    for a in ResizeAnchor::ALL {
        assert!(!(a.moves_left() && a.moves_right()), "{a:?}");
        assert!(!(a.moves_top() && a.moves_bottom()), "{a:?}");
        assert!(a.moves_left() || a.moves_right() || a.moves_top() || a.moves_bottom());
    }
}

#[test]
fn resize_anchor_cursor_pairs() {
    assert_eq!(ResizeAnchor::N.cursor(), "ns-resize");
    assert_eq!(ResizeAnchor::W.cursor(), "ew-resize");
    assert_eq!(ResizeAnchor::Ne.cursor(), ResizeAnchor::Sw.cursor());
    assert_eq!(ResizeAnchor::Nw.cursor(), ResizeAnchor::Se.cursor());
}

// =============================================================
// NodeTag
// =============================================================

#[test]
fn node_tag_background_and_marker_start_drawing() {
    assert!(NodeTag::Background.starts_drawing());
    assert!(NodeTag::Marker.starts_drawing());
    assert!(!NodeTag::Shape(Uuid::nil()).starts_drawing());
    assert!(!NodeTag::Handle(Uuid::nil(), ResizeAnchor::E).starts_drawing());
}

#[test]
fn node_tag_serializes_adjacently_tagged() {
    let json = serde_json::to_value(NodeTag::Marker).unwrap_or_default();
    assert_eq!(json["node"], "marker");
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_surface_hits_background() {
    let tag = hit_test(Point::new(400.0, 300.0), None, &far_marker(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Background);
}

#[test]
fn point_inside_rect_hits_shape() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let tag = hit_test(Point::new(120.0, 120.0), Some(&r), &far_marker(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Shape(r.id));
}

#[test]
fn point_outside_rect_hits_background() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let tag = hit_test(Point::new(300.0, 300.0), Some(&r), &far_marker(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Background);
}

#[test]
fn marker_is_not_mistaken_for_shape() {
    let r = rect(300.0, 300.0, 10.0, 10.0);
    let tag = hit_test(Point::new(10.0, 10.0), Some(&r), &Marker::default(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Marker);
}

#[test]
fn shape_wins_over_marker_when_overlapping() {
    let r = rect(0.0, 0.0, 100.0, 100.0);
    let tag = hit_test(Point::new(10.0, 10.0), Some(&r), &Marker::default(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Shape(r.id));
}

#[test]
fn handles_ignored_when_unbound() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let tag = hit_test(Point::new(186.0, 160.0), Some(&r), &far_marker(), &HandleController::new(), &Camera::default());
    assert_eq!(tag, NodeTag::Background);
}

#[test]
fn handle_wins_over_shape_body() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let tag = hit_test(Point::new(178.0, 158.0), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Handle(r.id, ResizeAnchor::Se));
}

#[test]
fn handle_hit_just_outside_shape() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let tag = hit_test(Point::new(95.0, 130.0), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Handle(r.id, ResizeAnchor::W));
}

#[test]
fn handle_slop_shrinks_in_world_when_zoomed_in() {
    let r = rect(100.0, 100.0, 80.0, 60.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let cam = Camera { zoom: 4.0, ..Camera::default() };
    // 6 world units away = 24 screen px at 4x, beyond the 8 px slop.
    let tag = hit_test(Point::new(186.0, 160.0), Some(&r), &far_marker(), &handles, &cam);
    assert_eq!(tag, NodeTag::Background);
}

#[test]
fn nearest_handle_wins_on_tiny_shapes() {
    let r = rect(100.0, 100.0, 6.0, 6.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let tag = hit_test(Point::new(106.0, 106.0), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Handle(r.id, ResizeAnchor::Se));
}

#[test]
fn small_shape_center_hits_body() {
    let r = rect(100.0, 100.0, 12.0, 12.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let tag = hit_test(Point::new(106.0, 106.0), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Shape(r.id));
}

#[test]
fn floor_sized_shape_center_hits_body() {
    let r = rect(100.0, 100.0, 5.0, 5.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    let tag = hit_test(Point::new(102.5, 102.5), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Shape(r.id));
}

#[test]
fn small_shape_slop_is_capped() {
    let r = rect(100.0, 100.0, 12.0, 12.0);
    let mut handles = HandleController::new();
    handles.attach(&r);
    // Slop is 3 world units here; 4 units past the east edge misses.
    let tag = hit_test(Point::new(116.0, 106.0), Some(&r), &far_marker(), &handles, &Camera::default());
    assert_eq!(tag, NodeTag::Background);
}
