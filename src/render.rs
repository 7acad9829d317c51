//! Render sync: projects editor state into a declarative scene.
//!
//! This is the only hand-off point to the graphics layer. [`project`] reads
//! editor state and returns a [`Scene`], a flat list of tagged nodes in draw
//! order. It makes no decisions and mutates nothing; hosts (or the
//! `paint` module in the browser) turn the scene into pixels.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Surface};
use crate::consts::{HANDLE_FILL, HANDLE_SIZE_PX, HANDLE_STROKE, RECT_STROKE};
use crate::engine::EditorState;
use crate::hit::NodeTag;

/// Shape of a scene node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Background image. Zero-sized until loaded.
    Image { src: String, loaded: bool },
    /// Circle centered on `(x, y)`; `width` is the diameter.
    Circle,
    /// Rectangle anchored at `(x, y)`.
    Rect,
    /// Resize handle square anchored at its top-left corner.
    Handle,
}

/// Paint properties for a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

/// One renderable node, positioned in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub tag: NodeTag,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Visual-only multiplier; not folded into `width`.
    pub scale_x: f64,
    /// Visual-only multiplier; not folded into `height`.
    pub scale_y: f64,
    pub style: Style,
    pub draggable: bool,
}

/// A full frame for the graphics layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub surface_width: f64,
    pub surface_height: f64,
    pub camera: Camera,
    /// Bottom-most node first.
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// First node carrying `tag`.
    #[must_use]
    pub fn find(&self, tag: NodeTag) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Number of handle nodes in the scene.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Handle).count()
    }
}

/// Build the scene for the current state.
#[must_use]
pub fn project(state: &EditorState, surface: &Surface) -> Scene {
    let mut nodes = Vec::with_capacity(11);

    // Layer 1: background slot.
    let (bg_w, bg_h) = state.background.size().unwrap_or((0.0, 0.0));
    nodes.push(SceneNode {
        tag: NodeTag::Background,
        kind: NodeKind::Image { src: state.background.src().to_owned(), loaded: state.background.is_loaded() },
        x: 0.0,
        y: 0.0,
        width: bg_w,
        height: bg_h,
        scale_x: 1.0,
        scale_y: 1.0,
        style: Style::default(),
        draggable: false,
    });

    // Layer 2: marker.
    let m = &state.marker;
    nodes.push(SceneNode {
        tag: NodeTag::Marker,
        kind: NodeKind::Circle,
        x: m.x,
        y: m.y,
        width: m.radius * 2.0,
        height: m.radius * 2.0,
        scale_x: 1.0,
        scale_y: 1.0,
        style: Style { fill: Some(m.fill.clone()), stroke: None, stroke_width: 0.0 },
        draggable: true,
    });

    // Layer 3: the rectangle, with the pending handle transform as a visual multiplier.
    if let Some(rect) = &state.shape {
        let bound = state.handles.is_bound_to(rect.id);
        let pending = state.handles.pending().filter(|_| bound);
        let (x, y) = pending.map_or((rect.x, rect.y), |t| (t.x, t.y));
        let (scale_x, scale_y) = if bound { state.handles.scale() } else { (1.0, 1.0) };
        nodes.push(SceneNode {
            tag: NodeTag::Shape(rect.id),
            kind: NodeKind::Rect,
            x,
            y,
            width: rect.width,
            height: rect.height,
            scale_x,
            scale_y,
            style: Style { fill: None, stroke: Some(RECT_STROKE.to_owned()), stroke_width: 1.0 },
            draggable: true,
        });

        // Layer 4: handles, constant size in screen pixels.
        if bound && state.ui.is_selected(rect.id) {
            let size = surface.camera.screen_dist_to_world(HANDLE_SIZE_PX);
            for (anchor, p) in state.handles.handle_points(rect) {
                nodes.push(SceneNode {
                    tag: NodeTag::Handle(rect.id, anchor),
                    kind: NodeKind::Handle,
                    x: p.x - size * 0.5,
                    y: p.y - size * 0.5,
                    width: size,
                    height: size,
                    scale_x: 1.0,
                    scale_y: 1.0,
                    style: Style {
                        fill: Some(HANDLE_FILL.to_owned()),
                        stroke: Some(HANDLE_STROKE.to_owned()),
                        stroke_width: 1.0,
                    },
                    draggable: true,
                });
            }
        }
    }

    Scene { surface_width: surface.width, surface_height: surface.height, camera: surface.camera, nodes }
}
