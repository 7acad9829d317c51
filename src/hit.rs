//! Hit-testing: resolve a world point to the tagged node under it.
//!
//! Every renderable node carries a [`NodeTag`]. Hit-testing checks the
//! selected shape's handles first, then the shape body, then the marker, and
//! falls back to the background.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Bounds, Marker, Rectangle, ShapeId};
use crate::handles::HandleController;

/// Identity of a renderable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node", content = "ref", rename_all = "snake_case")]
pub enum NodeTag {
    /// The background image or bare surface.
    Background,
    /// The decorative marker circle.
    Marker,
    /// The body of a shape.
    Shape(ShapeId),
    /// A resize handle attached to a shape.
    Handle(ShapeId, ResizeAnchor),
}

impl NodeTag {
    /// Whether a pointer-down on this node starts a new drawing gesture.
    #[must_use]
    pub fn starts_drawing(self) -> bool {
        matches!(self, Self::Background | Self::Marker)
    }
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// All anchors, clockwise from the top edge.
    pub const ALL: [ResizeAnchor; 8] = [
        ResizeAnchor::N,
        ResizeAnchor::Ne,
        ResizeAnchor::E,
        ResizeAnchor::Se,
        ResizeAnchor::S,
        ResizeAnchor::Sw,
        ResizeAnchor::W,
        ResizeAnchor::Nw,
    ];

    /// Dragging this anchor moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Dragging this anchor moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Dragging this anchor moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Dragging this anchor moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering or dragging this anchor.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// World-space position of this anchor on `bounds`.
    #[must_use]
    pub fn point_on(self, bounds: &Bounds) -> Point {
        let mid_x = (bounds.min.x + bounds.max.x) * 0.5;
        let mid_y = (bounds.min.y + bounds.max.y) * 0.5;
        let x = if self.moves_left() {
            bounds.min.x
        } else if self.moves_right() {
            bounds.max.x
        } else {
            mid_x
        };
        let y = if self.moves_top() {
            bounds.min.y
        } else if self.moves_bottom() {
            bounds.max.y
        } else {
            mid_y
        };
        Point::new(x, y)
    }
}

/// Resolve which node is under `world_pt`.
///
/// Priority: handle of the handle-bound shape, then shape body, then marker,
/// then background. Handle slop is constant in screen pixels, capped at a
/// quarter of the shorter visual side, so the center of any non-empty shape
/// hits its body.
#[must_use]
pub fn hit_test(
    world_pt: Point,
    shape: Option<&Rectangle>,
    marker: &Marker,
    handles: &HandleController,
    camera: &Camera,
) -> NodeTag {
    if let Some(rect) = shape {
        if handles.is_bound_to(rect.id) {
            let slop = handle_slop(handles.visual_bounds(rect), camera);
            let nearest = handles
                .handle_points(rect)
                .into_iter()
                .map(|(anchor, p)| (anchor, p.distance(world_pt)))
                .filter(|(_, d)| *d <= slop)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((anchor, _)) = nearest {
                return NodeTag::Handle(rect.id, anchor);
            }
        }
        if rect.contains(world_pt) {
            return NodeTag::Shape(rect.id);
        }
    }
    if marker.contains(world_pt) {
        return NodeTag::Marker;
    }
    NodeTag::Background
}

/// World-space handle grab radius for a shape with `bounds`.
fn handle_slop(bounds: Bounds, camera: &Camera) -> f64 {
    let cap = bounds.width().min(bounds.height()) * 0.25;
    camera.screen_dist_to_world(HANDLE_RADIUS_PX).min(cap)
}
