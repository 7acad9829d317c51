//! Selection handles: the resize overlay bound to the selected shape.
//!
//! Resizing is a two-phase protocol. While a handle is dragged the
//! controller only holds a pending [`HandleTransform`], a visual multiplier
//! the renderer applies on top of the canonical rectangle. On release the
//! transform is committed once through [`Rectangle::apply_scale`] and the
//! scale drops back to 1, so the model is the only source of truth for size.

#[cfg(test)]
#[path = "handles_test.rs"]
mod handles_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{Bounds, Rectangle, ShapeId};
use crate::hit::ResizeAnchor;

/// Scale and position reported by the handle layer for the bound shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Resulting top-left x in world coordinates.
    pub x: f64,
    /// Resulting top-left y in world coordinates.
    pub y: f64,
}

impl HandleTransform {
    /// Unit scale at the rectangle's current position.
    #[must_use]
    pub fn identity_for(rect: &Rectangle) -> Self {
        Self { scale_x: 1.0, scale_y: 1.0, x: rect.x, y: rect.y }
    }
}

/// Attachment state of the resize overlay.
#[derive(Debug, Clone, Default)]
pub struct HandleController {
    bound: Option<ShapeId>,
    pending: Option<HandleTransform>,
}

impl HandleController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the overlay to `rect`, discarding any pending transform.
    pub fn attach(&mut self, rect: &Rectangle) {
        self.bound = Some(rect.id);
        self.pending = None;
    }

    /// Unbind the overlay. Returns the id it was bound to, if any.
    pub fn detach(&mut self) -> Option<ShapeId> {
        self.pending = None;
        self.bound.take()
    }

    #[must_use]
    pub fn bound_id(&self) -> Option<ShapeId> {
        self.bound
    }

    #[must_use]
    pub fn is_bound_to(&self, id: ShapeId) -> bool {
        self.bound == Some(id)
    }

    #[must_use]
    pub fn pending(&self) -> Option<HandleTransform> {
        self.pending
    }

    /// Record the transient transform for an in-progress handle drag.
    pub fn set_pending(&mut self, transform: HandleTransform) {
        self.pending = Some(transform);
    }

    /// Current visual scale multiplier; `(1.0, 1.0)` outside a handle drag.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        self.pending.map_or((1.0, 1.0), |t| (t.scale_x, t.scale_y))
    }

    /// The box the user currently sees for `rect`, pending transform included.
    #[must_use]
    pub fn visual_bounds(&self, rect: &Rectangle) -> Bounds {
        match self.pending {
            Some(t) if self.is_bound_to(rect.id) => {
                Rectangle { x: t.x, y: t.y, width: rect.width * t.scale_x, height: rect.height * t.scale_y, ..*rect }
                    .bounds()
            }
            _ => rect.bounds(),
        }
    }

    /// Handle centers on the visual bounding box of `rect`.
    #[must_use]
    pub fn handle_points(&self, rect: &Rectangle) -> [(ResizeAnchor, Point); 8] {
        let bounds = self.visual_bounds(rect);
        ResizeAnchor::ALL.map(|anchor| (anchor, anchor.point_on(&bounds)))
    }

    /// Turn a handle drag from `start` to `current` into a transform of
    /// `snapshot`, keeping the edge opposite `anchor` fixed.
    ///
    /// Each axis the anchor moves is clamped to `floor`. Zero-extent axes
    /// cannot be expressed as a scale and stay at 1.
    #[must_use]
    pub fn drag_transform(
        anchor: ResizeAnchor,
        snapshot: &Rectangle,
        start: Point,
        current: Point,
        floor: f64,
    ) -> HandleTransform {
        let (dx, dy) = current.delta_from(start);
        let b = snapshot.bounds();
        let (x, scale_x) = axis_transform(b.min.x, b.width(), dx, anchor.moves_left(), anchor.moves_right(), floor);
        let (y, scale_y) = axis_transform(b.min.y, b.height(), dy, anchor.moves_top(), anchor.moves_bottom(), floor);
        HandleTransform { scale_x, scale_y, x, y }
    }

    /// Fold the pending transform into `rect` and reset the scale to 1.
    ///
    /// Returns `None` and detaches when the overlay is not bound to `rect`.
    /// Without a pending transform the rectangle is returned unchanged.
    pub fn commit(&mut self, rect: &Rectangle, floor: f64) -> Option<Rectangle> {
        if !self.is_bound_to(rect.id) {
            self.detach();
            return None;
        }
        let Some(t) = self.pending.take() else {
            return Some(*rect);
        };
        Some(rect.apply_scale(t.scale_x, t.scale_y, t.x, t.y, floor))
    }

    /// Commit a transform reported by an external handle layer.
    pub fn commit_reported(&mut self, rect: &Rectangle, transform: HandleTransform, floor: f64) -> Option<Rectangle> {
        if self.is_bound_to(rect.id) {
            self.pending = Some(transform);
        }
        self.commit(rect, floor)
    }
}

/// New `(origin, scale)` along one axis for a handle drag of `delta`.
fn axis_transform(min: f64, extent: f64, delta: f64, moves_min: bool, moves_max: bool, floor: f64) -> (f64, f64) {
    if extent <= 0.0 {
        return (min, 1.0);
    }
    if moves_min {
        let new_extent = (extent - delta).max(floor);
        (min + extent - new_extent, new_extent / extent)
    } else if moves_max {
        let new_extent = (extent + delta).max(floor);
        (min, new_extent / extent)
    } else {
        (min, 1.0)
    }
}
