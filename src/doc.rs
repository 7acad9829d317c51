//! Document model: the editable rectangle, the decorative marker, and the
//! background slot.
//!
//! `Rectangle` is a small `Copy` value. Every mutator returns the updated
//! rectangle instead of editing in place, so the engine decides when a new
//! geometry becomes canonical. Width and height are signed while a shape is
//! being drawn; [`Rectangle::normalized`] folds negative extents back into
//! the origin once the drawing gesture ends.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{MARKER_FILL, MARKER_RADIUS};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The editable rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Identity of this shape; replaced whenever a new shape is drawn.
    pub id: ShapeId,
    /// Anchor x in world coordinates (left edge once normalized).
    pub x: f64,
    /// Anchor y in world coordinates (top edge once normalized).
    pub y: f64,
    /// Signed width; non-negative at rest.
    pub width: f64,
    /// Signed height; non-negative at rest.
    pub height: f64,
}

/// Axis-aligned bounds `(min, max)` of a rectangle, independent of sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Rectangle {
    /// Create a zero-size rectangle anchored at `p` with a fresh id.
    #[must_use]
    pub fn begin_at(p: Point) -> Self {
        Self::with_id(Uuid::new_v4(), p.x, p.y, 0.0, 0.0)
    }

    #[must_use]
    pub fn with_id(id: ShapeId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { id, x, y, width, height }
    }

    /// Stretch from the anchor to `p`. Width and height keep their sign so the
    /// user can drag toward any quadrant.
    #[must_use]
    pub fn resize_to(self, p: Point) -> Self {
        Self { width: p.x - self.x, height: p.y - self.y, ..self }
    }

    /// Offset the anchor; size is unchanged.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Fold a handle scale into canonical size and replace the position.
    ///
    /// Each dimension is clamped to at least `floor`. The caller must reset
    /// the handle layer's scale to 1 afterward.
    #[must_use]
    pub fn apply_scale(self, scale_x: f64, scale_y: f64, new_x: f64, new_y: f64, floor: f64) -> Self {
        Self {
            x: new_x,
            y: new_y,
            width: clamp_floor(self.width * scale_x, floor),
            height: clamp_floor(self.height * scale_y, floor),
            ..self
        }
    }

    /// The same covered area with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let b = self.bounds();
        Self { x: b.min.x, y: b.min.y, width: b.width(), height: b.height(), ..self }
    }

    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (x0, x1) = ordered(self.x, self.x + self.width);
        let (y0, y1) = ordered(self.y, self.y + self.height);
        Bounds { min: Point::new(x0, y0), max: Point::new(x1, y1) }
    }

    /// Inclusive point containment on the normalized bounds.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let b = self.bounds();
        p.x >= b.min.x && p.x <= b.max.x && p.y >= b.min.y && p.y <= b.max.y
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn clamp_floor(value: f64, floor: f64) -> f64 {
    if value.is_nan() { floor } else { value.max(floor) }
}

/// The decorative draggable circle. Unrelated to the rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Center x in world coordinates.
    pub x: f64,
    /// Center y in world coordinates.
    pub y: f64,
    pub radius: f64,
    /// CSS color string.
    pub fill: String,
}

impl Default for Marker {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, radius: MARKER_RADIUS, fill: MARKER_FILL.to_owned() }
    }
}

impl Marker {
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        Point::new(self.x, self.y).distance(p) <= self.radius
    }

    /// Move to the dropped position and pick a new fill that differs from the current one.
    pub fn drop_at<R: Rng>(&mut self, p: Point, rng: &mut R) {
        self.x = p.x;
        self.y = p.y;
        let mut next = random_color(rng);
        while next == self.fill {
            next = random_color(rng);
        }
        self.fill = next;
    }
}

/// A random opaque `#rrggbb` color.
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    let rgb: u32 = rng.random_range(0..=0x00FF_FFFF);
    format!("#{rgb:06x}")
}

/// The static background image slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BackgroundSlot {
    /// Source requested but not decoded yet.
    Pending { src: String },
    /// Decoded image with its natural size in world units.
    Loaded { src: String, width: f64, height: f64 },
}

impl BackgroundSlot {
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Pending { src } | Self::Loaded { src, .. } => src,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Natural size once loaded.
    #[must_use]
    pub fn size(&self) -> Option<(f64, f64)> {
        match self {
            Self::Pending { .. } => None,
            Self::Loaded { width, height, .. } => Some((*width, *height)),
        }
    }
}
