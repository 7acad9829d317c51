//! Coordinate mapping between the host surface and world space.
//!
//! Pointer positions arrive in surface-local CSS pixels. The [`Surface`]
//! rejects positions outside its bounds and hands the rest to the
//! [`Camera`], which removes pan and zoom to yield world coordinates. All
//! geometry in the engine is expressed in world coordinates.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Camera state for pan/zoom over the editing surface.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Build a camera with `zoom` clamped to the supported range.
    #[must_use]
    pub fn clamped(pan_x: f64, pan_y: f64, zoom: f64) -> Self {
        let zoom = if zoom.is_finite() { zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 };
        Self { pan_x, pan_y, zoom }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}

/// The bounded rendering surface pointer events are reported against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    pub camera: Camera,
}

impl Surface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, camera: Camera::default() }
    }

    /// Whether a surface-local screen point lies within the surface bounds (inclusive).
    #[must_use]
    pub fn contains_screen(&self, screen: Point) -> bool {
        screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= self.width && screen.y <= self.height
    }

    /// Map a surface-local pointer position to world coordinates.
    ///
    /// Returns `None` when the pointer is outside the surface; callers skip
    /// the current gesture step rather than substituting a default.
    #[must_use]
    pub fn map_pointer(&self, screen: Point) -> Option<Point> {
        if !screen.x.is_finite() || !screen.y.is_finite() || !self.contains_screen(screen) {
            return None;
        }
        Some(self.camera.screen_to_world(screen))
    }
}
