//! Shared numeric and style constants for the editor.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a handle resize may produce, in world units.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

/// Default drawing surface width in CSS pixels.
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;

/// Default drawing surface height in CSS pixels.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 600.0;

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom bound accepted by the engine.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound accepted by the engine.
pub const MAX_ZOOM: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels around a resize handle center.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Side length of a drawn resize handle square, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

// ── Marker ──────────────────────────────────────────────────────

/// Radius of the decorative marker circle.
pub const MARKER_RADIUS: f64 = 50.0;

/// Fill of the decorative marker before its first drop.
pub const MARKER_FILL: &str = "green";

// ── Style ───────────────────────────────────────────────────────

/// Stroke color of the editable rectangle.
pub const RECT_STROKE: &str = "red";

/// Fill of resize handle squares.
pub const HANDLE_FILL: &str = "#ffffff";

/// Stroke of resize handle squares.
pub const HANDLE_STROKE: &str = "#1E88E5";

/// Background image shown until a host supplies its own.
pub const DEFAULT_BACKGROUND_SRC: &str =
    "https://fastly.picsum.photos/id/545/200/300.jpg?hmac=mKTuqg7uMMnQbx-G17z5e7tJrjfkYtqbsfRm_dCrCfQ";
