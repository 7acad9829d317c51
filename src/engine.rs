#[cfg(feature = "web")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "web")]
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::camera::{Camera, Point, Surface};
use crate::config::EditorConfig;
use crate::doc::{BackgroundSlot, Marker, Rectangle, ShapeId};
use crate::handles::{HandleController, HandleTransform};
use crate::hit::{self, NodeTag};
use crate::info::RectInfo;
use crate::input::{Button, GestureMode, InputState, UiState};
use crate::render::{self, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Rectangle),
    ShapeUpdated(Rectangle),
    SelectionChanged(Option<ShapeId>),
    MarkerMoved(Marker),
    SetCursor(String),
    RenderNeeded,
}

/// Everything the editor owns. Mutated only through [`EngineCore`] transitions.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// The single editable rectangle, once one has been drawn.
    pub shape: Option<Rectangle>,
    pub marker: Marker,
    pub background: BackgroundSlot,
    pub ui: UiState,
    pub input: InputState,
    pub handles: HandleController,
}

impl EditorState {
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            shape: None,
            marker: Marker { radius: config.marker_radius, ..Marker::default() },
            background: BackgroundSlot::Pending { src: config.background_src.clone() },
            ui: UiState::default(),
            input: InputState::default(),
            handles: HandleController::new(),
        }
    }

    /// The shape with `id`, if it is the current one.
    fn shape_with_id(&self, id: ShapeId) -> Option<Rectangle> {
        self.shape.filter(|r| r.id == id)
    }
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub state: EditorState,
    pub surface: Surface,
    /// Minimum width/height after a handle resize.
    pub min_size: f64,
    rng: StdRng,
    cursor: &'static str,
    dirty: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        let seed = config.color_seed.unwrap_or_else(|| Uuid::new_v4().as_u64_pair().0);
        let rng = StdRng::seed_from_u64(seed);
        Self {
            state: EditorState::new(config),
            surface: Surface::new(config.surface_width, config.surface_height),
            min_size: config.min_size,
            rng,
            cursor: "default",
            dirty: true,
        }
    }

    // --- Viewport / background ---

    /// Replace the camera; zoom is clamped to the supported range.
    pub fn set_camera(&mut self, camera: Camera) -> Vec<Action> {
        self.surface.camera = Camera::clamped(camera.pan_x, camera.pan_y, camera.zoom);
        self.render_needed()
    }

    /// Update the surface size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.surface.width = width.max(0.0);
        self.surface.height = height.max(0.0);
        self.render_needed()
    }

    /// The background image finished decoding.
    pub fn background_loaded(&mut self, width: f64, height: f64) -> Vec<Action> {
        let src = self.state.background.src().to_owned();
        tracing::debug!(%src, width, height, "background loaded");
        self.state.background = BackgroundSlot::Loaded { src, width, height };
        self.render_needed()
    }

    // --- Pointer input ---

    /// Pointer pressed at a surface-local position; the target is hit-tested.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let Some(world) = self.surface.map_pointer(screen_pt) else {
            tracing::debug!(x = screen_pt.x, y = screen_pt.y, "pointer-down outside surface");
            return Vec::new();
        };
        let target = hit::hit_test(
            world,
            self.state.shape.as_ref(),
            &self.state.marker,
            &self.state.handles,
            &self.surface.camera,
        );
        self.begin_gesture(world, target, button)
    }

    /// Pointer pressed on a node the graphics layer already identified.
    pub fn on_pointer_down_on(&mut self, screen_pt: Point, button: Button, target: NodeTag) -> Vec<Action> {
        let Some(world) = self.surface.map_pointer(screen_pt) else {
            tracing::debug!(x = screen_pt.x, y = screen_pt.y, "pointer-down outside surface");
            return Vec::new();
        };
        self.begin_gesture(world, target, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(world) = self.surface.map_pointer(screen_pt) else {
            return Vec::new();
        };

        match self.state.input {
            InputState::Idle => self.hover(world),
            InputState::Drawing { id, .. } => {
                let Some(rect) = self.state.shape_with_id(id) else {
                    return self.abandon_gesture();
                };
                self.update_shape(rect.resize_to(world))
            }
            InputState::Dragging { id, anchor_world, last_world, snapshot } => {
                let Some(rect) = self.state.shape_with_id(id) else {
                    return self.abandon_gesture();
                };
                let (dx, dy) = world.delta_from(last_world);
                if dx == 0.0 && dy == 0.0 {
                    return Vec::new();
                }
                self.state.input = InputState::Dragging { id, anchor_world, last_world: world, snapshot };
                self.update_shape(rect.translate(dx, dy))
            }
            InputState::Resizing { id, anchor, anchor_world, snapshot } => {
                if !self.state.handles.is_bound_to(id) {
                    return self.abandon_gesture();
                }
                let transform =
                    HandleController::drag_transform(anchor, &snapshot, anchor_world, world, self.min_size);
                self.state.handles.set_pending(transform);
                self.render_needed()
            }
        }
    }

    /// Pointer released. Always ends the current gesture; the position is not needed.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// An external handle layer finished a transform of the selected shape.
    pub fn on_transform_end(&mut self, transform: HandleTransform) -> Vec<Action> {
        if matches!(self.state.input, InputState::Resizing { .. }) {
            self.state.input = InputState::Idle;
        }
        if !(transform.x.is_finite() && transform.y.is_finite()) {
            tracing::warn!(?transform, "ignoring non-finite handle transform");
            return Vec::new();
        }
        let Some(rect) = self.selected_shape() else {
            self.detach_stale_handles();
            return Vec::new();
        };
        match self.state.handles.commit_reported(&rect, transform, self.min_size) {
            Some(resized) => self.update_shape(resized),
            None => {
                tracing::warn!(id = %rect.id, "handle transform for unbound shape; detached");
                self.render_needed()
            }
        }
    }

    /// The graphics layer finished dragging the marker to `world_pt`.
    pub fn on_marker_drag_end(&mut self, world_pt: Point) -> Vec<Action> {
        self.state.marker.drop_at(world_pt, &mut self.rng);
        tracing::debug!(fill = %self.state.marker.fill, "marker dropped");
        let mut actions = vec![Action::MarkerMoved(self.state.marker.clone())];
        actions.extend(self.render_needed());
        actions
    }

    /// Clear the selection and detach handles.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.state.handles.detach();
        if self.state.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
            actions.extend(self.render_needed());
        }
        actions
    }

    // --- Frames ---

    /// The scene for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render::project(&self.state, &self.surface)
    }

    /// The scene if anything changed since the last call. Call once per animation frame.
    pub fn take_frame(&mut self) -> Option<Scene> {
        if !self.is_dirty() {
            return None;
        }
        self.dirty = false;
        Some(self.scene())
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Queries ---

    #[must_use]
    pub fn shape(&self) -> Option<&Rectangle> {
        self.state.shape.as_ref()
    }

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.state.ui.selected_id
    }

    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.state.input.mode()
    }

    /// Visual scale of the handle layer; `(1.0, 1.0)` at rest.
    #[must_use]
    pub fn handle_scale(&self) -> (f64, f64) {
        self.state.handles.scale()
    }

    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.state.marker
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.surface.camera
    }

    #[must_use]
    pub fn info(&self) -> RectInfo {
        RectInfo::from_rect(self.shape())
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Transitions ---

    fn begin_gesture(&mut self, world: Point, target: NodeTag, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        // A press without a matching release ends the previous gesture first.
        let mut actions = if self.state.input.is_idle() { Vec::new() } else { self.finish_gesture() };

        match target {
            NodeTag::Handle(id, anchor) => actions.extend(self.begin_resize(world, id, anchor)),
            NodeTag::Shape(id) => actions.extend(self.begin_drag(world, id)),
            NodeTag::Background | NodeTag::Marker => actions.extend(self.begin_draw(world)),
        }
        actions
    }

    fn begin_draw(&mut self, world: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.state.handles.detach();
        if self.state.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }

        let rect = Rectangle::begin_at(world);
        tracing::debug!(id = %rect.id, x = world.x, y = world.y, "draw started");
        self.state.shape = Some(rect);
        self.state.input = InputState::Drawing { id: rect.id, anchor_world: world };
        actions.push(Action::ShapeCreated(rect));
        actions.extend(self.set_cursor("crosshair"));
        actions.extend(self.render_needed());
        actions
    }

    fn begin_drag(&mut self, world: Point, id: ShapeId) -> Vec<Action> {
        let Some(rect) = self.state.shape_with_id(id) else {
            tracing::debug!(%id, "pointer-down on unknown shape; skipped");
            self.detach_stale_handles();
            return Vec::new();
        };

        let mut actions = Vec::new();
        if !self.state.ui.is_selected(id) {
            self.state.ui.selected_id = Some(id);
            actions.push(Action::SelectionChanged(Some(id)));
        }
        self.state.handles.attach(&rect);
        tracing::debug!(%id, "drag armed");
        self.state.input = InputState::Dragging { id, anchor_world: world, last_world: world, snapshot: rect };
        actions.extend(self.set_cursor("move"));
        actions.extend(self.render_needed());
        actions
    }

    fn begin_resize(&mut self, world: Point, id: ShapeId, anchor: hit::ResizeAnchor) -> Vec<Action> {
        let rect = self
            .state
            .shape_with_id(id)
            .filter(|r| self.state.ui.is_selected(r.id) && self.state.handles.is_bound_to(r.id));
        let Some(rect) = rect else {
            tracing::warn!(%id, ?anchor, "pointer-down on stale handle; detached");
            self.state.handles.detach();
            return self.render_needed();
        };

        tracing::debug!(%id, ?anchor, "resize started");
        self.state.input = InputState::Resizing { id, anchor, anchor_world: world, snapshot: rect };
        self.set_cursor(anchor.cursor())
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.state.input) {
            InputState::Idle | InputState::Dragging { .. } => Vec::new(),
            InputState::Drawing { id, anchor_world } => {
                let Some(rect) = self.state.shape_with_id(id) else {
                    return Vec::new();
                };
                tracing::debug!(%id, x = anchor_world.x, y = anchor_world.y, "draw finished");
                if rect.is_normalized() {
                    return Vec::new();
                }
                self.update_shape(rect.normalized())
            }
            InputState::Resizing { id, .. } => {
                let Some(rect) = self.state.shape_with_id(id) else {
                    self.state.handles.detach();
                    return self.render_needed();
                };
                match self.state.handles.commit(&rect, self.min_size) {
                    Some(resized) if resized == rect => Vec::new(),
                    Some(resized) => {
                        tracing::debug!(%id, width = resized.width, height = resized.height, "resize committed");
                        self.update_shape(resized)
                    }
                    None => {
                        tracing::warn!(%id, "resize released on unbound shape; detached");
                        self.render_needed()
                    }
                }
            }
        }
    }

    /// Drop a gesture whose target vanished mid-flight.
    fn abandon_gesture(&mut self) -> Vec<Action> {
        let target = std::mem::take(&mut self.state.input).target();
        tracing::debug!(?target, "gesture target vanished; abandoned");
        self.detach_stale_handles();
        Vec::new()
    }

    fn hover(&mut self, world: Point) -> Vec<Action> {
        let target = hit::hit_test(
            world,
            self.state.shape.as_ref(),
            &self.state.marker,
            &self.state.handles,
            &self.surface.camera,
        );
        let cursor = match target {
            NodeTag::Handle(_, anchor) => anchor.cursor(),
            NodeTag::Shape(_) => "move",
            NodeTag::Marker => "grab",
            NodeTag::Background => "crosshair",
        };
        self.set_cursor(cursor)
    }

    fn selected_shape(&self) -> Option<Rectangle> {
        self.state.ui.selected_id.and_then(|id| self.state.shape_with_id(id))
    }

    /// Detach handles not bound to the selected, current shape.
    fn detach_stale_handles(&mut self) {
        let Some(bound) = self.state.handles.bound_id() else {
            return;
        };
        if self.selected_shape().map(|r| r.id) != Some(bound) {
            tracing::warn!(%bound, "detaching stale handles");
            self.state.handles.detach();
        }
    }

    fn update_shape(&mut self, rect: Rectangle) -> Vec<Action> {
        self.state.shape = Some(rect);
        let mut actions = vec![Action::ShapeUpdated(rect)];
        actions.extend(self.render_needed());
        actions
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.cursor == cursor {
            return Vec::new();
        }
        self.cursor = cursor;
        vec![Action::SetCursor(cursor.to_owned())]
    }

    fn render_needed(&mut self) -> Vec<Action> {
        self.dirty = true;
        vec![Action::RenderNeeded]
    }
}

/// The full browser engine. Wraps `EngineCore` and owns the canvas element.
#[cfg(feature = "web")]
pub struct Engine {
    canvas: HtmlCanvasElement,
    background: Option<HtmlImageElement>,
    dpr: f64,
    pub core: EngineCore,
}

#[cfg(feature = "web")]
impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: &EditorConfig) -> Self {
        Self { canvas, background: None, dpr: 1.0, core: EngineCore::new(config) }
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.core.set_viewport(width_css, height_css)
    }

    /// Hand over a decoded background image. Call from the image's load handler.
    pub fn set_background_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let (w, h) = (f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.background = Some(image);
        self.core.background_loaded(w, h)
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    /// Pointer pressed with a raw DOM `MouseEvent.button` code.
    pub fn on_dom_pointer_down(&mut self, screen_pt: Point, code: i16) -> Vec<Action> {
        match Button::from_dom(code) {
            Some(button) => self.core.on_pointer_down(screen_pt, button),
            None => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_transform_end(&mut self, transform: HandleTransform) -> Vec<Action> {
        self.core.on_transform_end(transform)
    }

    pub fn on_marker_drag_end(&mut self, world_pt: Point) -> Vec<Action> {
        self.core.on_marker_drag_end(world_pt)
    }

    // --- Render ---

    /// Draw the current state if it changed since the last frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(scene) = self.core.take_frame() else {
            return Ok(());
        };
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("context is not CanvasRenderingContext2d"))?;
        crate::paint::draw(&ctx, &scene, self.background.as_ref(), self.dpr)
    }
}
