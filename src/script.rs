//! Gesture scripts: JSON event lists replayed against an [`EngineCore`].
//!
//! A script is an array of objects tagged by `"type"`:
//!
//! ```json
//! [
//!   { "type": "down", "x": 100, "y": 100 },
//!   { "type": "move", "x": 180, "y": 160 },
//!   { "type": "up" },
//!   { "type": "transform", "scale_x": 0.5, "scale_y": 1, "x": 100, "y": 100 }
//! ]
//! ```
//!
//! Pointer coordinates are surface-local screen pixels; `transform` and
//! `marker_drop` carry world coordinates, as a graphics layer reports them.
//! `down` accepts an optional DOM `button` code, `0` (primary) by default.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::engine::{Action, EngineCore};
use crate::handles::HandleTransform;
use crate::input::Button;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid gesture script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        /// DOM `MouseEvent.button` code; primary when omitted.
        #[serde(default)]
        button: i16,
    },
    Move { x: f64, y: f64 },
    Up,
    Transform { scale_x: f64, scale_y: f64, x: f64, y: f64 },
    MarkerDrop { x: f64, y: f64 },
    Camera { pan_x: f64, pan_y: f64, zoom: f64 },
    BackgroundLoaded { width: f64, height: f64 },
}

/// Counters from one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub actions: usize,
    /// Frames produced when sampling once per event.
    pub frames: usize,
}

/// Parse a gesture script.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] when `json` is not a valid event array.
pub fn parse(json: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Feed a single event to the engine.
pub fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Vec<Action> {
    match *event {
        ScriptEvent::Down { x, y, button } => match Button::from_dom(button) {
            Some(button) => core.on_pointer_down(Point::new(x, y), button),
            None => {
                tracing::debug!(button, "ignoring unsupported pointer button");
                Vec::new()
            }
        },
        ScriptEvent::Move { x, y } => core.on_pointer_move(Point::new(x, y)),
        ScriptEvent::Up => core.on_pointer_up(),
        ScriptEvent::Transform { scale_x, scale_y, x, y } => {
            core.on_transform_end(HandleTransform { scale_x, scale_y, x, y })
        }
        ScriptEvent::MarkerDrop { x, y } => core.on_marker_drag_end(Point::new(x, y)),
        ScriptEvent::Camera { pan_x, pan_y, zoom } => core.set_camera(Camera { pan_x, pan_y, zoom }),
        ScriptEvent::BackgroundLoaded { width, height } => core.background_loaded(width, height),
    }
}

/// Replay `events` in order, sampling one frame after each event.
pub fn run(core: &mut EngineCore, events: &[ScriptEvent]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for event in events {
        let actions = apply(core, event);
        tracing::trace!(?event, actions = actions.len(), "replayed event");
        summary.events += 1;
        summary.actions += actions.len();
        if core.take_frame().is_some() {
            summary.frames += 1;
        }
    }
    summary
}
