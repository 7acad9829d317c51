//! Input model: mouse buttons, persistent UI state, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Each active variant carries the pointer anchor and a snapshot
//! of the shape as it was when the gesture began, which is all the context
//! needed to compute incremental deltas. The session is dropped on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{Rectangle, ShapeId};
use crate::hit::ResizeAnchor;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back, forward and unknown
    /// buttons map to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
}

impl UiState {
    #[must_use]
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected_id == Some(id)
    }
}

/// Which kind of gesture is active, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Drawing,
    Dragging,
    Resizing,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is drawing a new rectangle by dragging from an anchor corner.
    Drawing {
        /// Id of the rectangle being sized.
        id: ShapeId,
        /// World-space corner where the drag started.
        anchor_world: Point,
    },
    /// The user is moving the selected rectangle.
    Dragging {
        /// Id of the rectangle being dragged.
        id: ShapeId,
        /// World-space pointer position at pointer-down.
        anchor_world: Point,
        /// World-space pointer position at the previous event.
        last_world: Point,
        /// Rectangle as it was at pointer-down.
        snapshot: Rectangle,
    },
    /// The user is resizing the selected rectangle by one of its handles.
    Resizing {
        /// Id of the rectangle being resized.
        id: ShapeId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// World-space pointer position at pointer-down.
        anchor_world: Point,
        /// Rectangle as it was at pointer-down.
        snapshot: Rectangle,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        match self {
            Self::Idle => GestureMode::Idle,
            Self::Drawing { .. } => GestureMode::Drawing,
            Self::Dragging { .. } => GestureMode::Dragging,
            Self::Resizing { .. } => GestureMode::Resizing,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The shape this gesture operates on, if any.
    #[must_use]
    pub fn target(&self) -> Option<ShapeId> {
        match self {
            Self::Idle => None,
            Self::Drawing { id, .. } | Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}
