//! Interactive rectangle editing engine.
//!
//! The engine owns the full pointer lifecycle of a single editable
//! rectangle drawn over a background image: translating surface pointer
//! events into world coordinates, hit-testing tagged nodes, drawing,
//! dragging and handle-resizing the rectangle, and projecting the result
//! into a declarative scene. The host graphics layer is responsible only
//! for wiring input events to the engine and drawing the returned
//! [`render::Scene`]. With the `web` feature the crate can paint that scene
//! onto an HTML canvas itself.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and its transitions |
//! | [`doc`] | Rectangle, marker and background slot types |
//! | [`camera`] | Pan/zoom camera and pointer-to-world mapping |
//! | [`input`] | Button and gesture state types |
//! | [`hit`] | Tagged node identities and hit-testing |
//! | [`handles`] | Resize handle overlay and scale reconciliation |
//! | [`render`] | Scene projection |
//! | `paint` | Canvas2D painter (feature `web`) |
//! | [`info`] | Sidebar "Rectangle Info" projection |
//! | [`config`] | Environment-driven configuration |
//! | [`script`] | JSON gesture scripts replayed against the engine |
//! | [`consts`] | Shared numeric constants (minimum size, handle slop, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod handles;
pub mod hit;
pub mod info;
pub mod input;
#[cfg(feature = "web")]
pub mod paint;
pub mod render;
pub mod script;
