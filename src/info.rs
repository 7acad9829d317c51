//! Read-only sidebar projection of the current rectangle.

#[cfg(test)]
#[path = "info_test.rs"]
mod info_test;

use std::fmt;

use serde::Serialize;

use crate::doc::Rectangle;

/// What the "Rectangle Info" panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RectInfo {
    Empty,
    Shape { x: i64, y: i64, width: i64, height: i64 },
}

impl RectInfo {
    /// Round each field of `rect` to the nearest integer unit.
    #[must_use]
    pub fn from_rect(rect: Option<&Rectangle>) -> Self {
        match rect {
            None => Self::Empty,
            Some(r) => Self::Shape {
                x: round_unit(r.x),
                y: round_unit(r.y),
                width: round_unit(r.width),
                height: round_unit(r.height),
            },
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_unit(value: f64) -> i64 {
    // `as` saturates; NaN maps to 0.
    value.round() as i64
}

impl fmt::Display for RectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rectangle Info")?;
        match self {
            Self::Empty => write!(f, "No rectangle drawn"),
            Self::Shape { x, y, width, height } => {
                writeln!(f, "X: {x}")?;
                writeln!(f, "Y: {y}")?;
                writeln!(f, "Width: {width}")?;
                write!(f, "Height: {height}")
            }
        }
    }
}
