//! Input model: mouse buttons, modifier keys, and the gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! Each active variant keeps the object's transform from the start of the
//! gesture so the engine can compute absolute updates and tell, on release,
//! whether anything actually changed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{ObjectId, Transform};
use crate::geom::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift snaps rotation to fixed steps.
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Only `Delete`. `Backspace` belongs to the page's text fields.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Gesture in progress.
#[derive(Debug, Clone, Copy, Default)]
pub enum InputState {
    /// Waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving an object by its body.
    DraggingObject {
        id: ObjectId,
        /// Pointer position at the previous event.
        last: Point,
        orig: Transform,
    },
    /// Uniformly scaling an object from a corner handle.
    ScalingObject {
        id: ObjectId,
        /// Pointer distance from the object's center at pointer-down.
        start_dist: f64,
        orig: Transform,
    },
    /// Rotating an object with the rotate handle.
    RotatingObject {
        id: ObjectId,
        /// Pointer angle around the center at pointer-down, in degrees.
        start_angle: f64,
        orig: Transform,
    },
}

impl InputState {
    /// Object targeted by the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { id, .. } | Self::ScalingObject { id, .. } | Self::RotatingObject { id, .. } => {
                Some(*id)
            }
        }
    }

    /// Transform the target had when the gesture began.
    #[must_use]
    pub fn original(&self) -> Option<Transform> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { orig, .. } | Self::ScalingObject { orig, .. } | Self::RotatingObject { orig, .. } => {
                Some(*orig)
            }
        }
    }
}

/// Angle of `pt` around `center` in degrees, clockwise from the positive x axis.
#[must_use]
pub fn angle_deg(center: Point, pt: Point) -> f64 {
    (pt.y - center.y).atan2(pt.x - center.x).to_degrees()
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Round an angle to the nearest multiple of `step` degrees.
#[must_use]
pub fn snap_degrees(deg: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return deg;
    }
    (deg / step).round() * step
}
