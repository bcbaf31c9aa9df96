//! Canvas-space geometry: points and rotated object bounds.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate this point clockwise by `degrees` around `pivot`.
    #[must_use]
    pub fn rotate_about(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point { x: pivot.x + dx * cos - dy * sin, y: pivot.y + dx * sin + dy * cos }
    }
}

/// An object's footprint: a rectangle centered on `center`, rotated
/// clockwise by `rotation` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
    pub rotation: f64,
}

impl Bounds {
    /// Map a canvas point into the bounds' unrotated local frame, relative to center.
    #[must_use]
    pub fn to_local(&self, pt: Point) -> Point {
        let local = pt.rotate_about(self.center, -self.rotation);
        Point::new(local.x - self.center.x, local.y - self.center.y)
    }

    /// Map a local offset from center back to canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, local: Point) -> Point {
        Point::new(self.center.x + local.x, self.center.y + local.y).rotate_about(self.center, self.rotation)
    }

    /// Whether `pt` lies inside the rotated rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let local = self.to_local(pt);
        local.x.abs() <= self.half_width && local.y.abs() <= self.half_height
    }

    /// Corners in canvas coordinates: NW, NE, SE, SW.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [
            self.to_canvas(Point::new(-hw, -hh)),
            self.to_canvas(Point::new(hw, -hh)),
            self.to_canvas(Point::new(hw, hh)),
            self.to_canvas(Point::new(-hw, hh)),
        ]
    }

    /// Position of the rotate handle, `offset` pixels above the top edge.
    #[must_use]
    pub fn rotate_handle(&self, offset: f64) -> Point {
        self.to_canvas(Point::new(0.0, -self.half_height - offset))
    }
}
