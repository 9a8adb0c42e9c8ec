//! Geometry Primitives
//!
//! Screen-space points, bounding boxes, and the small amount of vector
//! arithmetic the curve generator and planner need. Everything here is a
//! pure value type with no failure modes.

use serde::{Deserialize, Serialize};

/// A screen coordinate, also used as a 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// X coordinate (pixels)
    pub x: f64,
    /// Y coordinate (pixels)
    pub y: f64,
}

/// Default pointer position before any real interaction.
pub const ORIGIN: Vector = Vector { x: 0.0, y: 0.0 };

impl Vector {
    /// Create a new vector
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean norm of this vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Linear interpolation toward `other` (`t` = 0 yields self, 1 yields other)
    pub fn lerp(&self, other: Vector, t: f64) -> Vector {
        Vector {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Unit vector perpendicular to this one, scaled to `length`.
    ///
    /// A zero vector stays zero.
    pub fn perpendicular_scaled(&self, length: f64) -> Vector {
        let mag = self.magnitude();
        if mag == 0.0 {
            return ORIGIN;
        }
        Vector {
            x: -self.y / mag * length,
            y: self.x / mag * length,
        }
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Vector from `a` to `b`
pub fn direction(a: Vector, b: Vector) -> Vector {
    b - a
}

/// Euclidean norm
pub fn magnitude(v: Vector) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Straight-line distance between two points
pub fn distance(a: Vector, b: Vector) -> f64 {
    magnitude(direction(a, b))
}

/// Clamp every coordinate to >= 0.
///
/// Trajectories that arc near the screen edge can briefly leave the visible
/// area; drivers reject negative coordinates.
pub fn clamp_positive(points: &mut [Vector]) {
    for p in points.iter_mut() {
        p.x = p.x.max(0.0);
        p.y = p.y.max(0.0);
    }
}

/// A target region on screen: a point plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width (pixels)
    pub width: f64,
    /// Height (pixels)
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner as a vector
    pub fn origin_point(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Half-open containment test: x in (left, right], y in (top, bottom].
    ///
    /// This is the test the controller uses to decide whether a finished
    /// trajectory still lands on the element it was aimed at.
    pub fn contains(&self, point: Vector) -> bool {
        point.x > self.x
            && point.x <= self.x + self.width
            && point.y > self.y
            && point.y <= self.y + self.height
    }
}
