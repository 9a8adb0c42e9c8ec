//! Randomized Curve Generator
//!
//! Builds the smooth, slightly-crooked curves a human hand produces when
//! reaching for a target. A cubic Bézier is anchored at the start and end
//! points; its two interior control points sit on random positions along the
//! straight line between them, pushed off to one side by a randomized
//! perpendicular offset (the "spread").
//!
//! All randomness comes from an injected [`rand::Rng`], so a seeded generator
//! reproduces the exact same trajectory.

use rand::Rng;

use crate::geometry::{direction, distance, Vector};

/// Smallest default spread (pixels) for near-zero travel distances
const MIN_SPREAD: f64 = 2.0;

/// Largest default spread (pixels) for long reaches
const MAX_SPREAD: f64 = 200.0;

/// Sample count used for arc-length estimation
const ARC_LENGTH_SAMPLES: usize = 50;

/// A cubic Bézier curve between two pointer positions.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    start: Vector,
    anchor1: Vector,
    anchor2: Vector,
    end: Vector,
}

impl BezierCurve {
    /// Construct a curve whose interior control points are randomized.
    ///
    /// The control-point offset magnitude defaults to the start–end distance
    /// clamped to [2, 200]; `spread_override` replaces it for tight
    /// corrective legs.
    pub fn randomized<R: Rng + ?Sized>(
        start: Vector,
        end: Vector,
        spread_override: Option<f64>,
        rng: &mut R,
    ) -> Self {
        let spread = spread_override.unwrap_or_else(|| distance(start, end).clamp(MIN_SPREAD, MAX_SPREAD));
        let (anchor1, anchor2) = generate_anchors(start, end, spread, rng);
        Self {
            start,
            anchor1,
            anchor2,
            end,
        }
    }

    /// Evaluate the curve at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;

        Vector {
            x: a * self.start.x + b * self.anchor1.x + c * self.anchor2.x + d * self.end.x,
            y: a * self.start.y + b * self.anchor1.y + c * self.anchor2.y + d * self.end.y,
        }
    }

    /// Sampled arc-length estimate of the whole curve
    pub fn arc_length(&self) -> f64 {
        let mut length = 0.0;
        let mut prev = self.start;

        for i in 1..=ARC_LENGTH_SAMPLES {
            let t = i as f64 / ARC_LENGTH_SAMPLES as f64;
            let point = self.point_at(t);
            length += distance(prev, point);
            prev = point;
        }

        length
    }

    /// Sample the curve into an ordered waypoint list ("lookup table").
    ///
    /// Returns `steps + 1` points at uniform parameter spacing, always
    /// including both endpoints, so the result is never empty.
    pub fn lookup_table(&self, steps: usize) -> Vec<Vector> {
        if steps == 0 {
            return vec![self.start];
        }

        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            points.push(self.point_at(i as f64 / steps as f64));
        }
        points
    }
}

/// Two control points on a random side of the straight start→end line.
///
/// Each anchor is a uniformly random point on the line plus a perpendicular
/// offset of random magnitude up to `spread`, both anchors on the same side.
/// Anchors are ordered by x so the curve does not double back on itself.
fn generate_anchors<R: Rng + ?Sized>(
    start: Vector,
    end: Vector,
    spread: f64,
    rng: &mut R,
) -> (Vector, Vector) {
    let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
    let travel = direction(start, end);

    let mut anchor = || {
        let along: f64 = rng.gen();
        let out: f64 = rng.gen();
        let on_line = start.lerp(end, along);
        on_line + travel.perpendicular_scaled(spread * side) * out
    };

    let a = anchor();
    let b = anchor();
    if a.x <= b.x {
        (a, b)
    } else {
        (b, a)
    }
}

/// Displace `target` by `radius` pixels at a uniformly random angle.
///
/// Used for the coarse leg of an overshoot-and-correct reach.
pub fn overshoot<R: Rng + ?Sized>(target: Vector, radius: f64, rng: &mut R) -> Vector {
    let angle = rng.gen::<f64>() * 2.0 * std::f64::consts::PI;
    Vector {
        x: target.x + radius * angle.cos(),
        y: target.y + radius * angle.sin(),
    }
}
