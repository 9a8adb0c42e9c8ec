//! Path Planner
//!
//! Chooses how densely to sample a randomized curve using a Fitts's-Law
//! timing model, then emits the ordered waypoint list the controller feeds to
//! the driver. Also hosts the overshoot policy: long reaches get a coarse
//! leg past the target followed by a tight corrective leg.

use rand::Rng;

use crate::curve::BezierCurve;
use crate::geometry::{clamp_positive, distance, BoundingBox, Vector};

/// Assumed target width when the destination is a bare point or a
/// degenerate zero-width box
const DEFAULT_TARGET_WIDTH: f64 = 100.0;

/// Base step count scaled by the speed factor
const MIN_STEPS: f64 = 25.0;

/// Perceived travel distance is shorter than literal arc length for timing
/// purposes
const ARC_LENGTH_DAMPING: f64 = 0.8;

/// Upper bound on waypoints per trajectory; extreme speed values would
/// otherwise request sample counts no driver could replay
const MAX_STEPS: usize = 10_000;

/// Travel distance (pixels) beyond which a reach overshoots the target
pub const OVERSHOOT_THRESHOLD: f64 = 500.0;

/// What a trajectory is aimed at: a bare point or an element region.
///
/// The region variant carries the element extent so the timing model can use
/// the real target width; the curve itself ends at the region's top-left
/// anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathTarget {
    /// A precise destination coordinate
    Point(Vector),
    /// An element region
    Region(BoundingBox),
}

impl PathTarget {
    /// The coordinate the curve terminates at
    pub fn end_point(&self) -> Vector {
        match self {
            PathTarget::Point(p) => *p,
            PathTarget::Region(b) => b.origin_point(),
        }
    }

    /// Effective target width for the timing model
    fn effective_width(&self) -> f64 {
        match self {
            PathTarget::Point(_) => DEFAULT_TARGET_WIDTH,
            PathTarget::Region(b) if b.width == 0.0 => DEFAULT_TARGET_WIDTH,
            PathTarget::Region(b) => b.width,
        }
    }
}

impl From<Vector> for PathTarget {
    fn from(point: Vector) -> Self {
        PathTarget::Point(point)
    }
}

impl From<BoundingBox> for PathTarget {
    fn from(region: BoundingBox) -> Self {
        PathTarget::Region(region)
    }
}

/// Tuning for a single trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOptions {
    /// Curve spread override for tight corrective legs
    pub spread_override: Option<f64>,
    /// Movement speed; higher values produce fewer steps and snappier motion.
    /// When absent a per-call random speed adds natural variability.
    /// Non-positive and non-finite values are treated as absent.
    pub move_speed: Option<f64>,
}

/// Fitts's-Law index of difficulty scaled to an expected-time estimate.
///
/// <https://en.wikipedia.org/wiki/Fitts%27s_law> with a = 0, b = 2.
fn fitts(distance: f64, width: f64) -> f64 {
    2.0 * (distance / width + 1.0).log2()
}

/// Waypoint count for a trajectory of the given damped length.
///
/// Monotonically non-decreasing in `length` for fixed `width` and `speed`.
fn step_count(length: f64, width: f64, speed: f64) -> usize {
    let base_time = speed * MIN_STEPS;
    (((fitts(length, width) + 1.0).log2() + base_time) * 3.0).ceil() as usize
}

/// Build one human-plausible trajectory from `start` to `target`.
///
/// One-shot per call: every invocation draws fresh randomness for the curve
/// shape and, when no speed is given, the pacing. Output coordinates are
/// clamped to >= 0 and the list is never empty.
pub fn plan<R: Rng + ?Sized>(
    start: Vector,
    target: PathTarget,
    options: &PathOptions,
    rng: &mut R,
) -> Vec<Vector> {
    let width = target.effective_width();
    let curve = BezierCurve::randomized(start, target.end_point(), options.spread_override, rng);
    let length = curve.arc_length() * ARC_LENGTH_DAMPING;

    // A non-positive or non-finite speed cannot yield a finite step count
    let speed = match options.move_speed {
        Some(move_speed) if move_speed > 0.0 && move_speed.is_finite() => MIN_STEPS / move_speed,
        _ => rng.gen::<f64>(),
    };

    let steps = step_count(length, width, speed).min(MAX_STEPS);
    let mut points = curve.lookup_table(steps);
    clamp_positive(&mut points);
    points
}

/// Whether a reach from `a` to `b` is long enough to overshoot.
///
/// Strict comparison: a distance of exactly `threshold` does not overshoot.
pub fn should_overshoot(a: Vector, b: Vector, threshold: f64) -> bool {
    distance(a, b) > threshold
}
