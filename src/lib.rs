//! # humanmotion
//!
//! Human-plausible pointer trajectory synthesis for browser automation.
//!
//! Automated interactions whose pointer teleports in straight lines are easy
//! to flag with motion-pattern heuristics. This crate generates the
//! trajectories a human hand would produce: randomized Bézier curves sampled
//! into waypoints, step counts derived from a Fitts's-Law timing model, and
//! long reaches that overshoot the target and correct back. A stateful
//! cursor controller sequences those trajectories, retries against targets
//! that relocate mid-animation, and can keep the pointer drifting in the
//! background while nothing else is happening.
//!
//! # Architecture
//!
//! ```text
//! humanmotion
//!   ├─> Cursor Controller (position state, retry loop, idle wander)
//!   ├─> Path Planner (Fitts step counts, overshoot policy)
//!   ├─> Curve Generator (randomized cubic Bézier, LUT sampling)
//!   ├─> Point Sampler (padded in-box and viewport destinations)
//!   └─> PointerDriver (automation backend: pointer I/O, selector
//!        resolution, element geometry, protocol session)
//! ```
//!
//! The crate decides *how* the pointer moves, never *what* it targets:
//! pointer I/O, selector resolution, and geometry queries all go through the
//! [`driver::PointerDriver`] trait supplied by the embedding automation
//! stack.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use humanmotion::{ClickOptions, Cursor, CursorConfig};
//! # async fn demo(driver: Arc<dyn humanmotion::PointerDriver>) -> humanmotion::cursor::Result<()> {
//! let cursor = Cursor::new(
//!     driver,
//!     CursorConfig {
//!         idle_wander: true,
//!         ..Default::default()
//!     },
//! );
//!
//! cursor
//!     .click(Some("#submit".into()), &ClickOptions::default())
//!     .await?;
//! cursor.shutdown();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod curve;
pub mod driver;
pub mod geometry;
pub mod path;
pub mod sampling;

pub use cursor::{ClickOptions, Cursor, CursorConfig, CursorError, ElementTarget, MoveOptions};
pub use driver::{DriverError, Locator, PointerDriver};
pub use geometry::{BoundingBox, Vector, ORIGIN};
pub use path::{plan, should_overshoot, PathOptions, PathTarget};
pub use sampling::{random_box_point, random_page_point};
