//! Controller Options and Configuration
//!
//! Per-command option structs mirroring the knobs callers tune on individual
//! moves and clicks, plus the session-level [`CursorConfig`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Vector, ORIGIN};

/// Options for a single `move_to_element` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Padding percentage applied when sampling the destination inside the
    /// target box; out-of-range values mean no padding
    pub padding_percentage: Option<f64>,
    /// Wait up to this long for the selector to appear before resolving it
    pub wait_for_selector: Option<Duration>,
    /// Upper bound for the randomized settle delay once the move lands;
    /// no settle when absent
    pub move_delay: Option<Duration>,
    /// Total attempts against a target that keeps relocating
    pub max_tries: Option<u32>,
    /// Movement speed passed through to the planner; non-positive values
    /// fall back to randomized pacing
    pub move_speed: Option<f64>,
}

/// Options for a single `click` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickOptions {
    /// Padding percentage for the preceding move
    pub padding_percentage: Option<f64>,
    /// Wait budget for the preceding move's selector resolution
    pub wait_for_selector: Option<Duration>,
    /// Upper bound for the randomized settle delay after the click
    pub move_delay: Option<Duration>,
    /// Total attempts for the preceding move
    pub max_tries: Option<u32>,
    /// Movement speed for the preceding move
    pub move_speed: Option<f64>,
    /// Hold the button down this long between press and release
    pub wait_for_click: Option<Duration>,
}

impl ClickOptions {
    /// The move-level subset of these options
    pub(crate) fn move_options(&self) -> MoveOptions {
        MoveOptions {
            padding_percentage: self.padding_percentage,
            wait_for_selector: self.wait_for_selector,
            // The click applies its own settle; the inner move must not
            move_delay: None,
            max_tries: self.max_tries,
            move_speed: self.move_speed,
        }
    }
}

/// Session-level configuration for a cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Pointer position at session start
    #[serde(default = "default_start")]
    pub start: Vector,

    /// Spawn the background idle-wander task at construction
    #[serde(default)]
    pub idle_wander: bool,

    /// Travel distance (pixels) beyond which reaches overshoot the target
    #[serde(default = "default_overshoot_threshold")]
    pub overshoot_threshold: f64,

    /// How far past the target an overshooting leg lands (pixels)
    #[serde(default = "default_overshoot_radius")]
    pub overshoot_radius: f64,

    /// Curve spread for the tight corrective leg after an overshoot
    #[serde(default = "default_overshoot_spread")]
    pub overshoot_spread: f64,

    /// Upper bound for randomized settle delays when no `move_delay` is given
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Fixed settle delay after the in-page scroll fallback
    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,

    /// Default total attempts against a relocating target
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Movement speed applied to idle-wander traces
    #[serde(default)]
    pub idle_move_speed: Option<f64>,

    /// Upper bound for the randomized pause between idle-wander traces
    #[serde(default)]
    pub idle_move_delay_ms: Option<u64>,
}

fn default_start() -> Vector {
    ORIGIN
}
fn default_overshoot_threshold() -> f64 {
    crate::path::OVERSHOOT_THRESHOLD
}
fn default_overshoot_radius() -> f64 {
    120.0
}
fn default_overshoot_spread() -> f64 {
    10.0
}
fn default_settle_delay_ms() -> u64 {
    2000
}
fn default_scroll_settle_ms() -> u64 {
    2000
}
fn default_max_tries() -> u32 {
    10
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            idle_wander: false,
            overshoot_threshold: default_overshoot_threshold(),
            overshoot_radius: default_overshoot_radius(),
            overshoot_spread: default_overshoot_spread(),
            settle_delay_ms: default_settle_delay_ms(),
            scroll_settle_ms: default_scroll_settle_ms(),
            max_tries: default_max_tries(),
            idle_move_speed: None,
            idle_move_delay_ms: None,
        }
    }
}
