//! Cursor Controller
//!
//! The stateful heart of the crate: owns the pointer position, sequences
//! trajectory legs against a live (possibly relocating) target element, and
//! runs the optional background idle-wander task.
//!
//! # State machine
//!
//! Two states, driven by a single atomic flag: **Idle-wander-enabled** (the
//! background task may act) and **Busy** (a deliberate command owns the
//! pointer). The flag is checked only at waypoint boundaries, never inside an
//! in-flight pointer call, so preemption is cooperative.
//! Deliberate commands set Busy before any I/O and restore Idle-wander-enabled
//! only after the command fully completes, settle delay included.
//!
//! Deliberate commands are not safe to invoke concurrently from independent
//! callers: they share the position and the flag. Callers must serialize
//! their own commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::curve::overshoot;
use crate::driver::{resolve_remote_object, Locator, PointerDriver};
use crate::geometry::{BoundingBox, Vector};
use crate::path::{plan, should_overshoot, PathOptions};
use crate::sampling::{random_box_point, random_page_point};

mod error;
mod options;

pub use error::{CursorError, Result};
pub use options::{ClickOptions, CursorConfig, MoveOptions};

/// What a move or click command is aimed at.
#[derive(Debug, Clone)]
pub enum ElementTarget {
    /// A selector string, resolved through the driver; selectors beginning
    /// with `//` are interpreted as XPath
    Selector(String),
    /// An already-resolved locator
    Locator(Locator),
}

impl From<&str> for ElementTarget {
    fn from(selector: &str) -> Self {
        ElementTarget::Selector(selector.to_string())
    }
}

impl From<String> for ElementTarget {
    fn from(selector: String) -> Self {
        ElementTarget::Selector(selector)
    }
}

impl From<Locator> for ElementTarget {
    fn from(locator: Locator) -> Self {
        ElementTarget::Locator(locator)
    }
}

/// Pointer state shared between deliberate commands and the idle-wander task.
struct SharedState {
    /// Last settled pointer position, written only at trajectory-leg
    /// boundaries
    previous: Mutex<Vector>,
    /// True while a deliberate command owns the pointer
    moving: AtomicBool,
}

/// A human-plausible cursor bound to one automation session.
///
/// Created once per session via [`Cursor::new`]; the optional idle-wander
/// task is stopped by [`Cursor::shutdown`] or by dropping the cursor.
pub struct Cursor {
    driver: Arc<dyn PointerDriver>,
    state: Arc<SharedState>,
    config: CursorConfig,
    rng: Arc<Mutex<StdRng>>,
    idle_token: CancellationToken,
}

impl Cursor {
    /// Create a cursor with an entropy-seeded generator.
    ///
    /// Must be called inside a tokio runtime when `config.idle_wander` is
    /// set, since that spawns the background task.
    pub fn new(driver: Arc<dyn PointerDriver>, config: CursorConfig) -> Self {
        Self::with_rng(driver, config, StdRng::from_entropy())
    }

    /// Create a cursor with an injected generator for reproducible
    /// trajectories.
    pub fn with_rng(driver: Arc<dyn PointerDriver>, config: CursorConfig, rng: StdRng) -> Self {
        let state = Arc::new(SharedState {
            previous: Mutex::new(config.start),
            moving: AtomicBool::new(false),
        });
        let rng = Arc::new(Mutex::new(rng));
        let idle_token = CancellationToken::new();

        if config.idle_wander {
            spawn_idle_wander(
                Arc::clone(&driver),
                Arc::clone(&state),
                Arc::clone(&rng),
                config.clone(),
                idle_token.child_token(),
            );
        }

        Self {
            driver,
            state,
            config,
            rng,
            idle_token,
        }
    }

    /// Current settled pointer position
    pub fn position(&self) -> Vector {
        *self.state.previous.lock()
    }

    /// Whether the background idle-wander task is currently permitted to act
    pub fn idle_wander_enabled(&self) -> bool {
        !self.state.moving.load(Ordering::SeqCst)
    }

    /// Enable or disable the background idle-wander behavior.
    ///
    /// Also used internally: deliberate commands disable it on entry and
    /// re-enable it on completion.
    pub fn toggle_random_move(&self, enabled: bool) {
        self.state.moving.store(!enabled, Ordering::SeqCst);
    }

    /// Stop the background idle-wander task permanently.
    pub fn shutdown(&self) {
        self.idle_token.cancel();
    }

    /// Trace a direct path from the current position to `destination`.
    pub async fn move_to(&self, destination: Vector) -> Result<()> {
        self.toggle_random_move(false);

        let points = {
            let mut rng = self.rng.lock();
            plan(
                self.position(),
                destination.into(),
                &PathOptions::default(),
                &mut *rng,
            )
        };
        trace_path(self.driver.as_ref(), &self.state, &points, false).await;

        self.toggle_random_move(true);
        Ok(())
    }

    /// Move onto a target element, retrying while it relocates.
    ///
    /// Makes up to `max_tries` total attempts (default 10). Each attempt
    /// resolves the target, brings it into view, samples a destination point
    /// inside its box, traces one or two legs (overshoot policy), then
    /// re-queries the box; if the element moved away during the animation the
    /// next attempt starts over.
    pub async fn move_to_element(
        &self,
        target: impl Into<ElementTarget>,
        options: &MoveOptions,
    ) -> Result<()> {
        let target = target.into();
        let max_tries = options.max_tries.unwrap_or(self.config.max_tries).max(1);

        for attempt in 1..=max_tries {
            self.toggle_random_move(false);

            let locator = self.resolve_target(&target, options).await?;
            self.ensure_in_view(&locator).await?;

            let bounds = self.bounding_box_with_fallback(&locator).await?;
            let destination = {
                let mut rng = self.rng.lock();
                random_box_point(&bounds, options.padding_percentage, &mut *rng)
            };

            let previous = self.position();
            let overshooting =
                should_overshoot(previous, destination, self.config.overshoot_threshold);

            // Long reaches land past the target first, then correct back
            let arrival = if overshooting {
                let mut rng = self.rng.lock();
                overshoot(destination, self.config.overshoot_radius, &mut *rng)
            } else {
                destination
            };

            let leg = {
                let mut rng = self.rng.lock();
                plan(
                    previous,
                    arrival.into(),
                    &PathOptions {
                        spread_override: None,
                        move_speed: options.move_speed,
                    },
                    &mut *rng,
                )
            };
            trace_path(self.driver.as_ref(), &self.state, &leg, false).await;

            if overshooting {
                let region =
                    BoundingBox::new(destination.x, destination.y, bounds.width, bounds.height);
                let correction = {
                    let mut rng = self.rng.lock();
                    plan(
                        arrival,
                        region.into(),
                        &PathOptions {
                            spread_override: Some(self.config.overshoot_spread),
                            move_speed: options.move_speed,
                        },
                        &mut *rng,
                    )
                };
                trace_path(self.driver.as_ref(), &self.state, &correction, false).await;
            }

            *self.state.previous.lock() = destination;
            self.toggle_random_move(true);

            // The element may have relocated while the animation ran
            let rechecked = self.bounding_box_with_fallback(&locator).await?;
            if rechecked.contains(destination) {
                if let Some(bound) = options.move_delay {
                    self.settle(Some(bound)).await;
                }
                return Ok(());
            }
            debug!(attempt, max_tries, "target relocated during trace, retrying");
        }

        Err(CursorError::TargetUnreachable { tries: max_tries })
    }

    /// Click the primary button, optionally moving onto a target first.
    ///
    /// Press or release failures are logged and swallowed; the release is
    /// attempted even when the press fails so the button is never left down.
    pub async fn click(&self, target: Option<ElementTarget>, options: &ClickOptions) -> Result<()> {
        self.toggle_random_move(false);

        if let Some(target) = target {
            self.move_to_element(target, &options.move_options()).await?;
            // move_to_element re-enables idle wander on success
            self.toggle_random_move(false);
        }

        if let Err(err) = self.driver.press_button().await {
            warn!(error = %err, "could not press primary button");
        }
        if let Some(hold) = options.wait_for_click {
            sleep(hold).await;
        }
        if let Err(err) = self.driver.release_button().await {
            warn!(error = %err, "could not release primary button");
        }

        self.settle(options.move_delay).await;
        self.toggle_random_move(true);
        Ok(())
    }

    async fn resolve_target(
        &self,
        target: &ElementTarget,
        options: &MoveOptions,
    ) -> Result<Locator> {
        match target {
            ElementTarget::Selector(selector) => {
                if let Some(timeout) = options.wait_for_selector {
                    self.driver.wait_for_selector(selector, timeout).await?;
                }
                Ok(self.driver.resolve_selector(selector).await?)
            }
            ElementTarget::Locator(locator) => Ok(locator.clone()),
        }
    }

    /// Bring the element into view via the protocol session, falling back to
    /// an in-page scroll plus a fixed settle delay.
    async fn ensure_in_view(&self, locator: &Locator) -> Result<()> {
        let Some(object) = resolve_remote_object(self.driver.as_ref(), locator).await? else {
            return Ok(());
        };

        let scrolled = match self.driver.describe_node(&object).await {
            Ok(node) => {
                trace!(node = %node.node_name, "scrolling node into view");
                self.driver.scroll_into_view(&object).await
            }
            Err(err) => Err(err),
        };

        if let Err(err) = scrolled {
            debug!(error = %err, "protocol scroll failed, using in-page fallback");
            self.driver.scroll_into_view_fallback(locator).await?;
            // Let the fallback scroll animation finish
            sleep(Duration::from_millis(self.config.scroll_settle_ms)).await;
        }
        Ok(())
    }

    /// Bounding box with an in-page geometry fallback for elements the
    /// backend reports as boxless (zero-size inline elements).
    async fn bounding_box_with_fallback(&self, locator: &Locator) -> Result<BoundingBox> {
        match self.driver.bounding_box(locator).await? {
            Some(bounds) => Ok(bounds),
            None => Ok(self.driver.element_geometry(locator).await?),
        }
    }

    /// Randomized settle delay: uniform up to `move_delay` when given, else
    /// up to the configured default.
    async fn settle(&self, move_delay: Option<Duration>) {
        let bound = move_delay.unwrap_or(Duration::from_millis(self.config.settle_delay_ms));
        let factor: f64 = self.rng.lock().gen();
        sleep(bound.mul_f64(factor)).await;
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.idle_token.cancel();
    }
}

/// Drive the pointer through an ordered waypoint list.
///
/// With `abort_on_move`, the trace stops before the next waypoint once a
/// deliberate command has set Busy: only the waypoint loop is interruptible,
/// never an in-flight pointer call. Transient pointer failures are logged and
/// skipped; a disconnected session abandons the trace. The shared position is
/// settled once, at the leg boundary, to the last waypoint actually reached.
async fn trace_path(
    driver: &dyn PointerDriver,
    state: &SharedState,
    points: &[Vector],
    abort_on_move: bool,
) {
    let mut settled: Option<Vector> = None;

    for point in points {
        if abort_on_move && state.moving.load(Ordering::SeqCst) {
            debug!("deliberate command took over, aborting idle trace");
            break;
        }

        match driver.move_pointer(*point).await {
            Ok(()) => settled = Some(*point),
            Err(err) => {
                if !driver.is_connected() {
                    debug!("browser session disconnected, abandoning trace");
                    break;
                }
                warn!(error = %err, "could not move pointer, continuing trace");
            }
        }
    }

    if let Some(point) = settled {
        *state.previous.lock() = point;
    }
}

/// Spawn the background idle-wander task.
///
/// While idle wander is permitted, traces a path to a random viewport point
/// (abortable at every waypoint), then sleeps a randomized interval and goes
/// again. Errors are logged and terminate the task; the token stops it
/// explicitly.
fn spawn_idle_wander(
    driver: Arc<dyn PointerDriver>,
    state: Arc<SharedState>,
    rng: Arc<Mutex<StdRng>>,
    config: CursorConfig,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        debug!("idle wander started");

        loop {
            if token.is_cancelled() {
                debug!("idle wander stopped");
                return;
            }

            if !state.moving.load(Ordering::SeqCst) {
                let (width, height) = match driver.viewport_size().await {
                    Ok(size) => size,
                    Err(err) => {
                        warn!(error = %err, "stopping idle wander");
                        return;
                    }
                };

                let points = {
                    let mut rng = rng.lock();
                    let destination = random_page_point(width, height, &mut *rng);
                    let previous = *state.previous.lock();
                    plan(
                        previous,
                        destination.into(),
                        &PathOptions {
                            spread_override: None,
                            move_speed: config.idle_move_speed,
                        },
                        &mut *rng,
                    )
                };
                trace_path(driver.as_ref(), &state, &points, true).await;
            }

            let bound = config.idle_move_delay_ms.unwrap_or(config.settle_delay_ms);
            let pause = {
                let factor: f64 = rng.lock().gen();
                Duration::from_millis(bound).mul_f64(factor)
            };

            tokio::select! {
                _ = token.cancelled() => {
                    debug!("idle wander stopped");
                    return;
                }
                _ = sleep(pause) => {}
            }
        }
    });
}
