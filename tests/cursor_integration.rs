//! Cursor controller integration tests
//!
//! Drives the full controller stack (planner, curve generator, sampler)
//! against a scripted driver that records pointer traffic and plays back a
//! sequence of element positions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use humanmotion::driver::{
    DriverError, Locator, NodeDescription, PointerDriver, RemoteObjectId, Result as DriverResult,
};
use humanmotion::geometry::distance;
use humanmotion::{BoundingBox, ClickOptions, Cursor, CursorConfig, MoveOptions, Vector, ORIGIN};

/// Records pointer traffic and answers geometry queries from a scripted
/// sequence of bounding boxes (the last box repeats forever).
struct ScriptedDriver {
    moves: Mutex<Vec<Vector>>,
    boxes: Mutex<VecDeque<BoundingBox>>,
    presses: AtomicUsize,
    releases: AtomicUsize,
    viewport: (f64, f64),
}

impl ScriptedDriver {
    fn new(boxes: Vec<BoundingBox>) -> Arc<Self> {
        Arc::new(Self {
            moves: Mutex::new(Vec::new()),
            boxes: Mutex::new(boxes.into()),
            presses: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            viewport: (1280.0, 720.0),
        })
    }

    fn recorded_moves(&self) -> Vec<Vector> {
        self.moves.lock().clone()
    }

    fn next_box(&self) -> BoundingBox {
        let mut boxes = self.boxes.lock();
        if boxes.len() > 1 {
            boxes.pop_front().unwrap()
        } else {
            *boxes.front().expect("script must provide at least one box")
        }
    }
}

#[async_trait]
impl PointerDriver for ScriptedDriver {
    async fn move_pointer(&self, position: Vector) -> DriverResult<()> {
        self.moves.lock().push(position);
        Ok(())
    }

    async fn press_button(&self) -> DriverResult<()> {
        self.presses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn release_button(&self) -> DriverResult<()> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn resolve_selector(&self, selector: &str) -> DriverResult<Locator> {
        Ok(Locator::new(selector))
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout: Duration) -> DriverResult<()> {
        Ok(())
    }

    async fn bounding_box(&self, _locator: &Locator) -> DriverResult<Option<BoundingBox>> {
        Ok(Some(self.next_box()))
    }

    async fn element_geometry(&self, _locator: &Locator) -> DriverResult<BoundingBox> {
        Ok(self.next_box())
    }

    async fn resolve_object(&self, _expression: &str) -> DriverResult<Option<RemoteObjectId>> {
        Ok(None)
    }

    async fn describe_node(&self, _object: &RemoteObjectId) -> DriverResult<NodeDescription> {
        Err(DriverError::Protocol("not scripted".into()))
    }

    async fn scroll_into_view(&self, _object: &RemoteObjectId) -> DriverResult<()> {
        Ok(())
    }

    async fn scroll_into_view_fallback(&self, _locator: &Locator) -> DriverResult<()> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    async fn viewport_size(&self) -> DriverResult<(f64, f64)> {
        Ok(self.viewport)
    }
}

fn seeded_cursor(driver: Arc<ScriptedDriver>, config: CursorConfig) -> Cursor {
    Cursor::with_rng(driver, config, StdRng::seed_from_u64(2024))
}

#[tokio::test]
async fn test_long_reach_overshoots_then_corrects() {
    let target = BoundingBox::new(700.0, 500.0, 80.0, 40.0);
    let driver = ScriptedDriver::new(vec![target]);
    let cursor = seeded_cursor(Arc::clone(&driver), CursorConfig::default());

    cursor
        .move_to_element("#far-away", &MoveOptions::default())
        .await
        .unwrap();

    let destination = cursor.position();
    assert!(target.contains(destination), "cursor settled off target");

    let moves = driver.recorded_moves();
    assert!(!moves.is_empty());

    // The first leg of a long reach terminates on the overshoot circle,
    // one configured radius away from the real destination
    let overshot = moves
        .iter()
        .any(|p| (distance(*p, destination) - 120.0).abs() < 1e-6);
    assert!(overshot, "no waypoint landed on the overshoot circle");

    // The corrective leg brings the pointer back onto the element
    assert_eq!(*moves.last().unwrap(), destination);
}

#[tokio::test]
async fn test_short_reach_goes_direct() {
    let target = BoundingBox::new(150.0, 120.0, 60.0, 30.0);
    let driver = ScriptedDriver::new(vec![target]);
    let cursor = seeded_cursor(Arc::clone(&driver), CursorConfig::default());

    cursor
        .move_to_element("#nearby", &MoveOptions::default())
        .await
        .unwrap();

    let destination = cursor.position();
    assert!(target.contains(destination));

    // No waypoint strays an overshoot radius away from the destination
    // while sitting outside the element
    let moves = driver.recorded_moves();
    let overshot = moves
        .iter()
        .any(|p| (distance(*p, destination) - 120.0).abs() < 1e-6 && !target.contains(*p));
    assert!(!overshot, "short reach should not overshoot");
}

#[tokio::test]
async fn test_relocated_target_is_chased_to_convergence() {
    let before = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
    let after = BoundingBox::new(400.0, 300.0, 50.0, 50.0);

    // Attempt 1 sees the element at its old position, the post-trace recheck
    // finds it moved; attempt 2 converges on the new position
    let driver = ScriptedDriver::new(vec![before, after]);
    let cursor = seeded_cursor(Arc::clone(&driver), CursorConfig::default());

    cursor
        .move_to_element("#shifting", &MoveOptions::default())
        .await
        .unwrap();

    assert!(after.contains(cursor.position()));

    // Both attempts produced pointer traffic
    let moves = driver.recorded_moves();
    assert!(moves.iter().any(|p| before.contains(*p)));
    assert!(moves.iter().any(|p| after.contains(*p)));
}

#[tokio::test]
async fn test_click_moves_then_presses_and_releases() {
    let target = BoundingBox::new(300.0, 200.0, 90.0, 35.0);
    let driver = ScriptedDriver::new(vec![target]);
    let cursor = seeded_cursor(Arc::clone(&driver), CursorConfig::default());

    cursor
        .click(
            Some("#submit".into()),
            &ClickOptions {
                move_delay: Some(Duration::ZERO),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(target.contains(cursor.position()));
    assert_eq!(driver.presses.load(Ordering::SeqCst), 1);
    assert_eq!(driver.releases.load(Ordering::SeqCst), 1);
    assert!(cursor.idle_wander_enabled());
}

#[tokio::test]
async fn test_idle_wander_moves_pointer_and_shutdown_stops_it() {
    let driver = ScriptedDriver::new(vec![BoundingBox::new(0.0, 0.0, 1.0, 1.0)]);
    let config = CursorConfig {
        idle_wander: true,
        idle_move_delay_ms: Some(5),
        start: ORIGIN,
        ..Default::default()
    };
    let cursor = seeded_cursor(Arc::clone(&driver), config);

    // Wait for the background task to produce traffic
    let mut waited = 0u32;
    while driver.recorded_moves().is_empty() {
        assert!(waited < 400, "idle wander never moved the pointer");
        waited += 1;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // Waypoints are clamped to the positive quadrant even when the curve
    // bows past an edge
    for p in driver.recorded_moves() {
        assert!(p.x >= 0.0 && p.y >= 0.0);
    }

    cursor.shutdown();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let settled = driver.recorded_moves().len();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        driver.recorded_moves().len(),
        settled,
        "idle wander kept moving after shutdown"
    );
}
