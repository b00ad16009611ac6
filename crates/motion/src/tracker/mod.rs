//! Camera position trackers.
//!
//! A tracker receives the camera's current and target positions plus the
//! displacement it returned on the previous update, and returns the
//! displacement to apply on this update. The provided trackers are
//! resolution and update-rate independent: distances are measured
//! relative to the logical resolution and speeds scaled by the update
//! delta read from the [`Environment`].

mod corrector;
mod follower;
mod linear;
mod parametrized;
mod spring;
mod tailer;

pub use corrector::{CatchUpCorrector, Corrector, SpringCorrector};
pub use follower::Follower;
pub use linear::Linear;
pub use parametrized::Parametrized;
pub use spring::SpringTracker;
pub use tailer::{CatchUpTracker, SpringTailer, Tailer};

use pixcam_common::{Point2D, TrackerKind};

use crate::env::Environment;

/// Computes the per-update camera displacement.
pub trait Tracker {
    fn update(
        &mut self,
        env: &Environment,
        current: Point2D,
        target: Point2D,
        prev_speed: Point2D,
    ) -> Point2D;
}

/// Owned tracker as stored by the camera.
pub type BoxedTracker = Box<dyn Tracker>;

/// Never moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frozen;

impl Tracker for Frozen {
    fn update(&mut self, _: &Environment, _: Point2D, _: Point2D, _: Point2D) -> Point2D {
        Point2D::ZERO
    }
}

/// Jumps to the target on every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instant;

impl Tracker for Instant {
    fn update(&mut self, _: &Environment, current: Point2D, target: Point2D, _: Point2D) -> Point2D {
        target - current
    }
}

/// Build a tracker with default parameters for the given kind.
pub fn build_tracker(kind: TrackerKind) -> BoxedTracker {
    tracing::debug!(?kind, "Building default tracker");
    match kind {
        TrackerKind::Frozen => Box::new(Frozen),
        TrackerKind::Instant => Box::new(Instant),
        TrackerKind::Linear => Box::new(Linear),
        TrackerKind::Parametrized => Box::new(Parametrized::default()),
        TrackerKind::Spring => Box::new(SpringTracker::default()),
        TrackerKind::Tailer => Box::new(Tailer::default()),
        TrackerKind::SpringTailer => Box::new(SpringTailer::default()),
    }
}

/// Whether both axes of `target - current` are below `threshold`.
pub(crate) fn within(current: Point2D, target: Point2D, threshold: f64) -> bool {
    (target.x - current.x).abs() < threshold && (target.y - current.y).abs() < threshold
}
