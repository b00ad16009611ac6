use pixcam_common::{Point2D, PixcamResult};

use super::corrector::{CatchUpCorrector, Corrector, SpringCorrector};
use super::follower::Follower;
use super::parametrized::Parametrized;
use super::spring::SpringTracker;
use super::Tracker;
use crate::env::Environment;

/// Base tracker with a catch-up mechanism.
///
/// The base tracker lags behind a target moving at constant speed. Once
/// the follower detects sustained motion, the corrector builds up an
/// extra speed that closes the gap; when the motion stops, the corrector
/// decelerates back to rest.
#[derive(Debug, Clone, Default)]
pub struct CatchUpTracker<B, C> {
    /// Base tracker, configurable directly.
    pub base: B,
    follower: Follower,
    corrector: C,
}

/// [`Parametrized`] base with a bounded-acceleration corrector.
pub type Tailer = CatchUpTracker<Parametrized, Corrector>;

/// [`SpringTracker`] base with a spring corrector.
pub type SpringTailer = CatchUpTracker<SpringTracker, SpringCorrector>;

impl<B, C> CatchUpTracker<B, C> {
    pub fn new(base: B, corrector: C) -> Self {
        Self {
            base,
            follower: Follower::default(),
            corrector,
        }
    }

    /// Set how long sustained motion takes to engage the catch-up, and
    /// how long the camera must stay still for it to disengage.
    pub fn set_catch_up_times(&mut self, engage_secs: f64, disengage_secs: f64) -> PixcamResult<()> {
        self.follower.set_times(engage_secs, disengage_secs)
    }

    pub fn is_catching_up(&self) -> bool {
        self.follower.is_engaged()
    }

    pub fn corrector_mut(&mut self) -> &mut C {
        &mut self.corrector
    }
}

impl Tailer {
    /// Catch-up acceleration in screens per second squared (default 0.2).
    pub fn set_catch_up_acceleration(&mut self, acceleration: f64) -> PixcamResult<()> {
        self.corrector.set_acceleration(acceleration)
    }
}

impl SpringTailer {
    /// Spring parameters of the catch-up corrector (default 0.9, 1.75).
    pub fn set_catch_up_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        self.corrector.set_parameters(damping, frequency)
    }
}

impl<B: Tracker, C: CatchUpCorrector> Tracker for CatchUpTracker<B, C> {
    fn update(&mut self, env: &Environment, current: Point2D, target: Point2D, prev_speed: Point2D) -> Point2D {
        let delta = env.update_delta();
        let correction = |speed: Point2D| {
            Point2D::new(
                speed.x * env.width() * delta / env.zoom,
                speed.y * env.height() * delta / env.zoom,
            )
        };

        // the base tracker sees the position without the catch-up term
        let rel_current = current - correction(self.corrector.speed());
        let mut change = self.base.update(env, rel_current, target, prev_speed);

        self.follower.update(env, change, prev_speed);
        if self.follower.is_engaged() {
            self.corrector.correct(env, target - current);
        } else {
            self.corrector.correct(env, Point2D::ZERO);
        }
        change += correction(self.corrector.speed());

        let rest_change = 0.12 * delta;
        let rest_distance = (0.25 / env.zoom) * delta;
        let remaining = target - (current + change);
        if self.corrector.speed().is_zero()
            && change.x.abs() < rest_change
            && change.y.abs() < rest_change
            && remaining.x.abs() < rest_distance
            && remaining.y.abs() < rest_distance
        {
            return target - current;
        }
        change
    }
}
