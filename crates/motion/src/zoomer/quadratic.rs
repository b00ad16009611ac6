use pixcam_common::{ensure, PixcamResult};

use super::Zoomer;
use crate::env::Environment;

/// Quadratic ease-in/out zooming with bounded acceleration.
///
/// Accelerates while the stopping distance at the current speed is
/// shorter than the remaining distance, then decelerates. Without
/// mid-transition target changes the motion is purely quadratic in/out.
#[derive(Debug, Clone)]
pub struct Quadratic {
    speed: f64,
    acceleration: f64,
    max_speed: f64,
}

impl Default for Quadratic {
    fn default() -> Self {
        Self {
            speed: 0.0,
            acceleration: 3.66,
            max_speed: 5.0,
        }
    }
}

impl Quadratic {
    /// Acceleration in zoom levels per second squared. Reasonable values
    /// are within `[0.3, 16.0]`.
    pub fn set_acceleration(&mut self, acceleration: f64) -> PixcamResult<()> {
        ensure(
            acceleration.is_finite() && acceleration >= 0.01,
            format!("zoom acceleration must be a finite number >= 0.01, got {acceleration}"),
        )?;
        self.acceleration = acceleration;
        Ok(())
    }

    pub fn set_max_speed(&mut self, max_speed: f64) -> PixcamResult<()> {
        ensure(
            max_speed >= 0.5,
            format!("max zoom speed can't be < 0.5, got {max_speed}"),
        )?;
        self.max_speed = max_speed;
        Ok(())
    }

    /// Current zoom speed, in zoom levels per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Zoomer for Quadratic {
    fn reset(&mut self, _current_zoom: f64) {
        self.speed = 0.0;
    }

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64 {
        if current == target {
            return 0.0;
        }

        let distance = target - current;
        let stopping_distance = self.speed * self.speed / (2.0 * self.acceleration);
        let delta = env.update_delta();
        let speed_change = self.acceleration * delta;

        self.speed = match (stopping_distance < distance.abs(), distance >= 0.0) {
            (true, true) => (self.speed + speed_change).min(self.max_speed),
            (true, false) => (self.speed - speed_change).max(-self.max_speed),
            (false, true) => (self.speed - speed_change).max(0.0),
            (false, false) => (self.speed + speed_change).min(0.0),
        };

        let change = self.speed * delta;
        if change.abs() < 0.001 && distance.abs() < 0.001 {
            self.speed = 0.0;
            return distance;
        }
        change
    }
}
