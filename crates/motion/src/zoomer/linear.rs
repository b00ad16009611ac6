use pixcam_common::{ensure, PixcamResult};

use super::Zoomer;
use crate::env::Environment;
use crate::interp::{clamp, lerp};

/// Largest target distance followed at full rate.
const MAX_ZOOM_TRACKING: f64 = 5.0;

/// Linearly interpolated zoom speed with extra smoothing.
///
/// Instead of chasing the target directly, an adjusted target approaches
/// it progressively, and the speed is itself interpolated. Can overshoot
/// slightly and rebound.
#[derive(Debug, Clone)]
pub struct SmoothLinear {
    speed: f64,
    adjusted_target: f64,
}

impl Default for SmoothLinear {
    fn default() -> Self {
        Self {
            speed: 0.0,
            adjusted_target: 1.0,
        }
    }
}

impl Zoomer for SmoothLinear {
    fn reset(&mut self, current_zoom: f64) {
        self.adjusted_target = current_zoom;
        self.speed = 0.0;
    }

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64 {
        let delta = env.update_delta();
        if target != self.adjusted_target {
            let distance = target - self.adjusted_target;
            let approximation = clamp(distance, -MAX_ZOOM_TRACKING, MAX_ZOOM_TRACKING) * 1.6 * delta;
            if (target - current).abs() < (distance - approximation).abs() {
                self.adjusted_target = current;
            } else {
                self.adjusted_target += approximation;
            }
        }

        let new_speed = lerp(0.0, self.adjusted_target - current, 0.15);
        self.speed = lerp(self.speed, new_speed, 3.0 * delta);
        self.speed * delta * 20.0
    }
}

/// Like [`SmoothLinear`] but without rebounds, with rougher turns when
/// the target changes mid-transition and a configurable speed factor.
#[derive(Debug, Clone)]
pub struct RoughLinear {
    speed_factor: f64,
    adjusted_target: f64,
}

impl Default for RoughLinear {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            adjusted_target: 1.0,
        }
    }
}

impl RoughLinear {
    /// Speed factor, strictly positive (default 1.0).
    pub fn set_speed_factor(&mut self, factor: f64) -> PixcamResult<()> {
        ensure(
            factor > 0.0,
            format!("zoom speed factor must be strictly positive, got {factor}"),
        )?;
        self.speed_factor = factor;
        Ok(())
    }
}

impl Zoomer for RoughLinear {
    fn reset(&mut self, current_zoom: f64) {
        self.adjusted_target = current_zoom;
    }

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64 {
        let delta = env.update_delta();
        if target != self.adjusted_target {
            let dir = if target < self.adjusted_target { -1.0 } else { 1.0 };
            let distance = target - self.adjusted_target;
            let approximation =
                clamp(distance, -MAX_ZOOM_TRACKING, MAX_ZOOM_TRACKING) * 1.6 * delta + dir * delta / 2.0;
            if (target - current).abs() < (distance - approximation).abs() {
                self.adjusted_target = current;
                return 0.0;
            }
            self.adjusted_target += approximation;
            self.adjusted_target = if dir > 0.0 {
                self.adjusted_target.min(target)
            } else {
                self.adjusted_target.max(target)
            };
        }

        let change = lerp(0.0, self.adjusted_target - current, 2.6 * delta) * self.speed_factor;
        if change < 0.0 {
            (change - delta / 3.0).max(target - current)
        } else if change > 0.0 {
            (change + delta / 3.0).min(target - current)
        } else {
            change
        }
    }
}
