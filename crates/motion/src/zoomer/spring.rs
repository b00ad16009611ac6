use pixcam_common::{ensure, PixcamResult};

use super::Zoomer;
use crate::env::Environment;
use crate::interp::{ease_in_quad, lerp};
use crate::spring::Spring;

/// Distance to the target below which zoom compensation is relaxed.
const COMPENSATION_THRESHOLD: f64 = 0.333;

/// Spring-driven zoom. Barely overshoots with the default parameters.
#[derive(Debug, Clone)]
pub struct SpringZoomer {
    spring: Spring,
    speed: f64,
    max_target_distance: f64,
    zoom_compensation: f64,
}

impl Default for SpringZoomer {
    fn default() -> Self {
        Self {
            spring: Spring::preset(0.85, 2.5),
            speed: 0.0,
            max_target_distance: 0.0,
            zoom_compensation: 0.0,
        }
    }
}

impl SpringZoomer {
    pub fn set_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        self.spring.set_parameters(damping, frequency)
    }

    /// Blend of the change towards being multiplied by the current zoom,
    /// in `[0, 1]` (default 0). Compensated springs overshoot on zoom ins
    /// and undershoot on zoom outs; (0.87, 1.6) is a good starting point
    /// at full compensation.
    pub fn set_zoom_compensation(&mut self, compensation: f64) -> PixcamResult<()> {
        ensure(
            (0.0..=1.0).contains(&compensation),
            format!("zoom compensation must be in [0, 1], got {compensation}"),
        )?;
        self.zoom_compensation = compensation;
        Ok(())
    }

    /// Limit how far ahead of the current zoom the spring target can be.
    /// Zero disables the limit.
    pub fn set_max_target_distance(&mut self, max_distance: f64) -> PixcamResult<()> {
        ensure(
            max_distance >= 0.0,
            format!("max target distance must be >= 0, got {max_distance}"),
        )?;
        self.max_target_distance = max_distance;
        Ok(())
    }

    fn limit_target_distance(&self, current: f64, target: f64) -> f64 {
        let distance = target - current;
        if self.max_target_distance <= 0.0 || distance.abs() <= self.max_target_distance {
            return target;
        }
        current + self.max_target_distance.copysign(distance)
    }
}

impl Zoomer for SpringZoomer {
    fn reset(&mut self, _current_zoom: f64) {
        self.speed = 0.0;
    }

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64 {
        if current == target && self.speed == 0.0 {
            return 0.0;
        }

        let target = self.limit_target_distance(current, target);
        let (position, speed) = self.spring.update(env.updates_per_second, current, target, self.speed);

        // settle instead of oscillating on tiny changes
        if (target - position).abs() < 0.001 && speed.abs() < env.update_delta() {
            self.speed = 0.0;
            return target - current;
        }

        self.speed = speed;
        let change = position - current;
        if self.zoom_compensation <= 0.0 {
            return change;
        }

        let distance = (target - current).abs();
        let compensated_zoom = 1.0 + (current - 1.0) * self.zoom_compensation;
        if distance <= COMPENSATION_THRESHOLD {
            let t = ease_in_quad(distance / COMPENSATION_THRESHOLD);
            change * lerp(1.0, compensated_zoom, t)
        } else {
            change * compensated_zoom
        }
    }
}
