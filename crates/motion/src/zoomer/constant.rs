use pixcam_common::{ensure, PixcamResult, TicksDuration};

use super::Zoomer;
use crate::env::Environment;
use crate::interp::lerp;

/// Zooms at a constant speed, in zoom levels per second.
///
/// By default the change is multiplied by the current zoom: going from
/// x1 to x2 divides the visible surface by four, not two, so a purely
/// linear speed looks like it slows down when zooming in. Speed changes
/// can be eased over a number of ticks.
#[derive(Debug, Clone)]
pub struct Constant {
    transition_start: f64,
    transition_end: f64,
    transition_length: TicksDuration,
    transition_elapsed: TicksDuration,
    zoom_compensated: bool,
}

const DEFAULT_SPEED: f64 = 1.0;

impl Default for Constant {
    fn default() -> Self {
        Self {
            transition_start: DEFAULT_SPEED,
            transition_end: DEFAULT_SPEED,
            transition_length: 0,
            transition_elapsed: 0,
            zoom_compensated: true,
        }
    }
}

impl Constant {
    /// Change the speed, transitioning linearly from the current speed
    /// over `transition` ticks. Reasonable speeds are within `[0.5, 3.0]`.
    pub fn set_speed(&mut self, speed: f64, transition: TicksDuration) -> PixcamResult<()> {
        ensure(
            speed.is_finite() && speed > 0.0,
            format!("zoom speed must be a strictly positive number, got {speed}"),
        )?;
        self.transition_start = self.current_speed();
        self.transition_end = speed;
        self.transition_length = transition;
        self.transition_elapsed = 0;
        Ok(())
    }

    pub fn set_zoom_compensated(&mut self, compensated: bool) {
        self.zoom_compensated = compensated;
    }

    pub fn current_speed(&self) -> f64 {
        if self.transition_elapsed < self.transition_length {
            let t = f64::from(self.transition_elapsed) / f64::from(self.transition_length);
            lerp(self.transition_start, self.transition_end, t)
        } else {
            self.transition_end
        }
    }

    fn advance_speed(&mut self, ticks: u32) -> f64 {
        let speed = self.current_speed();
        if self.transition_elapsed < self.transition_length {
            self.transition_elapsed = self
                .transition_elapsed
                .saturating_add(ticks)
                .min(self.transition_length);
        }
        speed
    }
}

impl Zoomer for Constant {
    fn reset(&mut self, _current_zoom: f64) {
        self.transition_start = self.transition_end;
        self.transition_length = 0;
        self.transition_elapsed = 0;
    }

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64 {
        let speed = self.advance_speed(env.ticks_per_update);
        if target == current {
            return 0.0;
        }

        let mut step = speed * env.update_delta();
        if self.zoom_compensated {
            step *= current;
        }
        if current < target {
            step.min(target - current)
        } else {
            (-step).max(target - current)
        }
    }
}
