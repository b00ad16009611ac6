use pixcam_common::{ensure, Point2D, PixcamResult};

use super::Tracker;
use crate::env::Environment;
use crate::interp::{lerp, t_at};

/// Configurable distance-proportional tracker.
///
/// Speeds are expressed in screens per second, where a screen is the
/// logical resolution divided by the current zoom.
#[derive(Debug, Clone)]
pub struct Parametrized {
    max_screens_per_second: f64,
    screens_to_max_speed: f64,
    /// Speed floor; with a floor, small distances are covered almost
    /// instantly.
    min_screens_per_second: f64,
    /// Dead zone; the tracker stays still while the distance is below it.
    frozen_screens: f64,
}

impl Default for Parametrized {
    fn default() -> Self {
        Self {
            max_screens_per_second: 2.0,
            screens_to_max_speed: 0.5,
            min_screens_per_second: 0.0,
            frozen_screens: 0.0,
        }
    }
}

impl Parametrized {
    /// Set the maximum speed and the distance, in screens, at which it is
    /// reached. Both must be positive.
    pub fn set_max_speed(&mut self, max_screens_per_second: f64, screens_to_max_speed: f64) -> PixcamResult<()> {
        ensure(
            max_screens_per_second > 0.0,
            format!("max screens per second must be > 0, got {max_screens_per_second}"),
        )?;
        ensure(
            screens_to_max_speed > 0.0,
            format!("screens to max speed must be > 0, got {screens_to_max_speed}"),
        )?;
        self.max_screens_per_second = max_screens_per_second;
        self.screens_to_max_speed = screens_to_max_speed;
        Ok(())
    }

    pub fn set_instant_tracking_below(&mut self, screens_per_second: f64) -> PixcamResult<()> {
        ensure(
            screens_per_second >= 0.0,
            format!("instant tracking speed can't be negative, got {screens_per_second}"),
        )?;
        self.min_screens_per_second = screens_per_second;
        Ok(())
    }

    pub fn set_frozen_tracking_below(&mut self, screens: f64) -> PixcamResult<()> {
        ensure(
            screens >= 0.0,
            format!("frozen tracking distance can't be negative, got {screens}"),
        )?;
        self.frozen_screens = screens;
        Ok(())
    }

    fn update_component(&self, current: f64, target: f64, screen: f64, zoom: f64, delta: f64) -> f64 {
        let mut distance = target - current;
        let zoomed_screen = screen / zoom;

        let frozen_distance = self.frozen_screens * zoomed_screen;
        if distance.abs() <= frozen_distance {
            return 0.0;
        }
        distance -= frozen_distance.copysign(distance);

        let t = t_at(distance.abs() * zoom, 0.0, self.screens_to_max_speed * zoomed_screen);
        let norm_speed = lerp(self.min_screens_per_second, self.max_screens_per_second, t);
        let change = norm_speed * zoomed_screen * delta;

        if distance >= 0.0 {
            distance.min(change)
        } else {
            distance.max(-change)
        }
    }
}

impl Tracker for Parametrized {
    fn update(&mut self, env: &Environment, current: Point2D, target: Point2D, _: Point2D) -> Point2D {
        let delta = env.update_delta();
        Point2D::new(
            self.update_component(current.x, target.x, env.width(), env.zoom, delta),
            self.update_component(current.y, target.y, env.height(), env.zoom, delta),
        )
    }
}
