use pixcam_common::{Point2D, PixcamResult};

use super::{within, Tracker};
use crate::env::Environment;
use crate::spring::Spring;

/// Spring-driven tracking in resolution-normalized space.
#[derive(Debug, Clone)]
pub struct SpringTracker {
    spring: Spring,
    speed: Point2D,
}

impl Default for SpringTracker {
    fn default() -> Self {
        Self {
            spring: Spring::preset(0.55, 4.5),
            speed: Point2D::ZERO,
        }
    }
}

impl SpringTracker {
    pub fn new(damping: f64, frequency: f64) -> PixcamResult<Self> {
        Ok(Self {
            spring: Spring::new(damping, frequency)?,
            speed: Point2D::ZERO,
        })
    }

    pub fn set_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        self.spring.set_parameters(damping, frequency)
    }
}

impl Tracker for SpringTracker {
    fn update(&mut self, env: &Environment, current: Point2D, target: Point2D, _: Point2D) -> Point2D {
        if within(current, target, 0.001) {
            self.speed = Point2D::ZERO;
            return target - current;
        }

        let (w, h) = (env.width(), env.height());
        let ups = env.updates_per_second;
        let (new_x, speed_x) = self.spring.update(ups, current.x / w, target.x / w, self.speed.x);
        let (new_y, speed_y) = self.spring.update(ups, current.y / h, target.y / h, self.speed.y);
        self.speed = Point2D::new(speed_x, speed_y);

        Point2D::new(
            (new_x * w - current.x) * env.zoom,
            (new_y * h - current.y) * env.zoom,
        )
    }
}
