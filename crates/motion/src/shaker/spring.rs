use pixcam_common::{Point2D, PixcamResult};

use super::{finish_offsets, validate_compensation, Shaker};
use crate::env::Environment;
use crate::random::{from_entropy, BoxedRandom, RandomSource};
use crate::spring::Spring;

const FALLBACK_MOTION_RANGE: f64 = 0.03;

/// Spring pursuit of random targets. The defaults feel like driving
/// through a bad road.
pub struct SpringShaker {
    rng: BoxedRandom,
    spring: Spring,
    position: Point2D,
    speed: Point2D,
    target: Point2D,
    x_range: f64,
    y_range: f64,
    zoom_compensation: f64,
}

impl Default for SpringShaker {
    fn default() -> Self {
        Self::new(from_entropy())
    }
}

impl SpringShaker {
    pub fn new(rng: BoxedRandom) -> Self {
        let mut shaker = Self {
            rng,
            spring: Spring::preset(0.1, 40.0),
            position: Point2D::ZERO,
            speed: Point2D::ZERO,
            target: Point2D::ZERO,
            x_range: 0.02,
            y_range: 0.01,
            zoom_compensation: 0.0,
        };
        shaker.reroll_target();
        shaker
    }

    /// Per-axis motion ranges relative to the logical resolution. Values
    /// <= 0 fall back to 0.03.
    pub fn set_max_motion_range(&mut self, x_ratio: f64, y_ratio: f64) {
        let or_fallback = |ratio: f64| if ratio > 0.0 { ratio } else { FALLBACK_MOTION_RANGE };
        self.x_range = or_fallback(x_ratio);
        self.y_range = or_fallback(y_ratio);
    }

    pub fn set_zoom_compensation(&mut self, compensation: f64) -> PixcamResult<()> {
        validate_compensation(compensation)?;
        self.zoom_compensation = compensation;
        Ok(())
    }

    pub fn set_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        self.spring.set_parameters(damping, frequency)
    }

    fn reroll_target(&mut self) {
        self.target = Point2D::new(self.rng.next_f64() - 0.5, self.rng.next_f64() - 0.5);
    }
}

impl Shaker for SpringShaker {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        if level == 0.0 {
            self.position = Point2D::ZERO;
            self.speed = Point2D::ZERO;
            self.reroll_target();
            return Point2D::ZERO;
        }

        let ups = env.updates_per_second;
        let (x, speed_x) = self.spring.update(ups, self.position.x, self.target.x, self.speed.x);
        let (y, speed_y) = self.spring.update(ups, self.position.y, self.target.y, self.speed.y);
        self.position = Point2D::new(x, y);
        self.speed = Point2D::new(speed_x, speed_y);
        if (self.target.x - x).abs() < 0.08 && (self.target.y - y).abs() < 0.08 {
            self.reroll_target();
        }

        let offsets = Point2D::new(x * env.width() * self.x_range, y * env.height() * self.y_range);
        finish_offsets(env, offsets, self.zoom_compensation, level)
    }
}
