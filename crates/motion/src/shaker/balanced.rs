use std::f64::consts::{PI, TAU};

use pixcam_common::{Point2D, PixcamResult};

use super::{finish_offsets, validate_compensation, validate_positive, Shaker};
use crate::env::Environment;
use crate::interp::lerp;
use crate::random::{from_entropy, BoxedRandom, RandomSource};

/// Cubic bézier loops that start and end at the origin, with control
/// points rotating in a consistent direction.
///
/// The default feels like a dampened earthquake; a motion scale of 0.02
/// with a travel time of 1.4 gives a soft ship-like sway.
pub struct Balanced {
    rng: BoxedRandom,
    rads: f64,
    control1: Point2D,
    control2: Point2D,
    elapsed: f64,
    pub(super) travel_time: f64,
    pub(super) motion_scale: f64,
    zoom_compensation: f64,
}

impl Default for Balanced {
    fn default() -> Self {
        Self::new(from_entropy())
    }
}

impl Balanced {
    pub fn new(rng: BoxedRandom) -> Self {
        let mut shaker = Self {
            rng,
            rads: 0.0,
            control1: Point2D::ZERO,
            control2: Point2D::ZERO,
            elapsed: 0.0,
            travel_time: 0.05,
            motion_scale: 0.01,
            zoom_compensation: 0.0,
        };
        shaker.restart();
        shaker
    }

    /// Scale applied to the `[-0.5, 0.5]` motion space, relative to the
    /// logical resolution (default 0.01).
    pub fn set_motion_scale(&mut self, scale: f64) -> PixcamResult<()> {
        validate_positive("motion scale", scale)?;
        self.motion_scale = scale;
        Ok(())
    }

    /// Seconds each loop takes (default 0.05).
    pub fn set_travel_time(&mut self, secs: f64) -> PixcamResult<()> {
        validate_positive("travel time", secs)?;
        self.travel_time = secs;
        Ok(())
    }

    pub fn set_zoom_compensation(&mut self, compensation: f64) -> PixcamResult<()> {
        validate_compensation(compensation)?;
        self.zoom_compensation = compensation;
        Ok(())
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
        self.rads = self.rng.next_f64() * TAU;
        self.reroll_control_points();
    }

    fn reroll_control_points(&mut self) {
        let length = 0.8 + self.rng.next_f64() * 0.2;
        let (sin, cos) = self.rads.sin_cos();
        self.control1 = Point2D::new(cos * length, sin * length);

        // the exit direction is also the next entry direction, rotated
        self.rads = wrap_angle(self.rads + PI * self.rng.next_f64() * 0.3333);
        let (sin, cos) = self.rads.sin_cos();
        self.control2 = Point2D::new(cos * length, sin * length);
        self.rads = wrap_angle(self.rads + PI);
    }

    fn curve_point(&self, t: f64) -> Point2D {
        let mix = |a: Point2D, b: Point2D| Point2D::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t));
        let (c1, c2) = (self.control1, self.control2);
        let start = mix(Point2D::ZERO, c1);
        let middle = mix(c1, c2);
        let end = mix(c2, Point2D::ZERO);
        mix(mix(start, middle), mix(middle, end))
    }
}

fn wrap_angle(rads: f64) -> f64 {
    if rads >= TAU {
        rads - TAU
    } else {
        rads
    }
}

impl Shaker for Balanced {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        if level == 0.0 {
            self.restart();
            return Point2D::ZERO;
        }

        let point = self.curve_point(self.elapsed / self.travel_time);
        self.elapsed += env.update_delta();
        if self.elapsed >= self.travel_time {
            self.reroll_control_points();
            self.elapsed %= self.travel_time;
        }

        let offsets = Point2D::new(
            point.x * env.width() * self.motion_scale,
            point.y * env.height() * self.motion_scale,
        );
        finish_offsets(env, offsets, self.zoom_compensation, level)
    }
}
