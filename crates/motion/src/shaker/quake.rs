use pixcam_common::{ensure, Point2D, PixcamResult};

use super::{finish_offsets, validate_compensation, validate_positive, Shaker};
use crate::env::Environment;
use crate::interp::{lerp, t_at};
use crate::random::{from_entropy, BoxedRandom, RandomSource};

/// Independent oscillation on each axis with irregular speeds and travel
/// distances: a predictable, smooth pattern with unpredictable variance.
pub struct Quake {
    rng: BoxedRandom,
    x: Oscillation,
    y: Oscillation,
    min_speed: f64,
    max_speed: f64,
    motion_scale: f64,
    zoom_compensation: f64,
}

/// Motion of a single axis within the `[-0.5, 0.5]` space.
#[derive(Debug, Clone, Copy, Default)]
struct Oscillation {
    value: f64,
    from: f64,
    towards: f64,
    speed_start: f64,
    speed_end: f64,
}

impl Default for Quake {
    fn default() -> Self {
        Self::new(from_entropy())
    }
}

impl Quake {
    pub fn new(rng: BoxedRandom) -> Self {
        let mut shaker = Self {
            rng,
            x: Oscillation::default(),
            y: Oscillation::default(),
            min_speed: 5.0,
            max_speed: 5.0 * 4.6,
            motion_scale: 0.0225,
            zoom_compensation: 0.0,
        };
        shaker.restart();
        shaker
    }

    /// Each axis changes speed randomly within this range while going
    /// from side to side (default 5.0 to 23.0).
    pub fn set_speed_range(&mut self, min_speed: f64, max_speed: f64) -> PixcamResult<()> {
        validate_positive("min speed", min_speed)?;
        ensure(
            max_speed >= min_speed,
            format!("max speed ({max_speed}) must be >= min speed ({min_speed})"),
        )?;
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        Ok(())
    }

    /// Default 0.0225.
    pub fn set_motion_scale(&mut self, scale: f64) -> PixcamResult<()> {
        validate_positive("motion scale", scale)?;
        self.motion_scale = scale;
        Ok(())
    }

    pub fn set_zoom_compensation(&mut self, compensation: f64) -> PixcamResult<()> {
        validate_compensation(compensation)?;
        self.zoom_compensation = compensation;
        Ok(())
    }

    fn restart(&mut self) {
        let speeds = (self.min_speed, self.max_speed);
        for axis in [&mut self.x, &mut self.y] {
            *axis = Oscillation::default();
            axis.reroll(self.rng.as_mut(), speeds);
        }
    }
}

impl Oscillation {
    fn advance(&mut self, rng: &mut dyn RandomSource, speeds: (f64, f64), delta: f64) {
        let t = t_at(self.value, self.from, self.towards);
        self.value += lerp(self.speed_start, self.speed_end, t) * delta;
        if t_at(self.value, self.from, self.towards) >= 1.0 {
            self.from = self.value;
            self.reroll(rng, speeds);
        }
    }

    /// Pick a new target on the opposite side of the origin and the
    /// speeds to travel there.
    fn reroll(&mut self, rng: &mut dyn RandomSource, (min_speed, max_speed): (f64, f64)) {
        let go_negative = self.value > 0.0 || (self.value == 0.0 && rng.next_f64() < 0.5);
        let dir = if go_negative { -1.0 } else { 1.0 };

        let target = dir * (0.05 + rng.next_f64() * 0.45);
        let speed_start = dir * self.speed_end.abs().max(min_speed);
        let speed_end = dir * (min_speed + rng.next_f64() * (max_speed - min_speed));

        self.towards = target;
        self.speed_start = speed_start;
        self.speed_end = speed_start + (speed_end - speed_start) * (target - self.value).abs();
    }
}

impl Shaker for Quake {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        if level == 0.0 {
            self.restart();
            return Point2D::ZERO;
        }

        let speeds = (self.min_speed, self.max_speed);
        let delta = env.update_delta();
        self.x.advance(self.rng.as_mut(), speeds, delta);
        self.y.advance(self.rng.as_mut(), speeds, delta);

        let offsets = Point2D::new(
            self.x.value * env.width() * self.motion_scale,
            self.y.value * env.height() * self.motion_scale,
        );
        finish_offsets(env, offsets, self.zoom_compensation, level)
    }
}
