use pixcam_common::{secs_to_ticks, Point2D, PixcamResult, TicksDuration};

use super::{validate_positive, Shaker};
use crate::env::Environment;
use crate::interp::{quad_in_out_interp, smoothstep};
use crate::random::{from_entropy, BoxedRandom, RandomSource};

const DEFAULT_MOTION_RANGE: f64 = 0.02;

/// How long the random shaker takes between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakePace {
    /// Fixed number of ticks.
    Ticks(TicksDuration),
    /// Seconds, converted to ticks at the current ticks per second.
    Seconds(f64),
}

impl ShakePace {
    fn ticks(self, env: &Environment) -> u64 {
        match self {
            ShakePace::Ticks(ticks) => u64::from(ticks),
            ShakePace::Seconds(secs) => u64::from(secs_to_ticks(secs, env.ticks_per_second())),
        }
    }
}

/// Quadratic in/out interpolation between random points.
pub struct Random {
    rng: BoxedRandom,
    from: Point2D,
    to: Point2D,
    ticks_elapsed: u64,
    pub(super) pace: ShakePace,
    motion_range: f64,
    zoom_compensated: bool,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(from_entropy())
    }
}

impl Random {
    pub fn new(rng: BoxedRandom) -> Self {
        let mut shaker = Self {
            rng,
            from: Point2D::ZERO,
            to: Point2D::ZERO,
            ticks_elapsed: 0,
            pace: ShakePace::Seconds(0.01),
            motion_range: DEFAULT_MOTION_RANGE,
            zoom_compensated: false,
        };
        shaker.roll_new_target();
        shaker
    }

    /// Maximum travel distance between points, as a ratio of the shortest
    /// resolution axis. Values <= 0 restore the default of 0.02.
    pub fn set_max_motion_range(&mut self, axis_ratio: f64) {
        self.motion_range = if axis_ratio > 0.0 {
            axis_ratio
        } else {
            DEFAULT_MOTION_RANGE
        };
    }

    /// Keep the same apparent magnitude regardless of the zoom level.
    pub fn set_zoom_compensated(&mut self, compensated: bool) {
        self.zoom_compensated = compensated;
    }

    /// Ticks from one point to the next. At 60 ticks per second,
    /// reasonable values are within `[3, 30]`.
    pub fn set_point_to_point_ticks(&mut self, ticks: TicksDuration) -> PixcamResult<()> {
        validate_positive("point to point ticks", f64::from(ticks))?;
        self.pace = ShakePace::Ticks(ticks);
        Ok(())
    }

    /// Seconds from one point to the next.
    pub fn set_travel_time(&mut self, secs: f64) -> PixcamResult<()> {
        validate_positive("travel time", secs)?;
        self.pace = ShakePace::Seconds(secs);
        Ok(())
    }

    pub fn pace(&self) -> ShakePace {
        self.pace
    }

    fn roll_new_target(&mut self) {
        self.from = self.to;
        self.to = Point2D::new(self.rng.next_f64() - 0.5, self.rng.next_f64() - 0.5);
    }
}

impl Shaker for Random {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        if level == 0.0 {
            self.to = Point2D::ZERO;
            self.roll_new_target();
            self.ticks_elapsed = 0;
            return Point2D::ZERO;
        }

        let ptp_ticks = self.pace.ticks(env);
        let t = self.ticks_elapsed as f64 / ptp_ticks as f64;
        let x = quad_in_out_interp(self.from.x, self.to.x, t);
        let y = quad_in_out_interp(self.from.y, self.to.y, t);
        self.ticks_elapsed += u64::from(env.ticks_per_update);
        if self.ticks_elapsed >= ptp_ticks {
            self.roll_new_target();
            self.ticks_elapsed %= ptp_ticks;
        }

        let mut axis_range = env.shortest_axis() * self.motion_range;
        if self.zoom_compensated {
            axis_range /= env.zoom;
        }
        let (x, y) = (x * axis_range, y * axis_range);
        if level == 1.0 {
            return Point2D::new(x, y);
        }
        Point2D::new(smoothstep(0.0, x, level), smoothstep(0.0, y, level))
    }
}
