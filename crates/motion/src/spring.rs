//! Damped harmonic oscillator stepped in closed form.
//!
//! Each update applies the exact one-step state transition of the
//! oscillator, so results only depend on elapsed time and not on how it is
//! split into updates. The transition coefficients depend on the update
//! delta and are recomputed lazily when the parameters or the update rate
//! change.

use pixcam_common::{ensure, PixcamResult};

/// Damping at or above which the critically damped form is used.
const CRITICAL_DAMPING: f64 = 0.999;

/// Lowest accepted frequency.
pub const MIN_FREQUENCY: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct Spring {
    damping: f64,
    frequency: f64,
    cached_ups: Option<u32>,
    coefficients: Coefficients,
}

/// Transition coefficients for `(current - target, speed)`.
#[derive(Debug, Clone, Copy, Default)]
struct Coefficients {
    pos_pos: f64,
    pos_vel: f64,
    vel_pos: f64,
    vel_vel: f64,
}

impl Spring {
    /// Create a spring. `damping` must be in `[0, 1]` and `frequency` at
    /// least 0.001.
    pub fn new(damping: f64, frequency: f64) -> PixcamResult<Self> {
        validate(damping, frequency)?;
        Ok(Self {
            damping,
            frequency,
            cached_ups: None,
            coefficients: Coefficients::default(),
        })
    }

    /// Spring from built-in constants known to be valid.
    pub(crate) fn preset(damping: f64, frequency: f64) -> Self {
        debug_assert!(validate(damping, frequency).is_ok());
        Self {
            damping,
            frequency,
            cached_ups: None,
            coefficients: Coefficients::default(),
        }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        validate(damping, frequency)?;
        if damping != self.damping || frequency != self.frequency {
            self.damping = damping;
            self.frequency = frequency;
            self.cached_ups = None;
        }
        Ok(())
    }

    /// Advance one update at `updates_per_second` and return the new
    /// position and speed.
    pub fn update(&mut self, updates_per_second: u32, current: f64, target: f64, speed: f64) -> (f64, f64) {
        if self.cached_ups != Some(updates_per_second) {
            self.coefficients = self.compute_coefficients(updates_per_second);
            self.cached_ups = Some(updates_per_second);
        }

        let c = self.coefficients;
        let offset = current - target;
        let position = offset * c.pos_pos + speed * c.pos_vel + target;
        let speed = offset * c.vel_pos + speed * c.vel_vel;
        (position, speed)
    }

    fn compute_coefficients(&self, updates_per_second: u32) -> Coefficients {
        let delta = 1.0 / f64::from(updates_per_second);
        let omega = self.frequency;

        if self.damping >= CRITICAL_DAMPING {
            let exp = (-omega * delta).exp();
            let pos_vel = delta * exp;
            let expr = pos_vel * omega;
            return Coefficients {
                pos_pos: expr + exp,
                pos_vel,
                vel_pos: -omega * expr,
                vel_vel: -expr + exp,
            };
        }

        let zeta_omega = omega * self.damping;
        let alpha = omega * (1.0 - self.damping * self.damping).sqrt();
        let exp = (-zeta_omega * delta).exp();
        let sin_exp = (alpha * delta).sin() * exp;
        let cos_exp = (alpha * delta).cos() * exp;
        let expr = sin_exp * zeta_omega / alpha;
        Coefficients {
            pos_pos: cos_exp + expr,
            pos_vel: sin_exp / alpha,
            vel_pos: -sin_exp * alpha - zeta_omega * expr,
            vel_vel: cos_exp - expr,
        }
    }
}

fn validate(damping: f64, frequency: f64) -> PixcamResult<()> {
    ensure(
        (0.0..=1.0).contains(&damping),
        format!("spring damping must be in [0, 1], got {damping}"),
    )?;
    ensure(
        frequency >= MIN_FREQUENCY,
        format!("spring frequency must be >= {MIN_FREQUENCY}, got {frequency}"),
    )
}
