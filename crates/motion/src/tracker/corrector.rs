use pixcam_common::{ensure, Point2D, PixcamResult};

use crate::env::Environment;
use crate::spring::Spring;

/// Catch-up speed controller used by [`CatchUpTracker`](super::CatchUpTracker).
///
/// Speeds are in screens per second, relative to the logical resolution.
pub trait CatchUpCorrector {
    /// Adjust the catch-up speed towards closing `error` (target minus
    /// current, in logical pixels). A zero error decelerates to rest.
    fn correct(&mut self, env: &Environment, error: Point2D);

    /// Current catch-up speed.
    fn speed(&self) -> Point2D;
}

/// Bounded-acceleration corrector.
///
/// Accelerates while the stopping distance at the current speed is
/// shorter than the remaining error, and decelerates otherwise.
#[derive(Debug, Clone)]
pub struct Corrector {
    acceleration: f64,
    speed: Point2D,
}

impl Default for Corrector {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            speed: Point2D::ZERO,
        }
    }
}

impl Corrector {
    /// Set the acceleration in screens per second squared. Reasonable
    /// values are within `[0.05, 0.5]`.
    pub fn set_acceleration(&mut self, acceleration: f64) -> PixcamResult<()> {
        ensure(
            acceleration.is_finite() && acceleration > 0.0,
            format!("catch-up acceleration must be a strictly positive number, got {acceleration}"),
        )?;
        self.acceleration = acceleration;
        Ok(())
    }

    fn correct_axis(&self, speed: f64, error: f64, speed_change: f64, margin: f64) -> f64 {
        let predicted = speed * speed / (2.0 * self.acceleration);
        let target = error.abs();

        if error == 0.0 {
            return if speed > 0.0 && predicted >= margin {
                speed - speed_change
            } else if speed < 0.0 && predicted >= margin {
                speed + speed_change
            } else {
                0.0
            };
        }

        // mirror leftwards motion so the logic below always moves right
        let dir = if error < 0.0 { -1.0 } else { 1.0 };
        let speed = speed * dir;
        let corrected = if speed < 0.0 {
            speed + speed_change
        } else if predicted < target - margin {
            speed + speed_change
        } else if predicted > target {
            speed - speed_change
        } else if speed <= speed_change + 0.0005 {
            0.0
        } else {
            speed
        };
        corrected * dir
    }
}

impl CatchUpCorrector for Corrector {
    fn correct(&mut self, env: &Environment, error: Point2D) {
        let speed_change = self.acceleration * env.update_delta();
        let margin = speed_change * speed_change / (2.0 * self.acceleration);
        self.speed = Point2D::new(
            self.correct_axis(self.speed.x, error.x / env.width(), speed_change, margin),
            self.correct_axis(self.speed.y, error.y / env.height(), speed_change, margin),
        );
    }

    fn speed(&self) -> Point2D {
        self.speed
    }
}

/// Spring-driven corrector.
#[derive(Debug, Clone)]
pub struct SpringCorrector {
    spring: Spring,
    speed: Point2D,
}

impl Default for SpringCorrector {
    fn default() -> Self {
        Self {
            spring: Spring::preset(0.9, 1.75),
            speed: Point2D::ZERO,
        }
    }
}

impl SpringCorrector {
    pub fn set_parameters(&mut self, damping: f64, frequency: f64) -> PixcamResult<()> {
        self.spring.set_parameters(damping, frequency)
    }
}

impl CatchUpCorrector for SpringCorrector {
    fn correct(&mut self, env: &Environment, error: Point2D) {
        let ups = env.updates_per_second;
        let rest = 0.12 * env.update_delta();
        let (_, mut speed_x) = self.spring.update(ups, 0.0, error.x / env.width(), self.speed.x);
        let (_, mut speed_y) = self.spring.update(ups, 0.0, error.y / env.height(), self.speed.y);
        if speed_x.abs() < rest {
            speed_x = 0.0;
        }
        if speed_y.abs() < rest {
            speed_y = 0.0;
        }
        self.speed = Point2D::new(speed_x, speed_y);
    }

    fn speed(&self) -> Point2D {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrector_accelerates_then_brakes() {
        let env = Environment::new(320, 180);
        let mut corrector = Corrector::default();
        let step = 0.2 / 60.0;

        corrector.correct(&env, Point2D::new(160.0, -90.0));
        assert!((corrector.speed().x - step).abs() < 1e-12);
        assert!((corrector.speed().y + step).abs() < 1e-12);

        for _ in 0..10 {
            corrector.correct(&env, Point2D::new(160.0, -90.0));
        }
        let fast = corrector.speed().x;

        // almost no error left: the stopping distance exceeds it
        corrector.correct(&env, Point2D::new(0.01, 0.0));
        assert!(corrector.speed().x < fast);
    }

    #[test]
    fn test_corrector_zero_error_comes_to_rest() {
        let env = Environment::new(320, 180);
        let mut corrector = Corrector::default();
        for _ in 0..30 {
            corrector.correct(&env, Point2D::new(320.0, 0.0));
        }
        assert!(corrector.speed().x > 0.0);
        for _ in 0..120 {
            corrector.correct(&env, Point2D::ZERO);
        }
        assert_eq!(corrector.speed(), Point2D::ZERO);
    }

    #[test]
    fn test_corrector_turns_around() {
        let env = Environment::new(320, 180);
        let mut corrector = Corrector::default();
        for _ in 0..5 {
            corrector.correct(&env, Point2D::new(320.0, 0.0));
        }
        let before = corrector.speed().x;
        corrector.correct(&env, Point2D::new(-320.0, 0.0));
        assert!(corrector.speed().x < before);
    }

    #[test]
    fn test_spring_corrector_rests_below_threshold() {
        let env = Environment::new(320, 180);
        let mut corrector = SpringCorrector::default();
        corrector.correct(&env, Point2D::new(0.001, 0.0));
        assert_eq!(corrector.speed(), Point2D::ZERO);

        corrector.correct(&env, Point2D::new(320.0, 0.0));
        assert!(corrector.speed().x > 0.0);
    }

    #[test]
    fn test_rejects_invalid_acceleration() {
        let env = Environment::new(320, 180);
        let mut corrector = Corrector::default();
        for acceleration in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(corrector.set_acceleration(acceleration).is_err(), "accepted {acceleration}");
        }
        corrector.correct(&env, Point2D::new(160.0, 0.0));
        assert!((corrector.speed().x - 0.2 / 60.0).abs() < 1e-12);

        let mut quick = Corrector::default();
        quick.set_acceleration(0.5).unwrap();
        quick.correct(&env, Point2D::new(160.0, 0.0));
        assert!((quick.speed().x - 0.5 / 60.0).abs() < 1e-12);
    }
}
