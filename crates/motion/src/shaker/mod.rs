//! Screen shakers.
//!
//! Given a level that goes linearly from 0 to 1 during the fade in and
//! back to 0 during the fade out, a shaker returns the camera offsets in
//! logical pixels. The provided shakers simulate the motion within a
//! `[-0.5, 0.5]` space and scale it relative to the logical resolution.
//!
//! Stateful shakers reset their wandering state when called with level 0;
//! the camera makes that call once after a shake finishes and ignores the
//! returned offsets.

mod balanced;
mod combo;
mod quake;
mod random;
mod spring;

pub use balanced::Balanced;
pub use combo::Combo;
pub use quake::Quake;
pub use random::{Random, ShakePace};
pub use spring::SpringShaker;

use pixcam_common::{ensure, Point2D, PixcamResult, ShakerKind};

use crate::env::Environment;
use crate::random::{from_entropy, seeded, BoxedRandom};

/// Computes camera shake offsets.
pub trait Shaker {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D;
}

/// Owned shaker as stored by the camera.
pub type BoxedShaker = Box<dyn Shaker>;

impl<S: Shaker + ?Sized> Shaker for Box<S> {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        (**self).shake_offsets(env, level)
    }
}

/// Build a shaker with default parameters for the given kind. Without a
/// seed the random source is seeded from entropy.
pub fn build_shaker(kind: ShakerKind, seed: Option<u64>) -> BoxedShaker {
    tracing::debug!(?kind, ?seed, "Building default shaker");
    let rng = random_source(seed);
    match kind {
        ShakerKind::Random => Box::new(Random::new(rng)),
        ShakerKind::Balanced => Box::new(Balanced::new(rng)),
        ShakerKind::Quake => Box::new(Quake::new(rng)),
        ShakerKind::Spring => Box::new(SpringShaker::new(rng)),
        ShakerKind::Combo => Box::new(Combo::balanced_random(
            rng,
            random_source(seed.map(|s| s.wrapping_add(1))),
        )),
    }
}

fn random_source(seed: Option<u64>) -> BoxedRandom {
    seed.map(seeded).unwrap_or_else(from_entropy)
}

/// Divide `offsets` by the zoom blended with `compensation`, then scale
/// them linearly by `level`.
pub(crate) fn finish_offsets(env: &Environment, mut offsets: Point2D, compensation: f64, level: f64) -> Point2D {
    if compensation != 0.0 {
        let zoom = env.compensated_zoom(compensation);
        offsets.x /= zoom;
        offsets.y /= zoom;
    }
    if level != 1.0 {
        offsets.x *= level;
        offsets.y *= level;
    }
    offsets
}

pub(crate) fn validate_compensation(compensation: f64) -> PixcamResult<()> {
    ensure(
        (0.0..=1.0).contains(&compensation),
        format!("zoom compensation must be in [0, 1], got {compensation}"),
    )
}

pub(crate) fn validate_positive(name: &str, value: f64) -> PixcamResult<()> {
    ensure(value > 0.0, format!("{name} must be strictly positive, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    const ALL_KINDS: [ShakerKind; 5] = [
        ShakerKind::Random,
        ShakerKind::Balanced,
        ShakerKind::Quake,
        ShakerKind::Spring,
        ShakerKind::Combo,
    ];

    fn trajectory(shaker: &mut dyn Shaker, env: &Environment, updates: usize) -> Vec<Point2D> {
        (0..updates).map(|_| shaker.shake_offsets(env, 1.0)).collect()
    }

    #[test]
    fn test_seeded_shakers_are_deterministic() {
        let env = Environment::new(320, 180);
        for kind in ALL_KINDS {
            let a = trajectory(build_shaker(kind, Some(99)).as_mut(), &env, 240);
            let b = trajectory(build_shaker(kind, Some(99)).as_mut(), &env, 240);
            assert_eq!(a, b, "{kind:?}");
            assert!(a.iter().all(Point2D::is_finite));
            assert!(a.iter().any(|p| !p.is_zero()), "{kind:?} never moved");
        }
    }

    #[test]
    fn test_level_zero_resets_to_origin() {
        let env = Environment::new(320, 180);
        for kind in ALL_KINDS {
            let mut shaker = build_shaker(kind, Some(5));
            trajectory(shaker.as_mut(), &env, 37);
            assert_eq!(shaker.shake_offsets(&env, 0.0), Point2D::ZERO, "{kind:?}");
        }
    }

    #[test]
    fn test_offsets_stay_small() {
        let env = Environment::new(320, 180);
        for kind in ALL_KINDS {
            let mut shaker = build_shaker(kind, Some(1234));
            for offset in trajectory(shaker.as_mut(), &env, 2000) {
                assert!(offset.x.abs() < 16.0 && offset.y.abs() < 16.0, "{kind:?}: {offset:?}");
            }
        }
    }

    /// Offsets at the same instants: every update at 60 against every
    /// other update at 120, with the same ticks per second.
    fn rate_pairs(mut slow: BoxedShaker, mut fast: BoxedShaker, secs: usize) -> Vec<(Point2D, Point2D)> {
        let slow_env = Environment::new(320, 180).with_ticks_per_update(2);
        let fast_env = Environment::new(320, 180).with_updates_per_second(120);
        let slow = trajectory(slow.as_mut(), &slow_env, 60 * secs);
        let fast = trajectory(fast.as_mut(), &fast_env, 120 * secs);
        slow.into_iter().zip(fast.into_iter().step_by(2)).collect()
    }

    #[test]
    fn test_time_driven_shakers_are_rate_independent() {
        let random = |secs: f64| {
            let mut shaker = Random::new(seeded(31));
            shaker.set_travel_time(secs).unwrap();
            Box::new(shaker) as BoxedShaker
        };
        let cases: [(&str, BoxedShaker, BoxedShaker); 5] = [
            ("balanced", build_shaker(ShakerKind::Balanced, Some(31)), build_shaker(ShakerKind::Balanced, Some(31))),
            ("combo", build_shaker(ShakerKind::Combo, Some(31)), build_shaker(ShakerKind::Combo, Some(31))),
            ("random 0.05s", random(0.05), random(0.05)),
            ("random 0.03s", random(0.03), random(0.03)),
            ("random 0.2s", random(0.2), random(0.2)),
        ];
        for (name, slow, fast) in cases {
            for (i, (a, b)) in rate_pairs(slow, fast, 3).into_iter().enumerate() {
                assert!(a.distance_to(&b) < 1e-9, "{name} diverged at update {i}: {a:?} vs {b:?}");
            }
        }
    }

    /// Mean absolute offset and number of sign changes over `secs`
    /// seconds of full shaking, summed over a few seeds.
    fn shake_summary(kind: ShakerKind, env: &Environment, secs: u32) -> (f64, u32) {
        let (mut total, mut samples, mut crossings) = (0.0, 0u32, 0u32);
        for seed in 0..8 {
            let mut shaker = build_shaker(kind, Some(seed));
            let updates = (env.updates_per_second * secs) as usize;
            let offsets = trajectory(shaker.as_mut(), env, updates);
            for pair in offsets.windows(2) {
                crossings += u32::from((pair[0].x < 0.0) != (pair[1].x < 0.0));
                crossings += u32::from((pair[0].y < 0.0) != (pair[1].y < 0.0));
            }
            for offset in offsets {
                total += offset.x.abs() + offset.y.abs();
                samples += 1;
            }
        }
        (total / f64::from(samples), crossings)
    }

    #[test]
    fn test_integrating_shakers_keep_their_character_across_rates() {
        let slow_env = Environment::new(320, 180);
        let fast_env = slow_env.with_updates_per_second(120);
        // Quake integrates explicitly and swings a little wider at low rates
        for (kind, tolerance) in [(ShakerKind::Quake, 0.3), (ShakerKind::Spring, 0.2)] {
            let (slow_amplitude, slow_crossings) = shake_summary(kind, &slow_env, 10);
            let (fast_amplitude, fast_crossings) = shake_summary(kind, &fast_env, 10);
            let amplitude_ratio = slow_amplitude / fast_amplitude;
            let crossing_ratio = f64::from(slow_crossings) / f64::from(fast_crossings);
            assert!((amplitude_ratio - 1.0).abs() < tolerance, "{kind:?} amplitude ratio {amplitude_ratio}");
            assert!((crossing_ratio - 1.0).abs() < tolerance, "{kind:?} crossing ratio {crossing_ratio}");
        }
    }

    #[test]
    fn test_finish_offsets() {
        let env = Environment::new(320, 180).with_zoom(3.0);
        let offsets = Point2D::new(6.0, -3.0);
        assert_eq!(finish_offsets(&env, offsets, 0.0, 1.0), offsets);
        assert_eq!(finish_offsets(&env, offsets, 1.0, 1.0), Point2D::new(2.0, -1.0));
        assert_eq!(finish_offsets(&env, offsets, 0.5, 0.5), Point2D::new(1.5, -0.75));
    }
}
