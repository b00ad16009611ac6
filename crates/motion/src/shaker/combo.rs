use pixcam_common::Point2D;

use super::{Balanced, Random, Shaker, ShakePace};
use crate::env::Environment;
use crate::random::{from_entropy, BoxedRandom};

/// Sum of two independently configured shakers.
///
/// Any pair works, including boxed ones. The built-in preset from
/// [`Combo::balanced_random`] layers slow [`Balanced`] loops under fast
/// [`Random`] jitter.
pub struct Combo<A = Balanced, B = Random> {
    first: A,
    second: B,
}

impl<A: Shaker, B: Shaker> Combo<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl Combo {
    /// Balanced loops (scale 0.014, 0.26s) plus random jitter (0.03s).
    pub fn balanced_random(balanced_rng: BoxedRandom, random_rng: BoxedRandom) -> Self {
        let mut balanced = Balanced::new(balanced_rng);
        balanced.motion_scale = 0.014;
        balanced.travel_time = 0.26;
        let mut random = Random::new(random_rng);
        random.set_max_motion_range(0.02);
        random.pace = ShakePace::Seconds(0.03);
        Self::new(balanced, random)
    }
}

impl Default for Combo {
    fn default() -> Self {
        Self::balanced_random(from_entropy(), from_entropy())
    }
}

impl<A: Shaker, B: Shaker> Shaker for Combo<A, B> {
    fn shake_offsets(&mut self, env: &Environment, level: f64) -> Point2D {
        self.first.shake_offsets(env, level) + self.second.shake_offsets(env, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;
    use crate::shaker::{build_shaker, Quake, SpringShaker};
    use pixcam_common::ShakerKind;

    #[test]
    fn test_preset_combines_balanced_and_random() {
        let env = Environment::new(320, 180);
        let mut combo = Combo::balanced_random(seeded(1), seeded(2));
        let mut balanced = Balanced::new(seeded(1));
        balanced.set_motion_scale(0.014).unwrap();
        balanced.set_travel_time(0.26).unwrap();
        let mut random = Random::new(seeded(2));
        random.set_travel_time(0.03).unwrap();

        for _ in 0..30 {
            let expected = balanced.shake_offsets(&env, 1.0) + random.shake_offsets(&env, 1.0);
            assert_eq!(combo.shake_offsets(&env, 1.0), expected);
        }
    }

    #[test]
    fn test_any_pair_of_shakers() {
        let env = Environment::new(320, 180);
        let mut combo = Combo::new(Quake::new(seeded(4)), SpringShaker::new(seeded(5)));
        let mut quake = Quake::new(seeded(4));
        let mut spring = SpringShaker::new(seeded(5));
        for _ in 0..60 {
            let expected = quake.shake_offsets(&env, 0.7) + spring.shake_offsets(&env, 0.7);
            assert_eq!(combo.shake_offsets(&env, 0.7), expected);
        }
        assert_eq!(combo.shake_offsets(&env, 0.0), Point2D::ZERO);
    }

    #[test]
    fn test_boxed_members() {
        let env = Environment::new(320, 180);
        let mut combo = Combo::new(
            build_shaker(ShakerKind::Balanced, Some(6)),
            build_shaker(ShakerKind::Quake, Some(7)),
        );
        let mut balanced = build_shaker(ShakerKind::Balanced, Some(6));
        let mut quake = build_shaker(ShakerKind::Quake, Some(7));
        for _ in 0..30 {
            let expected = balanced.shake_offsets(&env, 1.0) + quake.shake_offsets(&env, 1.0);
            assert_eq!(combo.shake_offsets(&env, 1.0), expected);
        }
    }

    #[test]
    fn test_members_stay_configurable() {
        let mut combo = Combo::balanced_random(seeded(1), seeded(2));
        assert_eq!(combo.second().pace(), ShakePace::Seconds(0.03));
        combo.second_mut().set_point_to_point_ticks(5).unwrap();
        assert!(combo.first_mut().set_travel_time(0.0).is_err());

        let (_, random) = combo.into_parts();
        assert_eq!(random.pace(), ShakePace::Ticks(5));
    }
}
