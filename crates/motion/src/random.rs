//! Random sources for shakers.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random values in `[0, 1)`.
///
/// Every `rand` generator implements it, so tests can plug in a seeded
/// generator or a scripted sequence.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Boxed random source owned by a shaker.
pub type BoxedRandom = Box<dyn RandomSource>;

/// Deterministic generator for the given seed.
pub fn seeded(seed: u64) -> BoxedRandom {
    Box::new(ChaCha8Rng::seed_from_u64(seed))
}

/// Generator seeded from the thread-local entropy source.
pub fn from_entropy() -> BoxedRandom {
    seeded(rand::rng().random())
}
