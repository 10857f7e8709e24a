use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

/// Source of every stochastic decision taken during a run.
///
/// Only `rng` is required; the remaining methods are defaults built on top of it
/// so test doubles can override exactly the draw they want to control.
pub trait RandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore;

    /// Returns `true` with probability `p`.
    fn gen_bool(&mut self, p: f64) -> bool {
        self.rng().random_bool(p)
    }

    /// Uniform probability in `[0, 1)`.
    fn gen_proability(&mut self) -> f64 {
        self.rng().random::<f64>()
    }

    /// Uniform integer in `[min, max)`.
    fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
        self.rng().random_range(min..max)
    }

    fn shuffle_vec_usize(&mut self, vector: &mut Vec<usize>) {
        vector.shuffle(self.rng());
    }
}

/// Seedable generator owned by the engine for a single run.
pub struct SearchRandomGenerator {
    rng: StdRng,
}

impl SearchRandomGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Seeds from `seed` or, when absent, from the thread-local entropy source.
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::new(seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64))
    }
}

impl RandomGenerator for SearchRandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// `RngCore` that always yields zeros. Meant as the backing store of fake generators.
pub struct TestDummyRng;

impl RngCore for TestDummyRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

/// Generator for code paths that must not depend on randomness.
pub struct NoopRandomGenerator {
    dummy: TestDummyRng,
}

impl NoopRandomGenerator {
    pub fn new() -> Self {
        Self {
            dummy: TestDummyRng,
        }
    }
}

impl Default for NoopRandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGenerator for NoopRandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.dummy
    }
}
