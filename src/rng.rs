//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a
//! run. The engine owns one instance; every random decision (mating scope,
//! parent draws, visiting order, replacement order, weight sampling and the
//! variation operators) is drawn from it, so seeding it reproduces a run.
//!
//! ## Example
//!
//! ```rust
//! use moead::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let p = rng.gen_probability();
//! assert!((0.0..1.0).contains(&p));
//!
//! let mut order: Vec<usize> = (0..10).collect();
//! rng.shuffle(&mut order);
//! assert_eq!(order.len(), 10);
//! ```

use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniform number in `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a uniform index in `[0, upper)`.
    ///
    /// `upper` must be positive.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Shuffles a slice in place, producing a uniformly random permutation.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Draws `amount` elements without replacement.
    ///
    /// Returns fewer elements if `items` is shorter than `amount`.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect()
    }

    /// Returns a uniformly random permutation of `0..size`.
    pub fn permutation(&mut self, size: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..size).collect();
        self.shuffle(&mut perm);
        perm
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
