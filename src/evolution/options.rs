//! # MoeadOptions
//!
//! The `MoeadOptions` struct holds the configuration of a MOEA/D run: the
//! population size, the neighborhood size `T`, the mating probability
//! `delta`, the replacement cap `nr`, the evaluation budget and the random
//! seed.
//!
//! ## Example
//!
//! ```rust
//! use moead::evolution::options::MoeadOptions;
//!
//! // Population of 50, neighborhoods of 10, delta 0.9, nr 2, 200 generations
//! let custom_options = MoeadOptions::new(50, 10, 0.9, 2, 200);
//! assert_eq!(custom_options.evaluation_budget(), 10_000);
//!
//! // Defaults: 100 subproblems, T = 20, 100 generations
//! let default_options = MoeadOptions::default();
//! assert!(default_options.validate().is_ok());
//! ```
//!
//! ## Budget
//!
//! The run ends once the evaluation counter reaches the budget. With
//! `num_generations > 0` the budget is `num_generations * population_size`;
//! otherwise `max_evaluations` is used directly. At least one of the two must
//! be positive.
//!
//! ## Methods
//!
//! ### `MoeadOptions::new(population_size, neighborhood_size, delta, max_replacements, num_generations) -> Self`
//!
//! Creates options with an entropy seed and the default parallel threshold.
//!
//! ### `MoeadOptions::builder() -> MoeadOptionsBuilder`
//!
//! Fluent construction, every unset field falling back to its default.
//!
//! ### `MoeadOptions::validate(&self) -> Result<()>`
//!
//! Rejects contradictory settings with a `Configuration` error.

use crate::error::{MoeadError, Result};

/// Number of distinct parents drawn for every subproblem.
pub const MATING_PARENTS: usize = 2;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MoeadOptions {
    population_size: usize,
    neighborhood_size: usize,
    delta: f64,
    max_replacements: usize,
    num_generations: usize,
    max_evaluations: usize,
    seed: Option<u64>,
    /// Minimum population size for parallel evaluation and neighborhood setup
    parallel_threshold: usize,
}

impl MoeadOptions {
    pub fn new(
        population_size: usize,
        neighborhood_size: usize,
        delta: f64,
        max_replacements: usize,
        num_generations: usize,
    ) -> Self {
        Self {
            population_size,
            neighborhood_size,
            delta,
            max_replacements,
            num_generations,
            max_evaluations: 0,
            seed: None,
            parallel_threshold: 1000,
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_neighborhood_size(&self) -> usize {
        self.neighborhood_size
    }

    pub fn get_delta(&self) -> f64 {
        self.delta
    }

    pub fn get_max_replacements(&self) -> usize {
        self.max_replacements
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the minimum population size processed in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_neighborhood_size(&mut self, neighborhood_size: usize) {
        self.neighborhood_size = neighborhood_size;
    }

    pub fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    pub fn set_max_replacements(&mut self, max_replacements: usize) {
        self.max_replacements = max_replacements;
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_max_evaluations(&mut self, max_evaluations: usize) {
        self.max_evaluations = max_evaluations;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Offspring evaluation count at which the run stops.
    ///
    /// It is checked between generations, so the last generation may spend
    /// past it. Seed evaluations are not counted against it.
    pub fn evaluation_budget(&self) -> usize {
        if self.num_generations > 0 {
            self.num_generations.saturating_mul(self.population_size)
        } else {
            self.max_evaluations
        }
    }

    /// Checks the options for contradictions.
    ///
    /// # Errors
    ///
    /// Returns `MoeadError::Configuration` if:
    /// - the population has fewer than two members
    /// - the neighborhood size is zero, exceeds the population size, or is
    ///   smaller than the number of mating parents
    /// - `delta` is not in `[0, 1]`
    /// - the replacement cap is zero
    /// - both `num_generations` and `max_evaluations` are zero
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MoeadError::Configuration(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.neighborhood_size == 0 {
            return Err(MoeadError::Configuration(
                "neighborhood size cannot be zero".to_string(),
            ));
        }
        if self.neighborhood_size > self.population_size {
            return Err(MoeadError::Configuration(format!(
                "neighborhood size {} exceeds population size {}",
                self.neighborhood_size, self.population_size
            )));
        }
        if self.neighborhood_size < MATING_PARENTS {
            return Err(MoeadError::Configuration(format!(
                "neighborhood size {} cannot supply {} distinct parents",
                self.neighborhood_size, MATING_PARENTS
            )));
        }
        if !(0.0..=1.0).contains(&self.delta) {
            return Err(MoeadError::Configuration(format!(
                "delta must be in [0, 1], got {}",
                self.delta
            )));
        }
        if self.max_replacements == 0 {
            return Err(MoeadError::Configuration(
                "max replacements must be at least 1".to_string(),
            ));
        }
        if self.num_generations == 0 && self.max_evaluations == 0 {
            return Err(MoeadError::Configuration(
                "either the number of generations or the evaluation ceiling must be positive"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating a `MoeadOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moead::evolution::options::MoeadOptions;
    ///
    /// let options = MoeadOptions::builder()
    ///     .population_size(20)
    ///     .neighborhood_size(5)
    ///     .num_generations(0)
    ///     .max_evaluations(200)
    ///     .seed(42)
    ///     .build();
    /// assert_eq!(options.evaluation_budget(), 200);
    /// ```
    pub fn builder() -> MoeadOptionsBuilder {
        MoeadOptionsBuilder::default()
    }
}

impl Default for MoeadOptions {
    fn default() -> Self {
        Self::new(100, 20, 0.9, 2, 100)
    }
}

/// Builder for `MoeadOptions`.
#[derive(Debug, Clone, Default)]
pub struct MoeadOptionsBuilder {
    population_size: Option<usize>,
    neighborhood_size: Option<usize>,
    delta: Option<f64>,
    max_replacements: Option<usize>,
    num_generations: Option<usize>,
    max_evaluations: Option<usize>,
    seed: Option<u64>,
    parallel_threshold: Option<usize>,
}

impl MoeadOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn neighborhood_size(mut self, value: usize) -> Self {
        self.neighborhood_size = Some(value);
        self
    }

    pub fn delta(mut self, value: f64) -> Self {
        self.delta = Some(value);
        self
    }

    pub fn max_replacements(mut self, value: usize) -> Self {
        self.max_replacements = Some(value);
        self
    }

    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn max_evaluations(mut self, value: usize) -> Self {
        self.max_evaluations = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the options. Validation happens when the engine is built.
    pub fn build(self) -> MoeadOptions {
        MoeadOptions {
            population_size: self.population_size.unwrap_or(100),
            neighborhood_size: self.neighborhood_size.unwrap_or(20),
            delta: self.delta.unwrap_or(0.9),
            max_replacements: self.max_replacements.unwrap_or(2),
            num_generations: self.num_generations.unwrap_or(100),
            max_evaluations: self.max_evaluations.unwrap_or(0),
            seed: self.seed,
            parallel_threshold: self.parallel_threshold.unwrap_or(1000),
        }
    }
}
