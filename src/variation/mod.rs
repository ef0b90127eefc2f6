//! # Variation
//!
//! Variation operators create offspring decision vectors from parents. They
//! only see decision vectors: objectives, weights and the population are
//! invisible to them.
//!
//! The engine consumes a [`Variation`], which is usually a
//! [`VariationPipeline`] joining one [`Crossover`] with one [`Mutation`].
//!
//! ## Example
//!
//! ```rust
//! use moead::rng::RandomNumberGenerator;
//! use moead::variation::{Bounds, Variation, VariationPipeline};
//!
//! let variation = VariationPipeline::sbx_polynomial(Bounds::new(0.0, 1.0).unwrap()).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let children = variation.crossover(&[0.2, 0.4], &[0.8, 0.6], &mut rng);
//! assert_eq!(children.len(), 2);
//!
//! let mutated = variation.mutate(children[0].clone(), &mut rng);
//! assert!(mutated.iter().all(|x| (0.0..=1.0).contains(x)));
//! ```
pub mod polynomial;
pub mod sbx;

use std::fmt::Debug;

use crate::error::{MoeadError, Result};
use crate::rng::RandomNumberGenerator;

pub use polynomial::PolynomialMutation;
pub use sbx::SimulatedBinaryCrossover;

/// Box constraint shared by every decision variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// # Errors
    ///
    /// Returns a `Configuration` error unless both bounds are finite and
    /// `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(MoeadError::Configuration(format!(
                "invalid variable bounds [{}, {}]",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// Recombines two parents into one or more children.
pub trait Crossover: Debug + Send + Sync {
    fn crossover(
        &self,
        first: &[f64],
        second: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Vec<f64>>;
}

/// Perturbs one candidate.
///
/// Takes ownership of the candidate; the returned vector is its only
/// surviving copy.
pub trait Mutation: Debug + Send + Sync {
    fn mutate(&self, candidate: Vec<f64>, rng: &mut RandomNumberGenerator) -> Vec<f64>;
}

/// The variation collaborator consumed by the engine.
pub trait Variation: Debug + Send + Sync {
    /// Produces one or more children from two parents.
    fn crossover(
        &self,
        first: &[f64],
        second: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Vec<f64>>;

    /// Mutates one child, returning its surviving form.
    fn mutate(&self, candidate: Vec<f64>, rng: &mut RandomNumberGenerator) -> Vec<f64>;
}

/// Crossover followed by mutation.
#[derive(Debug, Clone)]
pub struct VariationPipeline<C, M> {
    crossover: C,
    mutation: M,
}

impl<C, M> VariationPipeline<C, M>
where
    C: Crossover,
    M: Mutation,
{
    pub fn new(crossover: C, mutation: M) -> Self {
        Self {
            crossover,
            mutation,
        }
    }
}

impl VariationPipeline<SimulatedBinaryCrossover, PolynomialMutation> {
    /// Bounded SBX and polynomial mutation, both with distribution index 20
    /// and mutation probability `1 / n` per variable.
    pub fn sbx_polynomial(bounds: Bounds) -> Result<Self> {
        Ok(Self::new(
            SimulatedBinaryCrossover::new(20.0, bounds)?,
            PolynomialMutation::new(20.0, bounds)?,
        ))
    }
}

impl<C, M> Variation for VariationPipeline<C, M>
where
    C: Crossover,
    M: Mutation,
{
    fn crossover(
        &self,
        first: &[f64],
        second: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Vec<f64>> {
        self.crossover.crossover(first, second, rng)
    }

    fn mutate(&self, candidate: Vec<f64>, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        self.mutation.mutate(candidate, rng)
    }
}

pub(crate) fn validate_distribution_index(eta: f64) -> Result<()> {
    if !eta.is_finite() || eta < 0.0 {
        return Err(MoeadError::Configuration(format!(
            "distribution index must be a non-negative number, got {}",
            eta
        )));
    }
    Ok(())
}

pub(crate) fn validate_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(MoeadError::Configuration(format!(
            "probability must be in [0, 1], got {}",
            probability
        )));
    }
    Ok(())
}
