use crate::decomposition::{neighborhood::NeighborhoodIndex, weights::WeightVectors};
use crate::error::{MoeadError, Result};
use crate::individual::SubproblemId;

/// Weight vectors and neighborhoods of a run, index-aligned by [`SubproblemId`].
///
/// Both halves are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Subproblems {
    weights: WeightVectors,
    neighborhoods: NeighborhoodIndex,
}

impl Subproblems {
    /// # Errors
    ///
    /// Returns a `Configuration` error if the two halves cover a different
    /// number of subproblems.
    pub fn new(weights: WeightVectors, neighborhoods: NeighborhoodIndex) -> Result<Self> {
        if weights.len() != neighborhoods.len() {
            return Err(MoeadError::Configuration(format!(
                "{} weight vectors but {} neighborhoods",
                weights.len(),
                neighborhoods.len()
            )));
        }
        Ok(Self {
            weights,
            neighborhoods,
        })
    }

    /// Builds the neighborhoods of `weights` and pairs the two.
    pub fn build(
        weights: WeightVectors,
        neighborhood_size: usize,
        parallel_threshold: usize,
    ) -> Result<Self> {
        let neighborhoods =
            NeighborhoodIndex::build(&weights, neighborhood_size, parallel_threshold)?;
        Self::new(weights, neighborhoods)
    }

    pub fn weights(&self) -> &WeightVectors {
        &self.weights
    }

    pub fn neighborhoods(&self) -> &NeighborhoodIndex {
        &self.neighborhoods
    }

    pub fn weight(&self, id: SubproblemId) -> &[f64] {
        &self.weights[id]
    }

    pub fn neighbors(&self, id: SubproblemId) -> &[SubproblemId] {
        self.neighborhoods.neighbors(id)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn num_objectives(&self) -> usize {
        self.weights.num_objectives()
    }
}
