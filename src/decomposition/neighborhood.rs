use rayon::prelude::*;

use crate::decomposition::weights::WeightVectors;
use crate::error::{MoeadError, Result};
use crate::individual::SubproblemId;

/// The `T` closest subproblems of every subproblem, by Euclidean distance
/// between weight vectors.
///
/// A subproblem's own id is part of its neighborhood, since its distance to
/// itself is zero. Equal distances keep index order. Computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodIndex {
    neighbors: Vec<Vec<SubproblemId>>,
    size: usize,
}

impl NeighborhoodIndex {
    /// Builds the index in O(N² · m).
    ///
    /// Rows are computed in parallel when there are at least
    /// `parallel_threshold` weight vectors; the result does not depend on it.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error unless `1 <= size <= weights.len()`.
    pub fn build(weights: &WeightVectors, size: usize, parallel_threshold: usize) -> Result<Self> {
        let count = weights.len();
        if size == 0 || size > count {
            return Err(MoeadError::Configuration(format!(
                "neighborhood size must be between 1 and {}, got {}",
                count, size
            )));
        }

        let neighbors = if count >= parallel_threshold {
            (0..count)
                .into_par_iter()
                .map(|anchor| nearest(weights, SubproblemId::new(anchor), size))
                .collect()
        } else {
            (0..count)
                .map(|anchor| nearest(weights, SubproblemId::new(anchor), size))
                .collect()
        };

        Ok(Self { neighbors, size })
    }

    /// The neighborhood of `id`, closest first.
    pub fn neighbors(&self, id: SubproblemId) -> &[SubproblemId] {
        &self.neighbors[id.index()]
    }

    /// The neighborhood size `T`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn nearest(weights: &WeightVectors, anchor: SubproblemId, size: usize) -> Vec<SubproblemId> {
    let origin = &weights[anchor];
    let mut distances: Vec<(SubproblemId, f64)> = weights
        .iter()
        .map(|(id, vector)| (id, euclidean_distance(origin, vector)))
        .collect();

    // sort_by is stable, ties stay in index order
    distances.sort_by(|a, b| a.1.total_cmp(&b.1));
    distances.into_iter().take(size).map(|(id, _)| id).collect()
}
