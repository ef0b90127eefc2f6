//! # Decomposition
//!
//! Turns the multi-objective problem into one scalar subproblem per weight
//! vector: weight generation, neighborhood construction, ideal point tracking
//! and Tchebycheff scalarization.
pub mod ideal;
pub mod neighborhood;
pub mod scalarization;
pub mod subproblems;
pub mod weights;

pub use ideal::IdealPoint;
pub use neighborhood::{euclidean_distance, NeighborhoodIndex};
pub use scalarization::{scalarized_sum, tchebycheff, ZERO_WEIGHT_FACTOR};
pub use subproblems::Subproblems;
pub use weights::{WeightVectorGenerator, WeightVectors};
