//! # Individuals and Populations
//!
//! An [`Individual`] is a point in the search space plus, once evaluated, its
//! objective vector. A [`Population`] holds exactly one individual per
//! subproblem. The slot an individual sits in *is* the subproblem it solves,
//! so the population never reorders, grows or shrinks; it only swaps the
//! occupant of a slot.
//!
//! Slots, weight vectors and neighborhoods are all addressed through the same
//! [`SubproblemId`] handle.
//!
//! ## Example
//!
//! ```rust
//! use moead::individual::{Individual, Population, SubproblemId};
//!
//! let population = Population::new(vec![
//!     Individual::evaluated(vec![0.1], vec![0.1, 0.9]),
//!     Individual::evaluated(vec![0.7], vec![0.7, 0.3]),
//! ])
//! .unwrap();
//!
//! assert_eq!(population.len(), 2);
//! assert_eq!(population[SubproblemId::new(1)].variables(), &[0.7]);
//! ```

use std::fmt;
use std::ops::Index;

use crate::error::{MoeadError, Result};

/// Index of a subproblem.
///
/// The same id addresses the population slot, the weight vector and the
/// neighborhood of one subproblem.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubproblemId(usize);

impl SubproblemId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Iterates over the ids `0..count`.
    pub fn range(count: usize) -> impl Iterator<Item = SubproblemId> {
        (0..count).map(SubproblemId)
    }
}

impl fmt::Display for SubproblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate solution.
///
/// The objective vector is `None` until the individual is evaluated and is not
/// changed afterwards unless the individual is evaluated again.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    variables: Vec<f64>,
    objectives: Option<Vec<f64>>,
}

impl Individual {
    /// Creates an individual that has not been evaluated yet.
    pub fn new(variables: Vec<f64>) -> Self {
        Self {
            variables,
            objectives: None,
        }
    }

    /// Creates an individual with a known objective vector.
    pub fn evaluated(variables: Vec<f64>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives: Some(objectives),
        }
    }

    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    pub fn objectives(&self) -> Option<&[f64]> {
        self.objectives.as_deref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.objectives.is_some()
    }

    /// Returns the objective vector or an `InvalidState` error when the
    /// individual was never evaluated.
    pub fn require_objectives(&self) -> Result<&[f64]> {
        self.objectives.as_deref().ok_or_else(|| {
            MoeadError::InvalidState("individual has not been evaluated".to_string())
        })
    }

    pub fn into_variables(self) -> Vec<f64> {
        self.variables
    }
}

/// The fixed-size set of individuals, one per subproblem.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    /// Wraps the given individuals. Slot `i` becomes subproblem `i`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `members` is empty.
    pub fn new(members: Vec<Individual>) -> Result<Self> {
        if members.is_empty() {
            return Err(MoeadError::EmptyPopulation);
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: SubproblemId) -> Option<&Individual> {
        self.members.get(id.index())
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubproblemId, &Individual)> {
        self.members
            .iter()
            .enumerate()
            .map(|(idx, member)| (SubproblemId(idx), member))
    }

    /// Puts `individual` into the slot of subproblem `id`, returning the
    /// previous occupant.
    pub(crate) fn replace(&mut self, id: SubproblemId, individual: Individual) -> Individual {
        std::mem::replace(&mut self.members[id.index()], individual)
    }

    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }
}

impl Index<SubproblemId> for Population {
    type Output = Individual;

    fn index(&self, id: SubproblemId) -> &Self::Output {
        &self.members[id.index()]
    }
}
