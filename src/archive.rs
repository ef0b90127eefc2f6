//! # Archive
//!
//! An archive observes the population whenever an offspring saturates its
//! replacement cap. It never influences the search.

use crate::individual::Individual;

/// Observer notified with the full population on replacement saturation.
pub trait Archive: Send {
    fn update(&mut self, population: &[Individual]);
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArchive;

impl Archive for NoArchive {
    fn update(&mut self, _population: &[Individual]) {}
}

/// Returns whether `a` Pareto-dominates `b` under minimization.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Keeps every non-dominated individual it has been shown.
///
/// Unevaluated individuals are ignored, as are exact objective duplicates of
/// an existing entry.
#[derive(Debug, Clone, Default)]
pub struct ParetoArchive {
    members: Vec<Individual>,
}

impl ParetoArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Offers one individual. Returns whether it entered the archive.
    pub fn insert(&mut self, candidate: &Individual) -> bool {
        let Some(objectives) = candidate.objectives() else {
            return false;
        };

        let rejected = self.members.iter().any(|member| {
            member.objectives().is_some_and(|existing| {
                existing == objectives || dominates(existing, objectives)
            })
        });
        if rejected {
            return false;
        }

        self.members.retain(|member| {
            member
                .objectives()
                .is_some_and(|existing| !dominates(objectives, existing))
        });
        self.members.push(candidate.clone());
        true
    }

    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }
}

impl Archive for ParetoArchive {
    fn update(&mut self, population: &[Individual]) {
        for member in population {
            self.insert(member);
        }
    }
}
