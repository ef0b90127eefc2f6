use crate::decomposition::{tchebycheff, IdealPoint, Subproblems};
use crate::error::{MoeadError, Result};
use crate::individual::{Individual, Population, SubproblemId};
use crate::rng::RandomNumberGenerator;
use crate::selection::mating::MatingScope;

/// Result of offering one offspring to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementOutcome {
    /// Number of slots the offspring now occupies.
    pub replaced: usize,
    /// Whether the replacement cap was reached.
    pub saturated: bool,
}

/// Places an offspring into the slots whose subproblems it solves better.
///
/// At most `max_replacements` slots are overwritten per offspring, so a single
/// strong child cannot take over the population in one step.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ReplacementUpdater {
    max_replacements: usize,
}

impl ReplacementUpdater {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `max_replacements` is zero.
    pub fn new(max_replacements: usize) -> Result<Self> {
        if max_replacements == 0 {
            return Err(MoeadError::Configuration(
                "max replacements must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_replacements })
    }

    pub fn max_replacements(&self) -> usize {
        self.max_replacements
    }

    /// Offers `offspring` to the slots in `scope` of subproblem `id`.
    ///
    /// Slots are visited in a fresh random order. A slot is overwritten with a
    /// copy of the offspring when the offspring scores strictly lower under
    /// that slot's weight vector. Stops once the cap is reached.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the offspring or a visited slot has not been
    /// evaluated.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        offspring: &Individual,
        id: SubproblemId,
        scope: MatingScope,
        subproblems: &Subproblems,
        ideal: &IdealPoint,
        population: &mut Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<ReplacementOutcome> {
        let offspring_objectives = offspring.require_objectives()?;
        let mut candidates = scope.candidates(id, subproblems.neighborhoods());
        rng.shuffle(&mut candidates);

        let mut replaced = 0;
        for slot in candidates {
            let weights = subproblems.weight(slot);
            let current = tchebycheff(
                population[slot].require_objectives()?,
                weights,
                ideal.coordinates(),
            );
            let challenger = tchebycheff(offspring_objectives, weights, ideal.coordinates());

            if challenger < current {
                population.replace(slot, offspring.clone());
                replaced += 1;
                if replaced >= self.max_replacements {
                    break;
                }
            }
        }

        Ok(ReplacementOutcome {
            replaced,
            saturated: replaced >= self.max_replacements,
        })
    }
}

impl Default for ReplacementUpdater {
    fn default() -> Self {
        Self {
            max_replacements: 2,
        }
    }
}
