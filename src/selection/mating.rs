use crate::decomposition::NeighborhoodIndex;
use crate::error::{MoeadError, Result};
use crate::individual::SubproblemId;
use crate::rng::RandomNumberGenerator;

/// Where parents are drawn from and where offspring may be placed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatingScope {
    /// The neighborhood of the current subproblem.
    Neighborhood,
    /// The whole population.
    Population,
}

impl MatingScope {
    /// The subproblems this scope covers for subproblem `id`.
    pub fn candidates(
        self,
        id: SubproblemId,
        neighborhoods: &NeighborhoodIndex,
    ) -> Vec<SubproblemId> {
        match self {
            MatingScope::Neighborhood => neighborhoods.neighbors(id).to_vec(),
            MatingScope::Population => SubproblemId::range(neighborhoods.len()).collect(),
        }
    }

    fn available(self, id: SubproblemId, neighborhoods: &NeighborhoodIndex) -> usize {
        match self {
            MatingScope::Neighborhood => neighborhoods.neighbors(id).len(),
            MatingScope::Population => neighborhoods.len(),
        }
    }
}

/// Picks distinct mating parents for a subproblem.
///
/// The scope is drawn per subproblem visit: with probability `delta` parents
/// come from the neighborhood, otherwise from the whole population. A high
/// `delta` keeps mating local.
///
/// # Examples
///
/// ```
/// use moead::decomposition::{NeighborhoodIndex, WeightVectors};
/// use moead::individual::SubproblemId;
/// use moead::rng::RandomNumberGenerator;
/// use moead::selection::{MatingScope, MatingSelector};
///
/// let weights = WeightVectors::new(vec![
///     vec![0.0, 1.0],
///     vec![0.25, 0.75],
///     vec![0.5, 0.5],
///     vec![0.75, 0.25],
///     vec![1.0, 0.0],
/// ])
/// .unwrap();
/// let neighborhoods = NeighborhoodIndex::build(&weights, 3, 1000).unwrap();
/// let selector = MatingSelector::new(0.9).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(7);
///
/// let parents = selector
///     .select(&neighborhoods, SubproblemId::new(2), 2, MatingScope::Neighborhood, &mut rng)
///     .unwrap();
/// assert_eq!(parents.len(), 2);
/// assert_ne!(parents[0], parents[1]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct MatingSelector {
    delta: f64,
}

impl MatingSelector {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `delta` is not in `[0, 1]`.
    pub fn new(delta: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&delta) {
            return Err(MoeadError::Configuration(format!(
                "delta must be a probability in [0, 1], got {}",
                delta
            )));
        }
        Ok(Self { delta })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Draws the scope for one subproblem visit.
    pub fn choose_scope(&self, rng: &mut RandomNumberGenerator) -> MatingScope {
        if rng.gen_probability() < self.delta {
            MatingScope::Neighborhood
        } else {
            MatingScope::Population
        }
    }

    /// Draws `count` distinct subproblems from `scope`.
    ///
    /// Candidates are drawn uniformly with replacement and duplicates are
    /// rejected until `count` distinct ids are collected.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `scope` holds fewer than `count`
    /// distinct subproblems.
    pub fn select(
        &self,
        neighborhoods: &NeighborhoodIndex,
        id: SubproblemId,
        count: usize,
        scope: MatingScope,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<SubproblemId>> {
        let available = scope.available(id, neighborhoods);
        if count > available {
            return Err(MoeadError::Configuration(format!(
                "cannot select {} distinct parents from {} candidates ({:?} scope of subproblem {})",
                count, available, scope, id
            )));
        }

        let mut chosen = Vec::with_capacity(count);
        while chosen.len() < count {
            let candidate = match scope {
                MatingScope::Neighborhood => {
                    let neighbors = neighborhoods.neighbors(id);
                    neighbors[rng.gen_index(neighbors.len())]
                }
                MatingScope::Population => SubproblemId::new(rng.gen_index(available)),
            };
            if !chosen.contains(&candidate) {
                chosen.push(candidate);
            }
        }
        Ok(chosen)
    }
}

impl Default for MatingSelector {
    fn default() -> Self {
        Self { delta: 0.9 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::WeightVectors;

    fn neighborhoods(count: usize, size: usize) -> NeighborhoodIndex {
        let last = (count - 1) as f64;
        let weights = WeightVectors::new(
            (0..count)
                .map(|n| {
                    let a = n as f64 / last;
                    vec![a, 1.0 - a]
                })
                .collect(),
        )
        .unwrap();
        NeighborhoodIndex::build(&weights, size, 1000).unwrap()
    }

    #[test]
    fn test_neighborhood_selection_stays_in_neighborhood() {
        let index = neighborhoods(20, 4);
        let selector = MatingSelector::default();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let id = SubproblemId::new(10);

        for _ in 0..200 {
            let parents = selector
                .select(&index, id, 3, MatingScope::Neighborhood, &mut rng)
                .unwrap();
            assert_eq!(parents.len(), 3);
            for parent in &parents {
                assert!(index.neighbors(id).contains(parent));
            }
            let mut unique = parents.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_population_selection_covers_whole_range() {
        let index = neighborhoods(10, 2);
        let selector = MatingSelector::default();
        let mut rng = RandomNumberGenerator::from_seed(2);

        let mut seen = vec![false; 10];
        for _ in 0..500 {
            let parents = selector
                .select(&index, SubproblemId::new(0), 2, MatingScope::Population, &mut rng)
                .unwrap();
            assert_ne!(parents[0], parents[1]);
            for parent in parents {
                seen[parent.index()] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_selecting_whole_neighborhood_terminates() {
        let index = neighborhoods(8, 3);
        let selector = MatingSelector::default();
        let mut rng = RandomNumberGenerator::from_seed(3);

        let mut parents = selector
            .select(&index, SubproblemId::new(4), 3, MatingScope::Neighborhood, &mut rng)
            .unwrap();
        parents.sort();
        let mut expected = index.neighbors(SubproblemId::new(4)).to_vec();
        expected.sort();
        assert_eq!(parents, expected);
    }

    #[test]
    fn test_count_larger_than_scope_is_configuration_error() {
        let index = neighborhoods(6, 2);
        let selector = MatingSelector::default();
        let mut rng = RandomNumberGenerator::from_seed(4);

        assert!(matches!(
            selector.select(&index, SubproblemId::new(0), 3, MatingScope::Neighborhood, &mut rng),
            Err(MoeadError::Configuration(_))
        ));
        assert!(matches!(
            selector.select(&index, SubproblemId::new(0), 7, MatingScope::Population, &mut rng),
            Err(MoeadError::Configuration(_))
        ));
    }

    #[test]
    fn test_choose_scope_follows_delta() {
        let mut rng = RandomNumberGenerator::from_seed(5);

        let always_local = MatingSelector::new(1.0).unwrap();
        let never_local = MatingSelector::new(0.0).unwrap();
        for _ in 0..100 {
            assert_eq!(always_local.choose_scope(&mut rng), MatingScope::Neighborhood);
            assert_eq!(never_local.choose_scope(&mut rng), MatingScope::Population);
        }

        let mostly_local = MatingSelector::default();
        let local = (0..10_000)
            .filter(|_| mostly_local.choose_scope(&mut rng) == MatingScope::Neighborhood)
            .count();
        assert!((8_500..9_500).contains(&local), "local draws: {}", local);
    }

    #[test]
    fn test_rejects_invalid_delta() {
        assert!(MatingSelector::new(1.5).is_err());
        assert!(MatingSelector::new(-0.1).is_err());
        assert!(MatingSelector::new(f64::NAN).is_err());
    }

    #[test]
    fn test_scope_candidates() {
        let index = neighborhoods(5, 2);
        let id = SubproblemId::new(0);
        assert_eq!(
            MatingScope::Neighborhood.candidates(id, &index),
            vec![SubproblemId::new(0), SubproblemId::new(1)]
        );
        assert_eq!(MatingScope::Population.candidates(id, &index).len(), 5);
    }
}
