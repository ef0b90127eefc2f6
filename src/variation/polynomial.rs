use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::variation::{validate_distribution_index, validate_probability, Bounds, Mutation};

/// Bounded polynomial mutation.
///
/// Each variable mutates with probability `probability`, which defaults to
/// `1 / n` for an `n`-variable candidate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    eta: f64,
    bounds: Bounds,
    probability: Option<f64>,
}

impl PolynomialMutation {
    pub fn new(eta: f64, bounds: Bounds) -> Result<Self> {
        validate_distribution_index(eta)?;
        Ok(Self {
            eta,
            bounds,
            probability: None,
        })
    }

    pub fn with_probability(mut self, probability: f64) -> Result<Self> {
        validate_probability(probability)?;
        self.probability = Some(probability);
        Ok(self)
    }

    fn perturbation(&self, value: f64, rand: f64) -> f64 {
        let span = self.bounds.span();
        let delta_low = (value - self.bounds.lower()) / span;
        let delta_high = (self.bounds.upper() - value) / span;
        let power = 1.0 / (self.eta + 1.0);

        if rand < 0.5 {
            let xy = 1.0 - delta_low;
            let val = 2.0 * rand + (1.0 - 2.0 * rand) * xy.powf(self.eta + 1.0);
            val.powf(power) - 1.0
        } else {
            let xy = 1.0 - delta_high;
            let val = 2.0 * (1.0 - rand) + 2.0 * (rand - 0.5) * xy.powf(self.eta + 1.0);
            1.0 - val.powf(power)
        }
    }
}

impl Mutation for PolynomialMutation {
    fn mutate(&self, mut candidate: Vec<f64>, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        if candidate.is_empty() {
            return candidate;
        }
        let probability = self
            .probability
            .unwrap_or(1.0 / candidate.len() as f64);

        for value in candidate.iter_mut() {
            if rng.gen_probability() > probability {
                continue;
            }
            let rand = rng.gen_probability();
            let delta = self.perturbation(*value, rand);
            *value = self.bounds.clamp(*value + delta * self.bounds.span());
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Bounds {
        Bounds::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_stays_within_bounds() {
        let mutation = PolynomialMutation::new(20.0, unit())
            .unwrap()
            .with_probability(1.0)
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(21);

        for _ in 0..1000 {
            let mutated = mutation.mutate(vec![0.0, 0.5, 1.0], &mut rng);
            assert!(mutated.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mutation = PolynomialMutation::new(20.0, unit())
            .unwrap()
            .with_probability(0.0)
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(22);
        assert_eq!(mutation.mutate(vec![0.3, 0.7], &mut rng), vec![0.3, 0.7]);
    }

    #[test]
    fn test_default_probability_mutates_about_one_variable() {
        let mutation = PolynomialMutation::new(20.0, unit()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(23);
        let original = vec![0.5; 10];

        let trials = 2_000;
        let changed: usize = (0..trials)
            .map(|_| {
                let mutated = mutation.mutate(original.clone(), &mut rng);
                mutated
                    .iter()
                    .zip(&original)
                    .filter(|(a, b)| a != b)
                    .count()
            })
            .sum();
        let mean = changed as f64 / trials as f64;
        assert!((0.85..1.15).contains(&mean), "mean changes: {}", mean);
    }

    #[test]
    fn test_perturbation_is_small_for_large_eta() {
        let mutation = PolynomialMutation::new(100.0, unit())
            .unwrap()
            .with_probability(1.0)
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(24);

        for _ in 0..200 {
            let mutated = mutation.mutate(vec![0.5], &mut rng);
            assert!((mutated[0] - 0.5).abs() < 0.2);
        }
    }

    #[test]
    fn test_empty_candidate() {
        let mutation = PolynomialMutation::new(20.0, unit()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(25);
        assert!(mutation.mutate(Vec::new(), &mut rng).is_empty());
    }
}
