use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::variation::{validate_distribution_index, validate_probability, Bounds, Crossover};

/// Bounded simulated binary crossover.
///
/// Each variable is recombined with probability `probability` (0.5 by
/// default). Children stay inside the bounds. A larger distribution index
/// `eta` keeps children closer to their parents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SimulatedBinaryCrossover {
    eta: f64,
    bounds: Bounds,
    probability: f64,
}

impl SimulatedBinaryCrossover {
    pub fn new(eta: f64, bounds: Bounds) -> Result<Self> {
        validate_distribution_index(eta)?;
        Ok(Self {
            eta,
            bounds,
            probability: 0.5,
        })
    }

    pub fn with_probability(mut self, probability: f64) -> Result<Self> {
        validate_probability(probability)?;
        self.probability = probability;
        Ok(self)
    }

    fn spread_factor(&self, beta: f64, rand: f64) -> f64 {
        let exponent = 1.0 / (self.eta + 1.0);
        let alpha = 2.0 - beta.powf(-(self.eta + 1.0));
        if rand <= 1.0 / alpha {
            (rand * alpha).powf(exponent)
        } else {
            (1.0 / (2.0 - rand * alpha)).powf(exponent)
        }
    }
}

impl Crossover for SimulatedBinaryCrossover {
    fn crossover(
        &self,
        first: &[f64],
        second: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Vec<f64>> {
        let mut child1 = first.to_vec();
        let mut child2 = second.to_vec();
        let (lower, upper) = (self.bounds.lower(), self.bounds.upper());

        for i in 0..child1.len().min(child2.len()) {
            if rng.gen_probability() > self.probability {
                continue;
            }
            let (a, b) = (child1[i], child2[i]);
            if (a - b).abs() <= 1e-14 {
                continue;
            }

            let (x1, x2) = if a < b { (a, b) } else { (b, a) };
            let spread = x2 - x1;
            let rand = rng.gen_probability();

            let beta_low = self.spread_factor(1.0 + 2.0 * (x1 - lower) / spread, rand);
            let c1 = self.bounds.clamp(0.5 * (x1 + x2 - beta_low * spread));

            let beta_high = self.spread_factor(1.0 + 2.0 * (upper - x2) / spread, rand);
            let c2 = self.bounds.clamp(0.5 * (x1 + x2 + beta_high * spread));

            if rng.gen_probability() <= 0.5 {
                child1[i] = c2;
                child2[i] = c1;
            } else {
                child1[i] = c1;
                child2[i] = c2;
            }
        }

        vec![child1, child2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Bounds {
        Bounds::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_produces_two_children_within_bounds() {
        let sbx = SimulatedBinaryCrossover::new(20.0, unit()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);

        for _ in 0..500 {
            let children = sbx.crossover(&[0.0, 0.3, 0.99], &[1.0, 0.7, 0.01], &mut rng);
            assert_eq!(children.len(), 2);
            for child in &children {
                assert_eq!(child.len(), 3);
                assert!(child.iter().all(|x| (0.0..=1.0).contains(x)));
            }
        }
    }

    #[test]
    fn test_identical_parents_are_copied() {
        let sbx = SimulatedBinaryCrossover::new(20.0, unit()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(9);
        let parent = [0.1, 0.5, 0.9];

        let children = sbx.crossover(&parent, &parent, &mut rng);
        assert_eq!(children, vec![parent.to_vec(), parent.to_vec()]);
    }

    #[test]
    fn test_zero_probability_leaves_parents_untouched() {
        let sbx = SimulatedBinaryCrossover::new(20.0, unit())
            .unwrap()
            .with_probability(0.0)
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(10);

        let children = sbx.crossover(&[0.2, 0.4], &[0.6, 0.8], &mut rng);
        assert_eq!(children, vec![vec![0.2, 0.4], vec![0.6, 0.8]]);
    }

    #[test]
    fn test_children_keep_parent_midpoint_on_average() {
        let sbx = SimulatedBinaryCrossover::new(20.0, unit())
            .unwrap()
            .with_probability(1.0)
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(11);

        let trials = 2_000;
        let mut total = 0.0;
        for _ in 0..trials {
            let children = sbx.crossover(&[0.4], &[0.6], &mut rng);
            total += children[0][0] + children[1][0];
        }
        let mean_midpoint = total / (2.0 * trials as f64);
        assert!((mean_midpoint - 0.5).abs() < 0.01, "mean was {}", mean_midpoint);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(SimulatedBinaryCrossover::new(-1.0, unit()).is_err());
        assert!(SimulatedBinaryCrossover::new(f64::NAN, unit()).is_err());
        assert!(SimulatedBinaryCrossover::new(20.0, unit())
            .unwrap()
            .with_probability(1.5)
            .is_err());
    }
}
