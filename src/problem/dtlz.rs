use std::f64::consts::FRAC_PI_2;

use crate::error::{MoeadError, Result};
use crate::problem::Problem;

/// DTLZ2: any number of objectives, spherical Pareto front
/// `sum f_i^2 = 1`.
///
/// Variables live in `[0, 1]`. The first `m - 1` variables position a point on
/// the front, the remaining ones measure distance from it.
#[derive(Debug, Clone)]
pub struct Dtlz2 {
    num_variables: usize,
    num_objectives: usize,
}

impl Dtlz2 {
    /// # Errors
    ///
    /// Returns a `Configuration` error for fewer than two objectives or fewer
    /// variables than objectives.
    pub fn new(num_variables: usize, num_objectives: usize) -> Result<Self> {
        if num_objectives < 2 {
            return Err(MoeadError::Configuration(format!(
                "DTLZ2 requires at least two objectives, got {}",
                num_objectives
            )));
        }
        if num_variables < num_objectives {
            return Err(MoeadError::Configuration(format!(
                "DTLZ2 with {} objectives requires at least {} variables, got {}",
                num_objectives, num_objectives, num_variables
            )));
        }
        Ok(Self {
            num_variables,
            num_objectives,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }
}

impl Problem for Dtlz2 {
    fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    fn evaluate(&self, variables: &[f64]) -> Result<Vec<f64>> {
        if variables.len() != self.num_variables {
            return Err(MoeadError::DimensionMismatch {
                expected: self.num_variables,
                got: variables.len(),
            });
        }

        let m = self.num_objectives;
        let (position, distance) = variables.split_at(m - 1);
        let g: f64 = distance.iter().map(|x| (x - 0.5).powi(2)).sum();

        let objectives = (0..m)
            .map(|i| {
                let mut value = 1.0 + g;
                for x in &position[..m - 1 - i] {
                    value *= (x * FRAC_PI_2).cos();
                }
                if i > 0 {
                    value *= (position[m - 1 - i] * FRAC_PI_2).sin();
                }
                value
            })
            .collect();
        Ok(objectives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_points_lie_on_unit_sphere() {
        let problem = Dtlz2::new(7, 3).unwrap();
        for (a, b) in [(0.0, 0.0), (0.3, 0.8), (1.0, 0.5), (0.5, 1.0)] {
            let values = problem
                .evaluate(&[a, b, 0.5, 0.5, 0.5, 0.5, 0.5])
                .unwrap();
            let radius: f64 = values.iter().map(|f| f * f).sum();
            assert!((radius - 1.0).abs() < 1e-12, "radius was {}", radius);
        }
    }

    #[test]
    fn test_corner_point() {
        let problem = Dtlz2::new(3, 3).unwrap();
        let values = problem.evaluate(&[0.0, 0.0, 0.5]).unwrap();
        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!(values[1].abs() < 1e-12);
        assert!(values[2].abs() < 1e-12);
    }

    #[test]
    fn test_distance_variables_push_away_from_front() {
        let problem = Dtlz2::new(4, 2).unwrap();
        let values = problem.evaluate(&[0.5, 0.0, 0.0, 0.0]).unwrap();
        let radius: f64 = values.iter().map(|f| f * f).sum::<f64>().sqrt();
        // g = 3 * 0.25
        assert!((radius - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_configuration_checks() {
        assert!(Dtlz2::new(5, 1).is_err());
        assert!(Dtlz2::new(2, 3).is_err());
        let problem = Dtlz2::new(4, 3).unwrap();
        assert!(matches!(
            problem.evaluate(&[0.1; 3]),
            Err(MoeadError::DimensionMismatch { expected: 4, got: 3 })
        ));
    }
}
