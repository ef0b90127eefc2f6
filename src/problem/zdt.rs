use crate::error::{MoeadError, Result};
use crate::problem::Problem;

/// ZDT1: two objectives, convex Pareto front `f2 = 1 - sqrt(f1)`.
///
/// Variables live in `[0, 1]`; the front is reached when all but the first
/// variable are zero.
#[derive(Debug, Clone)]
pub struct Zdt1 {
    num_variables: usize,
}

impl Zdt1 {
    /// # Errors
    ///
    /// Returns a `Configuration` error for fewer than two variables.
    pub fn new(num_variables: usize) -> Result<Self> {
        if num_variables < 2 {
            return Err(MoeadError::Configuration(format!(
                "ZDT1 requires at least two decision variables, got {}",
                num_variables
            )));
        }
        Ok(Self { num_variables })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }
}

impl Problem for Zdt1 {
    fn num_objectives(&self) -> usize {
        2
    }

    fn evaluate(&self, variables: &[f64]) -> Result<Vec<f64>> {
        if variables.len() != self.num_variables {
            return Err(MoeadError::DimensionMismatch {
                expected: self.num_variables,
                got: variables.len(),
            });
        }
        let f1 = variables[0];
        let tail: f64 = variables[1..].iter().sum();
        let g = 1.0 + 9.0 * tail / (self.num_variables - 1) as f64;
        let f2 = g * (1.0 - (f1 / g).sqrt());
        Ok(vec![f1, f2])
    }
}
