//! # Problem
//!
//! The `Problem` trait is the objective-evaluation side of the optimizer: it
//! maps a decision vector to one value per objective, all to be minimized.
//! Evaluation is the expensive, counted resource of a run.
//!
//! ## Example
//!
//! ```rust
//! use std::convert::Infallible;
//! use moead::problem::{FnProblem, Problem};
//!
//! let problem = FnProblem::new(2, |x: &[f64]| Ok::<_, Infallible>(vec![x[0], 1.0 - x[0].sqrt()]));
//!
//! assert_eq!(problem.num_objectives(), 2);
//! assert_eq!(problem.evaluate(&[0.25]).unwrap(), vec![0.25, 0.5]);
//! ```
pub mod dtlz;
pub mod zdt;

use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Result, ResultExt};

pub use dtlz::Dtlz2;
pub use zdt::Zdt1;

/// A vector-valued objective function to minimize.
///
/// Implementations should be deterministic: the same decision vector must
/// always produce the same objective vector.
pub trait Problem: Send + Sync {
    /// Number of objectives every evaluation returns.
    fn num_objectives(&self) -> usize;

    /// Evaluates a decision vector.
    ///
    /// # Errors
    ///
    /// Any error aborts the run; the engine never substitutes values.
    fn evaluate(&self, variables: &[f64]) -> Result<Vec<f64>>;
}

/// Adapts a fallible closure into a [`Problem`].
///
/// Errors returned by the closure become [`crate::error::MoeadError::Evaluation`].
pub struct FnProblem<F, E> {
    num_objectives: usize,
    function: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> FnProblem<F, E>
where
    F: Fn(&[f64]) -> std::result::Result<Vec<f64>, E> + Send + Sync,
    E: StdError + Send + Sync + 'static,
{
    pub fn new(num_objectives: usize, function: F) -> Self {
        Self {
            num_objectives,
            function,
            _error: PhantomData,
        }
    }
}

impl<F, E> Problem for FnProblem<F, E>
where
    F: Fn(&[f64]) -> std::result::Result<Vec<f64>, E> + Send + Sync,
    E: StdError + Send + Sync + 'static,
{
    fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    fn evaluate(&self, variables: &[f64]) -> Result<Vec<f64>> {
        (self.function)(variables).evaluation_context("objective function failed")
    }
}

impl<F, E> fmt::Debug for FnProblem<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblem")
            .field("num_objectives", &self.num_objectives)
            .finish_non_exhaustive()
    }
}
