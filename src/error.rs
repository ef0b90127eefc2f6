//! # Error Types
//!
//! This module defines the error type shared by every part of the optimizer.
//! Configuration problems are detected before the first generation runs;
//! evaluation failures are propagated out of the generational step untouched,
//! since a substituted objective vector would silently corrupt the ideal point.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use moead::error::{MoeadError, Result};
//!
//! fn check_budget(evaluations: usize) -> Result<()> {
//!     if evaluations == 0 {
//!         return Err(MoeadError::Configuration("budget must be positive".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_budget(0).is_err());
//! ```
//!
//! Using the `ResultExt` trait to turn a foreign error into an evaluation error:
//!
//! ```rust
//! use moead::error::{MoeadError, ResultExt};
//!
//! let parsed: moead::error::Result<f64> = "oops"
//!     .parse::<f64>()
//!     .evaluation_context("objective 0");
//!
//! assert!(matches!(parsed, Err(MoeadError::Evaluation(_))));
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use moead::error::{MoeadError, OptionExt};
//!
//! fn first_objective(objectives: &[f64]) -> moead::error::Result<f64> {
//!     objectives.first().copied().ok_or_else_moead(|| MoeadError::DimensionMismatch {
//!         expected: 1,
//!         got: 0,
//!     })
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while setting up or running the optimizer.
#[derive(Error, Debug)]
pub enum MoeadError {
    /// Invalid or contradictory setup. Fatal, raised before the run starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The objective evaluator failed or returned unusable values.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// A vector did not have the expected number of components.
    #[error("Dimension mismatch: expected {expected} components, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The variation operators did not produce any offspring.
    #[error("Variation error: {0}")]
    Variation(String),

    /// An engine operation was called in the wrong lifecycle state.
    #[error("Invalid engine state: {0}")]
    InvalidState(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, MoeadError>;

/// Extension trait for Result to attach evaluation context to foreign errors.
///
/// User supplied objective functions fail with their own error types. This
/// trait folds them into [`MoeadError::Evaluation`] so the engine can abort the
/// run with a single error kind.
pub trait ResultExt<T, E> {
    /// Converts the error into an evaluation error prefixed with `context`.
    fn evaluation_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn evaluation_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| MoeadError::Evaluation(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, MoeadError>` using a closure
    /// to generate the error.
    fn ok_or_else_moead<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MoeadError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_moead<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MoeadError,
    {
        self.ok_or_else(err_fn)
    }
}
