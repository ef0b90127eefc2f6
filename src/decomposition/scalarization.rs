use crate::decomposition::{ideal::IdealPoint, weights::WeightVectors};
use crate::error::Result;
use crate::individual::Population;

/// Multiplier applied to the distance of a zero-weight objective.
pub const ZERO_WEIGHT_FACTOR: f64 = 1e-4;

/// Tchebycheff scalarization of `objectives` for the subproblem with the
/// given weights, relative to the ideal point. Lower is better.
///
/// `max_k w_k * |f_k - z_k|`, where a zero weight is replaced by
/// [`ZERO_WEIGHT_FACTOR`].
///
/// ```rust
/// use moead::decomposition::tchebycheff;
///
/// let score = tchebycheff(&[3.0, 2.0], &[0.5, 0.5], &[1.0, 1.0]);
/// assert!((score - 1.0).abs() < 1e-12);
/// ```
pub fn tchebycheff(objectives: &[f64], weights: &[f64], ideal: &[f64]) -> f64 {
    objectives
        .iter()
        .zip(weights)
        .zip(ideal)
        .map(|((&f, &w), &z)| {
            let diff = (f - z).abs();
            if w == 0.0 {
                ZERO_WEIGHT_FACTOR * diff
            } else {
                diff * w
            }
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Sum of every slot's Tchebycheff score under its own weight vector.
///
/// # Errors
///
/// Returns `InvalidState` if a member has not been evaluated.
pub fn scalarized_sum(
    population: &Population,
    weights: &WeightVectors,
    ideal: &IdealPoint,
) -> Result<f64> {
    population.iter().try_fold(0.0, |acc, (id, member)| {
        let objectives = member.require_objectives()?;
        Ok(acc + tchebycheff(objectives, &weights[id], ideal.coordinates()))
    })
}
