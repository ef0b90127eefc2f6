use crate::error::{MoeadError, Result};

/// Best value seen so far for every objective.
///
/// Starts at `+inf` in every coordinate and only ever decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealPoint {
    coordinates: Vec<f64>,
}

impl IdealPoint {
    pub fn new(num_objectives: usize) -> Self {
        Self {
            coordinates: vec![f64::INFINITY; num_objectives],
        }
    }

    /// Lowers every coordinate that `objectives` improves on.
    ///
    /// Returns whether any coordinate changed.
    pub fn update(&mut self, objectives: &[f64]) -> Result<bool> {
        if objectives.len() != self.coordinates.len() {
            return Err(MoeadError::DimensionMismatch {
                expected: self.coordinates.len(),
                got: objectives.len(),
            });
        }

        let mut improved = false;
        for (z, &value) in self.coordinates.iter_mut().zip(objectives) {
            if value < *z {
                *z = value;
                improved = true;
            }
        }
        Ok(improved)
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn num_objectives(&self) -> usize {
        self.coordinates.len()
    }
}
