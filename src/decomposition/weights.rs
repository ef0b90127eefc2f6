use std::ops::Index;

use tracing::debug;

use crate::error::{MoeadError, Result};
use crate::individual::SubproblemId;
use crate::rng::RandomNumberGenerator;

/// The weight vectors of a run, one per subproblem.
///
/// Every vector lies on the unit simplex. The set is fixed once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVectors {
    vectors: Vec<Vec<f64>>,
}

impl WeightVectors {
    /// Wraps precomputed weight vectors.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the set is empty, the vectors differ
    /// in length, or a vector has a negative component or does not sum to 1.
    pub fn new(vectors: Vec<Vec<f64>>) -> Result<Self> {
        let first = vectors.first().ok_or_else(|| {
            MoeadError::Configuration("at least one weight vector is required".to_string())
        })?;
        let num_objectives = first.len();

        for (idx, vector) in vectors.iter().enumerate() {
            if vector.len() != num_objectives {
                return Err(MoeadError::DimensionMismatch {
                    expected: num_objectives,
                    got: vector.len(),
                });
            }
            if vector.iter().any(|&w| w.is_nan() || w < 0.0) {
                return Err(MoeadError::Configuration(format!(
                    "weight vector {} has a negative or NaN component",
                    idx
                )));
            }
            let sum: f64 = vector.iter().sum();
            if (sum - 1.0).abs() > 1e-9 {
                return Err(MoeadError::Configuration(format!(
                    "weight vector {} sums to {} instead of 1",
                    idx, sum
                )));
            }
        }

        Ok(Self { vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn num_objectives(&self) -> usize {
        self.vectors.first().map_or(0, Vec::len)
    }

    pub fn get(&self, id: SubproblemId) -> Option<&[f64]> {
        self.vectors.get(id.index()).map(Vec::as_slice)
    }

    pub fn as_slice(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubproblemId, &[f64])> {
        self.vectors
            .iter()
            .enumerate()
            .map(|(idx, vector)| (SubproblemId::new(idx), vector.as_slice()))
    }
}

impl Index<SubproblemId> for WeightVectors {
    type Output = [f64];

    fn index(&self, id: SubproblemId) -> &Self::Output {
        &self.vectors[id.index()]
    }
}

/// Produces one weight vector per subproblem.
///
/// Two objectives get evenly spaced weights. Three or more objectives get a
/// uniform random sample of a simplex lattice, so those runs depend on the
/// random source.
#[derive(Debug, Clone)]
pub struct WeightVectorGenerator {
    num_objectives: usize,
    population_size: usize,
}

impl WeightVectorGenerator {
    /// # Errors
    ///
    /// Returns a `Configuration` error for fewer than two objectives or fewer
    /// than two subproblems.
    pub fn new(num_objectives: usize, population_size: usize) -> Result<Self> {
        if num_objectives < 2 {
            return Err(MoeadError::Configuration(format!(
                "at least two objectives are required, got {}",
                num_objectives
            )));
        }
        if population_size < 2 {
            return Err(MoeadError::Configuration(format!(
                "population size must be at least 2, got {}",
                population_size
            )));
        }
        Ok(Self {
            num_objectives,
            population_size,
        })
    }

    pub fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<WeightVectors> {
        if self.num_objectives == 2 {
            return Ok(WeightVectors {
                vectors: evenly_spaced(self.population_size),
            });
        }

        let granularity = lattice_granularity(self.num_objectives, self.population_size)?;
        debug!(
            num_objectives = self.num_objectives,
            population_size = self.population_size,
            granularity,
            "Sampling weight vectors from simplex lattice"
        );

        let mut candidates = simplex_lattice(self.num_objectives, granularity);
        // Sums are 1 up to rounding, so this ordering only moves vectors whose
        // floating point sums differ in the last bits.
        candidates.sort_by(|a, b| {
            let sum_a: f64 = a.iter().sum();
            let sum_b: f64 = b.iter().sum();
            sum_b.total_cmp(&sum_a)
        });

        Ok(WeightVectors {
            vectors: rng.sample(&candidates, self.population_size),
        })
    }
}

fn evenly_spaced(population_size: usize) -> Vec<Vec<f64>> {
    let last = (population_size - 1) as f64;
    (0..population_size)
        .map(|n| {
            let a = n as f64 / last;
            vec![a, 1.0 - a]
        })
        .collect()
}

/// Number of simplex lattice points with denominator `granularity`,
/// `C(granularity + m - 1, m - 1)`. `None` on overflow.
pub fn lattice_point_count(num_objectives: usize, granularity: usize) -> Option<u128> {
    let k = num_objectives.checked_sub(1)? as u128;
    let n = granularity as u128 + k;
    let mut count: u128 = 1;
    for i in 1..=k {
        // count * (n - k + i) is divisible by i at every step
        count = count.checked_mul(n - k + i)? / i;
    }
    Some(count)
}

/// Smallest lattice granularity with at least `population_size` points.
pub fn lattice_granularity(num_objectives: usize, population_size: usize) -> Result<usize> {
    for granularity in 1..=population_size {
        match lattice_point_count(num_objectives, granularity) {
            Some(count) if count < population_size as u128 => continue,
            _ => return Ok(granularity),
        }
    }
    Err(MoeadError::Configuration(format!(
        "no simplex lattice over {} objectives has {} points",
        num_objectives, population_size
    )))
}

/// All points `(c_1/p, ..., c_m/p)` with non-negative integers summing to `p`.
fn simplex_lattice(num_objectives: usize, granularity: usize) -> Vec<Vec<f64>> {
    fn fill(
        points: &mut Vec<Vec<f64>>,
        current: &mut Vec<usize>,
        num_objectives: usize,
        remaining: usize,
        granularity: usize,
    ) {
        if current.len() + 1 == num_objectives {
            current.push(remaining);
            points.push(
                current
                    .iter()
                    .map(|&c| c as f64 / granularity as f64)
                    .collect(),
            );
            current.pop();
            return;
        }
        for c in 0..=remaining {
            current.push(c);
            fill(points, current, num_objectives, remaining - c, granularity);
            current.pop();
        }
    }

    let mut points = Vec::new();
    let mut current = Vec::with_capacity(num_objectives);
    fill(
        &mut points,
        &mut current,
        num_objectives,
        granularity,
        granularity,
    );
    points
}
