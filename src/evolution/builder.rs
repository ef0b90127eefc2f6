use crate::{
    archive::{Archive, NoArchive},
    error::{MoeadError, Result},
    problem::Problem,
    variation::Variation,
};

use super::{engine::Moead, options::MoeadOptions};

/// Fluent construction of a [`Moead`] engine.
///
/// Options, problem and variation are required. The archive defaults to
/// [`NoArchive`].
pub struct MoeadBuilder<P, V, A = NoArchive>
where
    P: Problem,
    V: Variation,
    A: Archive,
{
    options: Option<MoeadOptions>,
    problem: Option<P>,
    variation: Option<V>,
    archive: A,
}

impl<P, V> MoeadBuilder<P, V, NoArchive>
where
    P: Problem,
    V: Variation,
{
    pub fn new() -> Self {
        Self {
            options: None,
            problem: None,
            variation: None,
            archive: NoArchive,
        }
    }
}

impl<P, V, A> MoeadBuilder<P, V, A>
where
    P: Problem,
    V: Variation,
    A: Archive,
{
    pub fn with_options(mut self, options: MoeadOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_problem(mut self, problem: P) -> Self {
        self.problem = Some(problem);
        self
    }

    pub fn with_variation(mut self, variation: V) -> Self {
        self.variation = Some(variation);
        self
    }

    pub fn with_archive<B: Archive>(self, archive: B) -> MoeadBuilder<P, V, B> {
        MoeadBuilder {
            options: self.options,
            problem: self.problem,
            variation: self.variation,
            archive,
        }
    }

    pub fn build(self) -> Result<Moead<P, V, A>> {
        let options = self
            .options
            .ok_or_else(|| MoeadError::Configuration("Options not specified".to_string()))?;

        let problem = self
            .problem
            .ok_or_else(|| MoeadError::Configuration("Problem not specified".to_string()))?;

        let variation = self.variation.ok_or_else(|| {
            MoeadError::Configuration("Variation operators not specified".to_string())
        })?;

        Moead::new(options, problem, variation, self.archive)
    }
}

impl<P, V> Default for MoeadBuilder<P, V, NoArchive>
where
    P: Problem,
    V: Variation,
{
    fn default() -> Self {
        Self::new()
    }
}
