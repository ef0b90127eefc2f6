use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use super::options::{MoeadOptions, MATING_PARENTS};
use crate::{
    archive::{Archive, NoArchive},
    decomposition::{
        tchebycheff, IdealPoint, NeighborhoodIndex, Subproblems, WeightVectorGenerator,
        WeightVectors,
    },
    error::{MoeadError, OptionExt, Result},
    individual::{Individual, Population, SubproblemId},
    problem::Problem,
    rng::RandomNumberGenerator,
    selection::{MatingSelector, ReplacementUpdater},
    variation::{Bounds, Variation},
};

/// Lifecycle of an engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initialized => "initialized",
            EngineState::Running => "running",
            EngineState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Summary of one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Index of the generation, starting at 0.
    pub generation: usize,
    /// Evaluations consumed since initialization.
    pub evaluations: usize,
    /// Slots overwritten during this generation.
    pub replacements: usize,
    /// Ideal point after the generation.
    pub ideal_point: Vec<f64>,
    /// Whether the budget was reached by the end of this generation.
    pub terminated: bool,
}

/// Everything that only exists once the engine has been initialized.
#[derive(Debug, Clone)]
struct Run {
    subproblems: Subproblems,
    population: Population,
    ideal: IdealPoint,
}

/// MOEA/D engine with Tchebycheff decomposition.
///
/// Owns the population, the ideal point and the random number generator.
/// Collaborators only ever see decision vectors or read-only views of the
/// population.
///
/// Build one with [`MoeadBuilder`](super::MoeadBuilder), seed it with
/// [`initialize`](Moead::initialize) or
/// [`initialize_uniform`](Moead::initialize_uniform), then call
/// [`step`](Moead::step) or [`run`](Moead::run).
pub struct Moead<P, V, A = NoArchive>
where
    P: Problem,
    V: Variation,
    A: Archive,
{
    options: MoeadOptions,
    problem: P,
    variation: V,
    archive: A,
    mating: MatingSelector,
    replacement: ReplacementUpdater,
    rng: RandomNumberGenerator,
    state: EngineState,
    active: Option<Run>,
    evaluations: usize,
    generation: usize,
}

impl<P, V, A> Moead<P, V, A>
where
    P: Problem,
    V: Variation,
    A: Archive,
{
    /// Creates an uninitialized engine.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `options` fail validation.
    pub fn new(options: MoeadOptions, problem: P, variation: V, archive: A) -> Result<Self> {
        options.validate()?;
        if problem.num_objectives() < 2 {
            return Err(MoeadError::Configuration(format!(
                "problem must have at least two objectives, got {}",
                problem.num_objectives()
            )));
        }

        let mating = MatingSelector::new(options.get_delta())?;
        let replacement = ReplacementUpdater::new(options.get_max_replacements())?;
        let rng = match options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        Ok(Self {
            options,
            problem,
            variation,
            archive,
            mating,
            replacement,
            rng,
            state: EngineState::Uninitialized,
            active: None,
            evaluations: 0,
            generation: 0,
        })
    }

    /// Seeds the engine with one individual per subproblem.
    ///
    /// Unevaluated members are evaluated here; these evaluations are not
    /// charged to the budget. Weight vectors, neighborhoods and the ideal
    /// point are set up from the seed.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the engine was already initialized
    /// - `Configuration` if the seed size differs from the population size,
    ///   or weights and neighborhoods cannot be built
    /// - `Evaluation` or `DimensionMismatch` if a seed member cannot be
    ///   evaluated or carries malformed objectives
    #[instrument(level = "debug", skip_all, fields(seed_size = seed.len()))]
    pub fn initialize(&mut self, seed: Vec<Individual>) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(MoeadError::InvalidState(format!(
                "cannot initialize an engine that is {}",
                self.state
            )));
        }

        let population_size = self.options.get_population_size();
        if seed.len() != population_size {
            return Err(MoeadError::Configuration(format!(
                "seed population has {} members, expected {}",
                seed.len(),
                population_size
            )));
        }

        let problem = &self.problem;
        let members: Vec<Individual> = if seed.len() >= self.options.get_parallel_threshold() {
            seed.into_par_iter()
                .map(|member| evaluate_member(problem, member))
                .collect::<Result<_>>()?
        } else {
            seed.into_iter()
                .map(|member| evaluate_member(problem, member))
                .collect::<Result<_>>()?
        };

        let num_objectives = self.problem.num_objectives();
        let weights =
            WeightVectorGenerator::new(num_objectives, population_size)?.generate(&mut self.rng)?;
        let subproblems = Subproblems::build(
            weights,
            self.options.get_neighborhood_size(),
            self.options.get_parallel_threshold(),
        )?;

        let mut ideal = IdealPoint::new(num_objectives);
        for member in &members {
            ideal.update(member.require_objectives()?)?;
        }

        info!(
            population_size,
            num_objectives,
            neighborhood_size = self.options.get_neighborhood_size(),
            evaluation_budget = self.options.evaluation_budget(),
            "MOEA/D engine initialized"
        );

        self.active = Some(Run {
            subproblems,
            population: Population::new(members)?,
            ideal,
        });
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Seeds the engine with members drawn uniformly from
    /// `[lower, upper]^num_variables` using the engine's generator.
    pub fn initialize_uniform(&mut self, num_variables: usize, lower: f64, upper: f64) -> Result<()> {
        if num_variables == 0 {
            return Err(MoeadError::Configuration(
                "individuals need at least one decision variable".to_string(),
            ));
        }
        let bounds = Bounds::new(lower, upper)?;

        let seed = (0..self.options.get_population_size())
            .map(|_| {
                let variables = (0..num_variables)
                    .map(|_| self.rng.gen_range(bounds.lower()..=bounds.upper()))
                    .collect();
                Individual::new(variables)
            })
            .collect();
        self.initialize(seed)
    }

    /// Runs one generation: every subproblem is visited once, in a fresh
    /// random order.
    ///
    /// Replacements made for one subproblem are visible to the subproblems
    /// visited after it. The budget is only checked between generations: a
    /// generation that starts below the budget always finishes, and the
    /// engine terminates once the counter has reached the budget.
    ///
    /// # Errors
    ///
    /// - `InvalidState` before initialization or after termination
    /// - any collaborator failure, which also terminates the engine
    pub fn step(&mut self) -> Result<GenerationReport> {
        match self.state {
            EngineState::Uninitialized => {
                return Err(MoeadError::InvalidState(
                    "engine must be initialized before stepping".to_string(),
                ))
            }
            EngineState::Terminated => {
                return Err(MoeadError::InvalidState(
                    "engine has already terminated".to_string(),
                ))
            }
            EngineState::Initialized | EngineState::Running => {}
        }

        self.state = EngineState::Running;
        let report = self.run_generation();
        match &report {
            Ok(report) if report.terminated => {
                info!(
                    generations = self.generation,
                    evaluations = self.evaluations,
                    "evaluation budget exhausted"
                );
                self.state = EngineState::Terminated;
            }
            Ok(_) => {}
            Err(e) => {
                info!(generation = self.generation, error = %e, "run aborted");
                self.state = EngineState::Terminated;
            }
        }
        report
    }

    /// Steps until the budget is spent and returns the final population.
    #[instrument(level = "debug", skip_all, fields(budget = self.options.evaluation_budget()))]
    pub fn run(&mut self) -> Result<&Population> {
        if self.state == EngineState::Uninitialized {
            return Err(MoeadError::InvalidState(
                "engine must be initialized before running".to_string(),
            ));
        }
        while self.state != EngineState::Terminated {
            self.step()?;
        }
        self.population()
            .ok_or_else_moead(|| MoeadError::InvalidState("population missing".to_string()))
    }

    fn run_generation(&mut self) -> Result<GenerationReport> {
        let budget = self.options.evaluation_budget();
        let run = self
            .active
            .as_mut()
            .ok_or_else_moead(|| MoeadError::InvalidState("engine has no population".to_string()))?;

        if self.evaluations >= budget {
            return Err(MoeadError::InvalidState(
                "evaluation budget already spent".to_string(),
            ));
        }

        let mut replacements = 0;
        let order = self.rng.permutation(run.population.len());

        for index in order {
            let id = SubproblemId::new(index);
            let scope = self.mating.choose_scope(&mut self.rng);
            let parents = self.mating.select(
                run.subproblems.neighborhoods(),
                id,
                MATING_PARENTS,
                scope,
                &mut self.rng,
            )?;

            let children = self.variation.crossover(
                run.population[parents[0]].variables(),
                run.population[parents[1]].variables(),
                &mut self.rng,
            );
            if children.is_empty() {
                return Err(MoeadError::Variation(format!(
                    "crossover produced no offspring for subproblem {}",
                    id
                )));
            }
            let children: Vec<Vec<f64>> = children
                .into_iter()
                .map(|child| self.variation.mutate(child, &mut self.rng))
                .collect();

            for variables in children {
                let objectives = evaluate_objectives(&self.problem, &variables)?;
                self.evaluations += 1;
                run.ideal.update(&objectives)?;

                let offspring = Individual::evaluated(variables, objectives);
                let outcome = self.replacement.apply(
                    &offspring,
                    id,
                    scope,
                    &run.subproblems,
                    &run.ideal,
                    &mut run.population,
                    &mut self.rng,
                )?;
                replacements += outcome.replaced;

                if outcome.saturated {
                    debug!(
                        subproblem = %id,
                        scope = ?scope,
                        replaced = outcome.replaced,
                        "replacement cap reached"
                    );
                    self.archive.update(run.population.members());
                }
            }
        }

        let report = GenerationReport {
            generation: self.generation,
            evaluations: self.evaluations,
            replacements,
            ideal_point: run.ideal.coordinates().to_vec(),
            terminated: self.evaluations >= budget,
        };
        info!(
            generation = report.generation,
            evaluations = report.evaluations,
            replacements = report.replacements,
            ideal_point = ?report.ideal_point,
            "generation complete"
        );
        self.generation += 1;
        Ok(report)
    }

    /// Sum of the Tchebycheff scores of `individuals`, member `i` scored
    /// under weight vector `i` and the current ideal point.
    ///
    /// # Errors
    ///
    /// - `InvalidState` before initialization or for unevaluated members
    /// - `DimensionMismatch` if `individuals` is not one per subproblem
    pub fn scalarized_fitness_sum(&self, individuals: &[Individual]) -> Result<f64> {
        let run = self.active.as_ref().ok_or_else_moead(|| {
            MoeadError::InvalidState("engine must be initialized first".to_string())
        })?;
        if individuals.len() != run.subproblems.len() {
            return Err(MoeadError::DimensionMismatch {
                expected: run.subproblems.len(),
                got: individuals.len(),
            });
        }

        individuals
            .iter()
            .zip(run.subproblems.weights().iter())
            .try_fold(0.0, |acc, (member, (_, weights))| {
                let objectives = member.require_objectives()?;
                Ok(acc + tchebycheff(objectives, weights, run.ideal.coordinates()))
            })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn options(&self) -> &MoeadOptions {
        &self.options
    }

    pub fn population(&self) -> Option<&Population> {
        self.active.as_ref().map(|run| &run.population)
    }

    pub fn weights(&self) -> Option<&WeightVectors> {
        self.active.as_ref().map(|run| run.subproblems.weights())
    }

    pub fn neighborhoods(&self) -> Option<&NeighborhoodIndex> {
        self.active.as_ref().map(|run| run.subproblems.neighborhoods())
    }

    pub fn ideal_point(&self) -> Option<&IdealPoint> {
        self.active.as_ref().map(|run| &run.ideal)
    }

    /// Offspring evaluations consumed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn evaluation_budget(&self) -> usize {
        self.options.evaluation_budget()
    }

    /// Number of generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn into_population(self) -> Option<Population> {
        self.active.map(|run| run.population)
    }
}

impl<P, V, A> fmt::Debug for Moead<P, V, A>
where
    P: Problem,
    V: Variation,
    A: Archive,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Moead")
            .field("options", &self.options)
            .field("variation", &self.variation)
            .field("state", &self.state)
            .field("evaluations", &self.evaluations)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Evaluates `variables`, rejecting malformed objective vectors.
fn evaluate_objectives<P: Problem>(problem: &P, variables: &[f64]) -> Result<Vec<f64>> {
    let objectives = problem.evaluate(variables)?;
    check_objectives(problem.num_objectives(), &objectives)?;
    Ok(objectives)
}

fn check_objectives(expected: usize, objectives: &[f64]) -> Result<()> {
    if objectives.len() != expected {
        return Err(MoeadError::DimensionMismatch {
            expected,
            got: objectives.len(),
        });
    }
    if let Some(value) = objectives.iter().find(|value| !value.is_finite()) {
        return Err(MoeadError::Evaluation(format!(
            "non-finite objective value {}",
            value
        )));
    }
    Ok(())
}

fn evaluate_member<P: Problem>(problem: &P, member: Individual) -> Result<Individual> {
    match member.objectives() {
        Some(objectives) => {
            check_objectives(problem.num_objectives(), objectives)?;
            Ok(member)
        }
        None => {
            let objectives = evaluate_objectives(problem, member.variables())?;
            Ok(Individual::evaluated(member.into_variables(), objectives))
        }
    }
}
