use moead::{
    decomposition::{NeighborhoodIndex, WeightVectorGenerator, WeightVectors},
    error::MoeadError,
    evolution::{EngineState, MoeadBuilder, MoeadOptions},
    individual::{Individual, SubproblemId},
    problem::Zdt1,
    rng::RandomNumberGenerator,
    selection::{MatingScope, MatingSelector, ReplacementUpdater},
    variation::{Bounds, PolynomialMutation, SimulatedBinaryCrossover, VariationPipeline},
};

type Pipeline = VariationPipeline<SimulatedBinaryCrossover, PolynomialMutation>;

fn unit_variation() -> Pipeline {
    VariationPipeline::sbx_polynomial(Bounds::new(0.0, 1.0).unwrap()).unwrap()
}

fn build_with(options: MoeadOptions) -> moead::Result<moead::Moead<Zdt1, Pipeline>> {
    MoeadBuilder::new()
        .with_options(options)
        .with_problem(Zdt1::new(5).unwrap())
        .with_variation(unit_variation())
        .build()
}

fn assert_configuration_error<T: std::fmt::Debug>(result: moead::Result<T>) {
    match result {
        Err(MoeadError::Configuration(_)) => {}
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn test_zero_budgets_are_rejected() {
    let options = MoeadOptions::builder()
        .population_size(20)
        .neighborhood_size(5)
        .num_generations(0)
        .max_evaluations(0)
        .build();
    assert_configuration_error(build_with(options));
}

#[test]
fn test_neighborhood_size_limits() {
    for size in [0, 1, 21] {
        let options = MoeadOptions::builder()
            .population_size(20)
            .neighborhood_size(size)
            .build();
        assert_configuration_error(build_with(options));
    }

    let options = MoeadOptions::builder()
        .population_size(20)
        .neighborhood_size(20)
        .build();
    assert!(build_with(options).is_ok());
}

#[test]
fn test_delta_and_replacement_cap_limits() {
    for delta in [-0.5, 1.01, f64::NAN] {
        let options = MoeadOptions::builder()
            .population_size(20)
            .neighborhood_size(5)
            .delta(delta)
            .build();
        assert_configuration_error(build_with(options));
    }

    let options = MoeadOptions::builder()
        .population_size(20)
        .neighborhood_size(5)
        .max_replacements(0)
        .build();
    assert_configuration_error(build_with(options));

    for delta in [0.0, 1.0] {
        let options = MoeadOptions::builder()
            .population_size(20)
            .neighborhood_size(5)
            .delta(delta)
            .build();
        assert!(build_with(options).is_ok());
    }
}

#[test]
fn test_tiny_population_is_rejected() {
    let options = MoeadOptions::builder()
        .population_size(1)
        .neighborhood_size(1)
        .build();
    assert_configuration_error(build_with(options));
}

#[test]
fn test_seed_size_must_match_population() {
    let options = MoeadOptions::builder()
        .population_size(10)
        .neighborhood_size(3)
        .build();
    let mut moead = build_with(options).unwrap();

    let seed = (0..9).map(|_| Individual::new(vec![0.5; 5])).collect();
    assert_configuration_error(moead.initialize(seed));
    assert_eq!(moead.state(), EngineState::Uninitialized);
}

#[test]
fn test_invalid_uniform_seed_bounds() {
    let options = MoeadOptions::builder()
        .population_size(10)
        .neighborhood_size(3)
        .build();
    let mut moead = build_with(options).unwrap();

    assert_configuration_error(moead.initialize_uniform(5, 1.0, 0.0));
    assert_configuration_error(moead.initialize_uniform(0, 0.0, 1.0));
}

#[test]
fn test_operations_before_initialization() {
    let options = MoeadOptions::builder()
        .population_size(10)
        .neighborhood_size(3)
        .build();
    let mut moead = build_with(options).unwrap();

    assert!(matches!(moead.step(), Err(MoeadError::InvalidState(_))));
    assert!(matches!(moead.run(), Err(MoeadError::InvalidState(_))));
    assert!(matches!(
        moead.scalarized_fitness_sum(&[]),
        Err(MoeadError::InvalidState(_))
    ));
    assert!(moead.population().is_none());
    assert!(moead.ideal_point().is_none());
}

#[test]
fn test_scalarized_sum_requires_one_member_per_subproblem() {
    let options = MoeadOptions::builder()
        .population_size(10)
        .neighborhood_size(3)
        .seed(5)
        .build();
    let mut moead = build_with(options).unwrap();
    moead.initialize_uniform(5, 0.0, 1.0).unwrap();

    let members = moead.population().unwrap().members().to_vec();
    assert!(moead.scalarized_fitness_sum(&members).is_ok());
    assert!(matches!(
        moead.scalarized_fitness_sum(&members[..4]),
        Err(MoeadError::DimensionMismatch {
            expected: 10,
            got: 4
        })
    ));
}

#[test]
fn test_selecting_more_parents_than_available() {
    let weights = WeightVectors::new(vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]]).unwrap();
    let neighborhoods = NeighborhoodIndex::build(&weights, 2, 1000).unwrap();
    let selector = MatingSelector::new(0.9).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(0);

    assert_configuration_error(selector.select(
        &neighborhoods,
        SubproblemId::new(1),
        3,
        MatingScope::Neighborhood,
        &mut rng,
    ));
    assert_configuration_error(selector.select(
        &neighborhoods,
        SubproblemId::new(1),
        4,
        MatingScope::Population,
        &mut rng,
    ));
    assert!(selector
        .select(
            &neighborhoods,
            SubproblemId::new(1),
            3,
            MatingScope::Population,
            &mut rng,
        )
        .is_ok());
}

#[test]
fn test_component_constructors_validate() {
    assert_configuration_error(MatingSelector::new(1.5));
    assert_configuration_error(ReplacementUpdater::new(0));
    assert_configuration_error(WeightVectorGenerator::new(1, 10));
    assert_configuration_error(WeightVectorGenerator::new(3, 1));
    assert_configuration_error(Bounds::new(0.0, 0.0));
}
