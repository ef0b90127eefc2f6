use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moead::{
    decomposition::{NeighborhoodIndex, WeightVectorGenerator},
    rng::RandomNumberGenerator,
};

fn bench_weight_generation(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(42);

    let mut group = c.benchmark_group("weight_generation");
    for objectives in [2, 3, 5].iter() {
        let generator = WeightVectorGenerator::new(*objectives, 300).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(objectives),
            objectives,
            |b, _| {
                b.iter(|| {
                    let weights = generator.generate(black_box(&mut rng));
                    assert!(weights.is_ok());
                })
            },
        );
    }
    group.finish();
}

fn bench_neighborhoods(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(42);

    let mut group = c.benchmark_group("neighborhoods");
    for size in [100, 500, 2000].iter() {
        let weights = WeightVectorGenerator::new(3, *size)
            .unwrap()
            .generate(&mut rng)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| NeighborhoodIndex::build(black_box(&weights), 20, usize::MAX).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| NeighborhoodIndex::build(black_box(&weights), 20, 1).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_weight_generation, bench_neighborhoods);
criterion_main!(benches);
