use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use suitevo::non_dominated_sorting::fast_non_dominated_sorting;

/// Random fitness matrix of shape `(population_size, n_obj)` with values in `[0, 100)`.
fn generate_population_fitness(population_size: usize, n_obj: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..population_size * n_obj)
        .map(|_| rng.random_range(0.0..100.0))
        .collect();
    Array2::from_shape_vec((population_size, n_obj), data)
        .expect("Error creating population fitness array")
}

fn bench_fast_non_dominated_sorting(c: &mut Criterion) {
    let population_size = 2000;
    let n_obj = 2;
    let seed = 42;
    let population_fitness = generate_population_fitness(population_size, n_obj, seed);
    let feasible = Array1::<f64>::zeros(population_size);

    c.bench_function("fast_non_dominated_sorting", |b| {
        b.iter(|| {
            let fronts =
                fast_non_dominated_sorting(black_box(&population_fitness), black_box(&feasible));
            black_box(fronts);
        })
    });

    // A quarter of the population violates its constraints.
    let violations = Array1::from_shape_fn(population_size, |i| {
        if i % 4 == 0 { (i % 7) as f64 } else { 0.0 }
    });
    c.bench_function("fast_non_dominated_sorting_constrained", |b| {
        b.iter(|| {
            let fronts =
                fast_non_dominated_sorting(black_box(&population_fitness), black_box(&violations));
            black_box(fronts);
        })
    });
}

criterion_group!(benches, bench_fast_non_dominated_sorting);
criterion_main!(benches);
