use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use almagest::planets::{Dimension, Planet, Vsop87d};

/// Random instants between 1000 and 3000 AD
fn random_jds(rng: &mut StdRng, samples: usize) -> Vec<f64> {
    (0..samples)
        .map(|_| rng.random_range(2086302.5..2816787.5))
        .collect()
}

fn bench_single_planet(c: &mut Criterion) {
    let vsop = Vsop87d::abridged();
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    for planet in [Planet::Mercury, Planet::Earth, Planet::Neptune] {
        c.bench_function(&format!("vsop87d_dimension/{}", planet.name()), |b| {
            b.iter_batched(
                || random_jds(&mut rng, 1_000),
                |jds| {
                    for jd in jds {
                        black_box(vsop.dimension3(black_box(jd), planet));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// Same workload through the batch combinator (parallel with `--features parallel`)
fn bench_batch(c: &mut Criterion) {
    let vsop = Vsop87d::abridged();
    let mut rng = StdRng::seed_from_u64(0xBADF00D);

    c.bench_function("vsop87d_dimension/batch_earth_longitude", |b| {
        b.iter_batched(
            || random_jds(&mut rng, 10_000),
            |jds| black_box(vsop.dimension_batch(&jds, Planet::Earth, Dimension::Longitude)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_single_planet, bench_batch
);
criterion_main!(benches);
