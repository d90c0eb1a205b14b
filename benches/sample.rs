use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rv_sampler::{
    metropolis_hastings, rejection_sample, Domain, GaussianWalk, RejectionSampler, UniformWalk,
};

fn normal(x: f64) -> f64 {
    (-0.5 * x * x).exp()
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("rejection triangular 1000", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(42),
            |mut rng| rejection_sample(|x: f64| 2. * x, 2., (0., 1.), black_box(1000), &mut rng),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("rejection normal loose bound 1000", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(42),
            |mut rng| rejection_sample(normal, black_box(10.), (-5., 5.), 1000, &mut rng),
            BatchSize::SmallInput,
        )
    });

    let domain = Domain::new(-5., 5.).unwrap();
    c.bench_function("rejection normal parallel 100000", |b| {
        b.iter(|| {
            let mut sampler = RejectionSampler::new(normal, 1., domain, Default::default());
            sampler.sample_parallel(42, black_box(100_000), 8)
        })
    });

    let gaussian = GaussianWalk::new(1.).unwrap();
    c.bench_function("metropolis gaussian walk 100x100", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(42),
            |mut rng| metropolis_hastings(normal, gaussian, 100, black_box(100), &mut rng),
            BatchSize::SmallInput,
        )
    });

    let uniform = UniformWalk::new(1.).unwrap();
    c.bench_function("metropolis uniform walk 100x100", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(42),
            |mut rng| metropolis_hastings(normal, uniform, 100, black_box(100), &mut rng),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
