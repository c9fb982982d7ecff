//! Criterion microbenches for polynomial root finding.
//!
//! - Closed forms (degree 3 and 4) against bisection (degree 6).
//! - Sturm root counting.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use physutil::api::Polynomial;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Monic polynomial with `k` real roots drawn from `[-4, 4]`.
fn random_product(rng: &mut StdRng, k: usize) -> Polynomial<f64> {
    (0..k).fold(Polynomial::new([1.0]), |p, _| {
        p * Polynomial::new([-rng.gen_range(-4.0..4.0), 1.0])
    })
}

fn bench_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("poly");
    let mut rng = StdRng::seed_from_u64(12345);
    for k in [3usize, 4, 6] {
        group.bench_function(BenchmarkId::new("find_roots", k), |b| {
            b.iter_batched(
                || random_product(&mut rng, k),
                |p| {
                    let _ = p.find_roots(-5.0, 5.0);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function(BenchmarkId::new("num_roots", 6), |b| {
        b.iter_batched(
            || random_product(&mut rng, 6),
            |p| {
                let _ = p.num_roots(-5.0, 5.0);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_roots);
criterion_main!(benches);
