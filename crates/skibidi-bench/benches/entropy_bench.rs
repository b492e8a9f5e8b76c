//! Generator step benchmarks.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use skibidi_core::EntropySource;

fn bench_entropy(c: &mut Criterion) {
    let mut group = c.benchmark_group("entropy");

    group.throughput(Throughput::Elements(1));
    group.bench_function("draw", |b| {
        let mut src = EntropySource::from_seed(1);
        b.iter(|| black_box(src.draw()));
    });
    group.bench_function("next_u64", |b| {
        let mut src = EntropySource::from_seed(1);
        b.iter(|| black_box(src.next_u64()));
    });

    group.throughput(Throughput::Elements(4));
    group.bench_function("draw4", |b| {
        let mut src = EntropySource::from_seed(1);
        b.iter(|| black_box(src.draw4()));
    });
    group.finish();
}

fn bench_seeding(c: &mut Criterion) {
    c.bench_function("from_seed", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(EntropySource::from_seed(seed))
        });
    });
}

criterion_group!(benches, bench_entropy, bench_seeding);
criterion_main!(benches);
