//! Batch throughput benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use skibidi_core::{Context, MAX_PHRASE_LEN, Tier};

fn bench_batch(c: &mut Criterion) {
    let counts: &[usize] = &[4, 64, 1024, 16_384];
    let ceiling = skibidi_runtime::host_ceiling();
    let mut group = c.benchmark_group("batch");

    for &count in counts {
        group.throughput(Throughput::Elements(count as u64));
        for tier in Tier::ALL.into_iter().filter(|&t| t <= ceiling) {
            let id = BenchmarkId::new(tier.name(), count);
            group.bench_with_input(id, &count, |b, &n| {
                let mut ctx = Context::new(0xBA7C4);
                let mut buf = vec![0u8; n * (MAX_PHRASE_LEN + 1) + 256];
                b.iter(|| black_box(ctx.generate_batch_on(tier, &mut buf, n, None)));
            });
        }
    }
    group.finish();
}

fn bench_single_vs_batch(c: &mut Criterion) {
    const N: usize = 1024;
    let mut group = c.benchmark_group("single_vs_batch");
    group.throughput(Throughput::Elements(N as u64));

    group.bench_function("single_loop", |b| {
        let mut ctx = Context::new(11);
        let mut buf = vec![0u8; N * (MAX_PHRASE_LEN + 1) + 64];
        b.iter(|| {
            let mut offset = 0;
            for _ in 0..N {
                if let Ok(len) = ctx.generate(&mut buf[offset..]) {
                    offset += len;
                    buf[offset] = b'\n';
                    offset += 1;
                }
            }
            black_box(offset)
        });
    });
    group.bench_function("batch", |b| {
        let mut ctx = Context::new(11);
        let mut buf = vec![0u8; N * (MAX_PHRASE_LEN + 1) + 256];
        b.iter(|| black_box(ctx.generate_batch(&mut buf, N, None)));
    });
    group.finish();
}

criterion_group!(benches, bench_batch, bench_single_vs_batch);
criterion_main!(benches);
