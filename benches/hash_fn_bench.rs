use chain_hashtable::{djb2, fnv1};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_hash_fns(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_fn");
    for len in [8usize, 64, 1024] {
        let input: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("fnv1", len), &input, |b, input| {
            b.iter(|| fnv1(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("djb2", len), &input, |b, input| {
            b.iter(|| djb2(black_box(input)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hash_fns);
criterion_main!(benches);
