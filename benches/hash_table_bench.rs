use chain_hashtable::{Djb2, HashTable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize, capacity: usize) -> (HashTable<u64>, Vec<String>) {
    let mut t = HashTable::new(capacity).unwrap();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.put(k.as_str(), i as u64);
    }
    (t, keys)
}

// Separate chaining degrades with load factor; measure both ends.
fn bench_put(c: &mut Criterion) {
    c.bench_function("table::put_10k_into_16k_slots", |b| {
        b.iter_batched(
            || HashTable::<u64>::new(16_384).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.put(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("table::put_10k_into_8_slots", |b| {
        b.iter_batched(
            || HashTable::<u64>::new(8).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.put(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("table::put_10k_djb2", |b| {
        b.iter_batched(
            || HashTable::<u64, Djb2>::with_hasher(16_384, Djb2).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.put(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get(c: &mut Criterion) {
    c.bench_function("table::get_hit_10k_on_100k", |b| {
        let (t, keys) = filled(7, 100_000, 131_072);
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(t.get(k));
            }
        })
    });

    c.bench_function("table::get_miss_10k_on_100k", |b| {
        let (t, _) = filled(11, 100_000, 131_072);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(t.get(&k));
            }
        })
    });
}

fn bench_delete(c: &mut Criterion) {
    c.bench_function("table::delete_10k_of_100k", |b| {
        b.iter_batched(
            || {
                let (t, keys) = filled(5, 100_000, 65_536);
                let victims: Vec<String> = keys.into_iter().step_by(10).collect();
                (t, victims)
            },
            |(mut t, victims)| {
                for k in &victims {
                    let _ = t.delete(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_resize_and_iter(c: &mut Criterion) {
    c.bench_function("table::resize_100k_double", |b| {
        b.iter_batched(
            || filled(3, 100_000, 65_536).0,
            |mut t| {
                let cap = t.capacity();
                t.resize(cap * 2).unwrap();
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("table::iter_all_100k", |b| {
        let (t, _) = filled(999, 100_000, 65_536);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in t.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get, bench_delete, bench_resize_and_iter
}
criterion_main!(benches_put, benches_ops);
