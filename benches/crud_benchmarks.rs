use btree_bag::BTreeBag;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

const N: usize = 10_000;
const ORDER: usize = 64;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence with repeats.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 0x5eed;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push(((x >> 33) % (n as u64)) as i64);
    }
    keys
}

fn loaded_bag(keys: &[i64]) -> BTreeBag {
    let mut bag = BTreeBag::new(ORDER).unwrap();
    for &key in keys {
        bag.insert(key);
    }
    bag
}

// The std baseline models the same multiset as key -> occurrence count.
fn loaded_map(keys: &[i64]) -> BTreeMap<i64, usize> {
    let mut map = BTreeMap::new();
    for &key in keys {
        *map.entry(key).or_insert(0usize) += 1;
    }
    map
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("BTreeBag", N), |b| {
        b.iter(|| loaded_bag(&keys));
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| loaded_map(&keys));
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("BTreeBag", N), |b| {
        b.iter(|| loaded_bag(&keys));
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| loaded_map(&keys));
    });

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let bag = loaded_bag(&keys);
    let map = loaded_map(&keys);
    let probes = random_keys(N);
    let mut group = c.benchmark_group("contains");

    group.bench_function(BenchmarkId::new("BTreeBag", N), |b| {
        b.iter(|| probes.iter().filter(|&&key| bag.contains(key)).count());
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| probes.iter().filter(|&&key| map.contains_key(key)).count());
    });

    group.finish();
}

// ─── Mixed churn ────────────────────────────────────────────────────────────

fn bench_churn(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_then_delete_all");

    group.bench_function(BenchmarkId::new("BTreeBag", N), |b| {
        b.iter(|| {
            let mut bag = loaded_bag(&keys);
            for &key in &keys {
                bag.remove(key);
            }
            bag
        });
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = loaded_map(&keys);
            for &key in &keys {
                if let Some(count) = map.get_mut(&key) {
                    *count -= 1;
                    if *count == 0 {
                        map.remove(&key);
                    }
                }
            }
            map
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert_ordered, bench_insert_random, bench_contains, bench_churn);
criterion_main!(benches);
