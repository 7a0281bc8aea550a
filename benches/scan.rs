use bucket_collider::{
    Alphabet, AddressMapper, Collider, Collision, CollisionTracker, Key, KeyHasher, KeySpace,
    MultiplicativeHash, TableGeometry,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::collections::HashMap;

fn random_keys(count: usize, length: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    let symbols = Alphabet::ascii_letters();
    (0..count)
        .map(|_| {
            (0..length)
                .map(|_| *symbols.symbols().choose(&mut rng).unwrap())
                .collect()
        })
        .collect()
}

fn bench_hash_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_key");
    let hash = MultiplicativeHash::default();

    for length in [2, 8, 64] {
        let keys = random_keys(1000, length);
        group.bench_with_input(BenchmarkId::new("multiplicative", length), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(hash.hash_key(key).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_first_wins_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_wins_insert");
    let hash = MultiplicativeHash::default();
    let geometry = TableGeometry::default();

    for size in [1000, 10_000, 100_000] {
        let entries: Vec<_> = random_keys(size, 6)
            .into_iter()
            .map(|key| {
                let address = geometry.address_of(hash.hash_key(&key).unwrap());
                (address, Key::new(key).unwrap())
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("CollisionTracker", size), &entries, |b, entries| {
            b.iter(|| {
                let mut tracker = CollisionTracker::new();
                for (address, key) in entries {
                    black_box(tracker.check_and_insert(*address, key.clone()));
                }
                black_box(tracker)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashMap", size), &entries, |b, entries| {
            b.iter(|| {
                let mut map = HashMap::new();
                for (address, key) in entries {
                    black_box(map.entry(*address).or_insert_with(|| key.clone()));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");

    for length in [2, 3] {
        let collider = Collider::with_parts(
            MultiplicativeHash::default(),
            TableGeometry::default(),
            KeySpace::new(Alphabet::ascii_letters(), length).unwrap(),
        );
        group.bench_with_input(BenchmarkId::new("letters", length), &collider, |b, collider| {
            b.iter(|| {
                let mut found: Vec<Collision> = Vec::new();
                black_box(collider.scan(&mut found).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hash_key, bench_first_wins_insert, bench_full_scan);

criterion_main!(benches);
