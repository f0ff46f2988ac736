use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dialog_lazy_tree::Tree;
use rand::{Rng, SeedableRng, rngs::StdRng};

const BENCH_SEED: u64 = 42;

fn random_keys(rng: &mut StdRng, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.r#gen()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);

    for size in [10, 100, 1000, 10000] {
        let keys = random_keys(&mut rng, size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut tree = Tree::new();
                for key in keys.iter() {
                    tree.insert(*key);
                }
                tree
            });
        });
    }

    group.finish();
}

fn bench_resurrect(c: &mut Criterion) {
    let mut group = c.benchmark_group("resurrect");
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);

    for size in [10, 100, 1000, 10000] {
        let keys = random_keys(&mut rng, size);

        // Setup: every key present as a tombstone
        let mut tombstoned: Tree<u64> = keys.iter().copied().collect();
        for key in keys.iter() {
            tombstoned.remove_soft(key);
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter_batched(
                || tombstoned.clone(),
                |mut tree| {
                    for key in keys.iter() {
                        tree.insert(*key);
                    }
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_resurrect);
criterion_main!(benches);
