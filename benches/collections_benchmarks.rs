use std::hint::black_box;

use bucket_list::{BuildNullHasher, HashTable, LinkedList};
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;

const SIZES: &[usize] = &[100, 1000, 10000];

fn bench_table_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_insert");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        // a quarter as many buckets as keys, so every bucket chains a few
        group.bench_with_input(BenchmarkId::new("random_state", size), &size, |b, &size| {
            b.iter(|| {
                let mut table = HashTable::with_capacity(size / 4);
                for i in 0..size {
                    table.insert(black_box(i), black_box(i * 2));
                }
                table
            })
        });

        group.bench_with_input(BenchmarkId::new("null_hasher", size), &size, |b, &size| {
            b.iter(|| {
                let mut table = HashTable::with_capacity_and_hash_builder(size / 4, BuildNullHasher);
                for i in 0..size {
                    table.insert(black_box(i), black_box(i * 2));
                }
                table
            })
        });
    }

    group.finish();
}

fn bench_table_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_get");

    for &size in SIZES {
        let mut table = HashTable::with_capacity(size / 4);
        for i in 0..size {
            table.insert(i, i);
        }

        let access_keys: Vec<usize> = (0..100).map(|_| rand::random_range(0..size)).collect();
        group.throughput(criterion::Throughput::Elements(access_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("random_state", size), &size, |b, _| {
            b.iter(|| {
                for k in &access_keys {
                    black_box(table.get(k));
                }
            })
        });
    }

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("insert_in_front", size), &size, |b, &size| {
            b.iter(|| {
                let mut list = LinkedList::with_capacity(size);
                for i in 0..size {
                    list.insert_in_front(black_box(i));
                }
                list
            })
        });

        group.bench_with_input(BenchmarkId::new("collect", size), &size, |b, &size| {
            b.iter(|| (0..size).map(black_box).collect::<LinkedList<_>>())
        });

        let list: LinkedList<usize> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("reverse", size), &size, |b, _| {
            b.iter_batched(
                || list.clone(),
                |mut list| {
                    list.reverse();
                    list
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("remove_first", size), &size, |b, _| {
            b.iter_batched(
                || list.clone(),
                |mut list| {
                    while let Some(v) = list.remove_first() {
                        black_box(v);
                    }
                    list
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table_insert, bench_table_get, bench_list);
criterion_main!(benches);
