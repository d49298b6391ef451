use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use aquareg_core::PageRequest;
use aquareg_infra::{
    InMemoryRecordStore, InMemorySearchIndex, MirroredStore, RecordStore, SequentialAllocator,
};
use aquareg_records::Commune;

fn commune(n: usize) -> Commune {
    let mut commune = Commune::new(format!("Commune {n}"), format!("C-{n:05}"));
    commune.population = Some((n as i64) * 100);
    commune
}

type Service = MirroredStore<Commune, InMemoryRecordStore<Commune>, InMemorySearchIndex<Commune>>;

fn mirrored() -> Service {
    MirroredStore::new(
        InMemoryRecordStore::with_allocator(Arc::new(SequentialAllocator::new())),
        InMemorySearchIndex::new(),
    )
}

/// Cost of the dual write vs a bare primary-store save.
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.throughput(Throughput::Elements(1));

    group.bench_function("primary_only", |b| {
        let store: InMemoryRecordStore<Commune> =
            InMemoryRecordStore::with_allocator(Arc::new(SequentialAllocator::new()));
        let mut n = 0usize;
        b.iter(|| {
            n += 1;
            black_box(store.save(commune(n)).unwrap());
        });
    });

    group.bench_function("mirrored", |b| {
        let svc = mirrored();
        let mut n = 0usize;
        b.iter(|| {
            n += 1;
            black_box(svc.create(commune(n)).unwrap());
        });
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100usize, 1_000, 10_000] {
        let svc = mirrored();
        for n in 0..size {
            svc.create(commune(n)).unwrap();
        }
        let request = PageRequest::default();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("field_term", size), &size, |b, _| {
            b.iter(|| black_box(svc.search("code:C-000", &request).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("boolean", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    svc.search("name:commune AND NOT code:C-00001", &request)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create, bench_search);
criterion_main!(benches);
