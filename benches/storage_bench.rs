//! Benchmarks for segkv storage operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use segkv::{Engine, Entry};
use tempfile::TempDir;

const KEYS: usize = 1_000;

fn key(i: usize) -> String {
    format!("key{:06}", i)
}

fn filled_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::open_path(temp_dir.path()).unwrap();
    for i in 0..KEYS {
        engine.upsert(Entry::new(key(i), vec![b'v'; 64])).unwrap();
    }
    (temp_dir, engine)
}

fn storage_benchmarks(c: &mut Criterion) {
    c.bench_function("upsert", |b| {
        let (_temp, engine) = filled_engine();
        let mut i = 0usize;
        b.iter(|| {
            engine
                .upsert(Entry::new(key(i % KEYS), vec![b'x'; 64]))
                .unwrap();
            i += 1;
        });
    });

    c.bench_function("get_memory", |b| {
        let (_temp, engine) = filled_engine();
        b.iter(|| black_box(engine.get(key(KEYS / 2).as_bytes()).unwrap()));
    });

    c.bench_function("get_segment_scan", |b| {
        let (_temp, engine) = filled_engine();
        engine.flush().unwrap();
        b.iter(|| black_box(engine.get(key(KEYS - 1).as_bytes()).unwrap()));
    });

    c.bench_function("range_scan", |b| {
        let (_temp, engine) = filled_engine();
        b.iter(|| black_box(engine.all().count()));
    });

    c.bench_function("flush", |b| {
        b.iter_batched(
            filled_engine,
            |(_temp, engine)| engine.flush().unwrap(),
            BatchSize::PerIteration,
        );
    });
}

criterion_group!(benches, storage_benchmarks);
criterion_main!(benches);
