use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use natla::structures::{gb, ge, tp, vctr};
use natla::{
    map_vector, Args, BackendKind, MapMode, MapOptions, NativeBackend, Registry, Shape,
    ThreadingHooks,
};

fn registry() -> Registry {
    Registry::from_backend(NativeBackend::new(
        BackendKind::OpenBlas,
        "bench",
        ThreadingHooks::in_memory(false),
    ))
}

fn bench_resolve(c: &mut Criterion) {
    let registry = registry();
    let mut group = c.benchmark_group("resolve");
    for tag in ["float32", "double", "uint8"] {
        group.bench_with_input(BenchmarkId::from_parameter(tag), &tag, |b, &tag| {
            b.iter(|| registry.resolve(black_box(tag)));
        });
    }
    group.bench_function("typed", |b| b.iter(|| registry.factory::<f64>().map(|f| f.backend())));
    group.finish();
}

fn bench_structures(c: &mut Criterion) {
    let registry = registry();
    let factory = registry.factory::<f64>().unwrap();
    let mut group = c.benchmark_group("structures");
    for &n in &[16usize, 128, 1024] {
        let values: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.001).sin()).collect();
        group.bench_with_input(BenchmarkId::new("ge", n), &n, |b, &n| {
            b.iter(|| ge(factory, (Shape::general(n, n), values.clone())));
        });
        group.bench_with_input(BenchmarkId::new("gb", n), &n, |b, &n| {
            b.iter(|| gb(factory, Shape::banded(n, n, 2, 2)));
        });
        group.bench_with_input(BenchmarkId::new("tp", n), &n, |b, &n| {
            b.iter(|| tp(factory, Args::new(Shape::square(n)).with_fill(1.0)));
        });
        group.bench_with_input(BenchmarkId::new("vctr", n), &n, |b, &n| {
            b.iter(|| vctr(factory, n));
        });
    }
    group.finish();
}

fn bench_mapping(c: &mut Criterion) {
    let registry = registry();
    let factory = registry.factory::<f32>().unwrap();
    let mut group = c.benchmark_group("map_vector");
    for &n in &[1usize << 10, 1 << 16, 1 << 20] {
        let values: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytemuck::cast_slice(&values)).unwrap();
        file.flush().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let v = map_vector(
                    factory,
                    file.as_file(),
                    MapOptions::new().with_mode(MapMode::ReadOnly),
                )
                .unwrap();
                black_box(v.as_slice().iter().sum::<f32>())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_structures, bench_mapping);
criterion_main!(benches);
