//! Benchmarks for track measurement, splitting and stitching.
//!
//! Run with: `cargo bench --bench stitch_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use track_editor::{DistanceUnit, GeoPoint, SplitAt, Stitcher, Track};

fn route(n: usize) -> Track {
    (0..n)
        .map(|i| {
            let t = i as f64;
            GeoPoint::new(45.0 + t * 0.0002, 7.0 + (t * 0.05).sin() * 0.001)
        })
        .collect()
}

/// Cut a route into `count` pieces and flip every other one.
fn fragments(route: &Track, count: usize) -> Vec<Track> {
    let step = route.len() / count;
    let mut rest = route.clone();
    let mut pieces = Vec::with_capacity(count);
    for k in (1..count).rev() {
        pieces.push(rest.split(SplitAt::Index(k * step), true).unwrap());
    }
    pieces.push(rest);
    for piece in pieces.iter_mut().step_by(2) {
        piece.reverse();
    }
    pieces
}

fn bench_length(c: &mut Criterion) {
    let track = route(10_000);
    c.bench_function("length_10k", |b| {
        b.iter(|| black_box(&track).length(DistanceUnit::Miles))
    });
    c.bench_function("split_by_distance_10k", |b| {
        b.iter(|| black_box(&track).split_by_distance(1.0, DistanceUnit::Kilometers))
    });
}

fn bench_stitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch");
    let track = route(20_000);
    let stitcher = Stitcher::new();

    for count in [10usize, 50, 200] {
        let pieces = fragments(&track, count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &pieces, |b, pieces| {
            b.iter(|| stitcher.stitch(pieces.clone()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_length, bench_stitch);
criterion_main!(benches);
