//! Benchmarks for text emission and mesh rebuilds

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pixelprint_core::{OverlayMesh, TextBatch};

const LINE: &str = "pos (12.50, -3.25) vel 0.98 state=RUNNING {ok}";

fn bench_push_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_text");

    for lines in [1, 10, 100] {
        group.throughput(Throughput::Elements((lines * LINE.len()) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut batch = TextBatch::new();
            b.iter(|| {
                batch.clear();
                for i in 0..lines {
                    batch.push_text(0, (i * 8) as i32, black_box(LINE), 1);
                }
                batch.quad_count()
            });
        });
    }

    group.finish();
}

fn bench_mesh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");

    for lines in [10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut batch = TextBatch::new();
            let mut mesh = OverlayMesh::new();
            b.iter(|| {
                batch.clear();
                for i in 0..lines {
                    batch.push_text(0, (i * 8) as i32, LINE, 2);
                }
                mesh.build(black_box(&mut batch))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push_text, bench_mesh_build);
criterion_main!(benches);
