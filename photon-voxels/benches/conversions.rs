#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use photon_voxels::{Axis, Position, VoxelGrid, VoxelId};

fn detector_grid() -> VoxelGrid {
    VoxelGrid::from_ranges(
        [74, 77, 394],
        [[-370.0, 370.0], [-385.0, 385.0], [-1970.0, 1970.0]],
    )
    .unwrap()
}

/// Deterministic scatter of positions, partly outside the grid so that clamping is exercised.
fn scattered_positions(count: usize) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            Position::new(
                (t * 17.0).sin() * 400.0,
                (t * 29.0).cos() * 400.0,
                (t * 2.0 - 1.0) * 2000.0,
            )
        })
        .collect()
}

pub fn single_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");
    let grid = detector_grid();

    group.bench_function("coord_to_voxel_id", |b| {
        b.iter(|| grid.coord_to_voxel_id(black_box(Position::new(12.5, -300.0, 1000.0))))
    });
    group.bench_function("voxel_id_to_coord", |b| {
        b.iter(|| grid.voxel_id_to_coord(black_box(1_000_000)))
    });
    group.bench_function("voxel_id_to_index", |b| {
        b.iter(|| grid.voxel_id_to_index(black_box(1_000_000)))
    });
    group.bench_function("digitize", |b| {
        b.iter(|| grid.digitize(black_box(1234.5), Axis::Z))
    });

    group.finish();
}

pub fn batch_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let grid = detector_grid();

    for count in [100, 10_000] {
        let positions = scattered_positions(count);
        let ids = (0..count as VoxelId).collect::<Vec<_>>();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("coord_to_voxel_id_batch", count),
            &positions,
            |b, positions| b.iter(|| grid.coord_to_voxel_id_batch(black_box(positions))),
        );
        group.bench_with_input(
            BenchmarkId::new("voxel_id_to_coord_batch", count),
            &ids,
            |b, ids| b.iter(|| grid.voxel_id_to_coord_batch(black_box(ids))),
        );
        group.bench_with_input(
            BenchmarkId::new("normalize_batch", count),
            &positions,
            |b, positions| b.iter(|| grid.normalize_batch(black_box(positions))),
        );
    }

    group.finish();
}

pub fn slice_bench(c: &mut Criterion) {
    let grid = detector_grid();
    c.bench_function("indices_on_slice z", |b| {
        b.iter(|| {
            grid.indices_on_slice(Axis::Z, black_box(200))
                .unwrap()
                .map(|index| grid.index_to_voxel_id(index))
                .sum::<VoxelId>()
        })
    });
}

criterion_group!(benches, single_bench, batch_bench, slice_bench);
criterion_main!(benches);
