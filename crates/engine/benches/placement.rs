use blast_core::{template_by_name, Color, Grid, Pivot};
use blast_engine::{
    can_place, resolve_anchor, BatchGenerator, BatchPolicy, BoardMetrics, Point,
    DEFAULT_SNAP_DISTANCE,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Half-filled grid with scattered gaps.
fn cluttered(size: usize) -> Grid {
    let mut grid = Grid::new(size);
    for row in 0..size {
        for col in 0..size {
            if (row * 7 + col * 3) % 5 < 3 {
                grid.fill(row, col, Color::rgb(0x202020));
            }
        }
    }
    grid
}

fn bench_can_place(c: &mut Criterion) {
    let grids = [("empty", Grid::new(8)), ("cluttered", cluttered(8))];
    for name in ["Single", "Square", "Cross", "Block"] {
        let matrix = template_by_name(name).unwrap().matrix().unwrap();
        for (label, grid) in &grids {
            c.bench_function(&format!("can_place_{}_{}", name, label), |b| {
                b.iter(|| can_place(black_box(&matrix), black_box(grid)))
            });
        }
    }
}

fn bench_generate(c: &mut Criterion) {
    let grid = cluttered(8);
    for (policy, name) in [(BatchPolicy::Placeable, "placeable"), (BatchPolicy::Blind, "blind")] {
        let mut gen = BatchGenerator::new(StdRng::seed_from_u64(1), policy);
        c.bench_function(&format!("generate_batch_{}", name), |b| {
            b.iter(|| gen.generate(black_box(&grid), 3))
        });
    }
}

fn bench_resolve_anchor(c: &mut Criterion) {
    let grid = cluttered(8);
    let metrics = BoardMetrics::new(0.0, 0.0, 320.0, 320.0);
    let matrix = template_by_name("L4").unwrap().matrix().unwrap();

    c.bench_function("resolve_anchor_direct", |b| {
        b.iter(|| {
            resolve_anchor(
                black_box(&matrix),
                black_box(Point::new(100.0, 100.0)),
                Pivot::default(),
                &metrics,
                &grid,
                DEFAULT_SNAP_DISTANCE,
            )
        })
    });

    // off the right edge: forces the full-grid fallback
    c.bench_function("resolve_anchor_fallback", |b| {
        b.iter(|| {
            resolve_anchor(
                black_box(&matrix),
                black_box(Point::new(400.0, 160.0)),
                Pivot::default(),
                &metrics,
                &grid,
                DEFAULT_SNAP_DISTANCE,
            )
        })
    });
}

criterion_group!(benches, bench_can_place, bench_generate, bench_resolve_anchor);
criterion_main!(benches);
