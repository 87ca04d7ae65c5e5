#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use grip_core::{
    Bounds, Constraints, Delta, Direction, Margins, Point, Rect, ResizeConfig, ResizeStart,
    compute_geometry, resolve::direction_from_edges,
};
use std::hint::black_box;

fn start() -> ResizeStart {
    ResizeStart {
        rect: Rect::new(40.0, 40.0, 320.0, 180.0),
        margins: Margins::new(8.0, 8.0),
    }
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize/geometry");
    let start = start();
    let bounded = Constraints {
        width: Bounds::new(Some(140.0), Some(640.0)),
        height: Bounds::new(Some(96.0), Some(480.0)),
        aspect_ratio: None,
    };
    let locked = Constraints {
        aspect_ratio: start.rect.aspect_ratio(),
        ..bounded
    };

    group.bench_function("east_bounded_240_frames", |b| {
        b.iter(|| {
            for step in 0..240 {
                let delta = Delta {
                    x: f64::from(step) * 1.5 - 120.0,
                    y: 0.0,
                };
                black_box(compute_geometry(&start, delta, Direction::EAST, &bounded));
            }
        });
    });

    group.bench_function("nw_corner_locked_240_frames", |b| {
        let nw = Direction::from_signs(-1, -1);
        b.iter(|| {
            for step in 0..240 {
                let delta = Delta {
                    x: f64::from(step) - 120.0,
                    y: f64::from(step % 7) * 3.0 - 60.0,
                };
                black_box(compute_geometry(&start, delta, nw, &locked));
            }
        });
    });

    group.finish();
}

fn bench_edge_resolution(c: &mut Criterion) {
    let config = ResizeConfig::enabled();
    let rect = start().rect;
    c.bench_function("resize/resolve/edges_grid_64", |b| {
        b.iter(|| {
            for ix in 0..8 {
                for iy in 0..8 {
                    let pointer = Point::new(
                        rect.left + f64::from(ix) * rect.width / 7.0,
                        rect.top + f64::from(iy) * rect.height / 7.0,
                    );
                    black_box(direction_from_edges(rect, pointer, &config));
                }
            }
        });
    });
}

criterion_group!(benches, bench_geometry, bench_edge_resolution);
criterion_main!(benches);
