// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_zoom_pan::{BoundsPolicy, ZoomPanConfig, ZoomPanController};

fn controller(policy: BoundsPolicy) -> ZoomPanController {
    let config = ZoomPanConfig::default()
        .with_zoom_limits(0.1, 10.0)
        .with_bounds_policy(policy);
    let mut zp = ZoomPanController::new(config).unwrap();
    zp.set_layout(Size::new(1280.0, 720.0));
    zp.set_content_size(Some(Size::new(4096.0, 4096.0)));
    zp
}

fn bench_drag_then_inertia(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom_pan/drag_inertia");

    for policy in [BoundsPolicy::None, BoundsPolicy::Live, BoundsPolicy::Settle] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{policy:?}")),
            &policy,
            |b, &policy| {
                b.iter_batched(
                    || controller(policy),
                    |mut zp| {
                        zp.on_pointer_down(&[Point::new(600.0, 300.0)], 0.0);
                        for i in 1..=60 {
                            let t = f64::from(i);
                            zp.on_pointer_move(&[Point::new(600.0 - t * 12.0, 300.0 - t * 5.0)], t * 16.0);
                        }
                        zp.on_pointer_up(&[], 60.0 * 16.0);
                        let mut now = 61.0 * 16.0;
                        while zp.tick(now) {
                            now += 16.0;
                        }
                        black_box(zp.transform());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_pinch_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom_pan/pinch");

    for moves in [16_u32, 256, 4_096] {
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            b.iter_batched(
                || controller(BoundsPolicy::Live),
                |mut zp| {
                    zp.on_pointer_down(&[Point::new(600.0, 360.0), Point::new(680.0, 360.0)], 0.0);
                    for i in 0..moves {
                        let spread = 40.0 + f64::from(i % 200);
                        let shift = Vec2::new(f64::from(i % 50), 0.0);
                        let a = Point::new(640.0 - spread, 360.0) + shift;
                        let b = Point::new(640.0 + spread, 360.0) + shift;
                        zp.on_pointer_move(&[a, b], f64::from(i) * 16.0);
                    }
                    black_box(zp.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_zoom_command(c: &mut Criterion) {
    c.bench_function("zoom_pan/zoom_in_tween", |b| {
        b.iter_batched(
            || controller(BoundsPolicy::Settle),
            |mut zp| {
                zp.zoom_in();
                let mut now = 0.0;
                while zp.tick(now) {
                    now += 16.0;
                }
                black_box(zp.transform());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_drag_then_inertia,
    bench_pinch_moves,
    bench_zoom_command
);
criterion_main!(benches);
