// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_image_zoom`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_image_zoom::{
    ClampContext, ClampRequest, ImageTransform, LayoutDirection, ScaleBounds, ScalePolicy,
    ZoomState, clamp,
};

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("clamp");
    for policy in [
        ScalePolicy::FitCenter,
        ScalePolicy::FitStart,
        ScalePolicy::CenterCrop,
    ] {
        let ctx = ClampContext {
            intrinsic: Some(Size::new(4000.0, 3000.0)),
            available: Size::new(1080.0, 1920.0),
            bounds: ScaleBounds {
                min: Vec2::new(0.27, 0.27),
                max: Vec2::new(4.0, 4.0),
            },
            policy,
            direction: LayoutDirection::Ltr,
        };
        let current = ImageTransform::new(0.27, 0.27, 0.0, 555.0);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{policy:?}")),
            &ctx,
            |b, ctx| {
                let mut step = 0.0_f64;
                b.iter(|| {
                    step = (step + 0.01) % 4.0;
                    let request = ClampRequest {
                        scale: Vec2::new(step, step),
                        pivot: Point::new(2000.0, 1500.0),
                        target: Point::new(540.0 + step * 10.0, 960.0),
                    };
                    black_box(clamp(black_box(request), ctx, current))
                });
            },
        );
    }
    group.finish();
}

fn laid_out() -> ZoomState {
    let mut s = ZoomState::new();
    s.set_content_size(Size::new(4000.0, 3000.0));
    s.set_view_size(Size::new(1080.0, 1920.0));
    s.zoom_to(Vec2::new(2.0, 2.0), Point::new(540.0, 960.0), false, 0);
    s
}

fn bench_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("motion");

    group.bench_function("transition_to_end", |b| {
        b.iter_batched(
            || {
                let mut s = laid_out();
                s.double_tap(Point::new(300.0, 700.0), 0);
                s
            },
            |mut s| {
                let mut now = 0;
                while s.tick(now) {
                    now += 16;
                }
                black_box(s.transform())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fling_to_rest", |b| {
        b.iter_batched(
            || {
                let mut s = laid_out();
                s.fling(Vec2::new(2500.0, -1800.0), 0);
                s
            },
            |mut s| {
                let mut now = 0;
                while s.tick(now) {
                    now += 16;
                }
                black_box(s.transform())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("drag_frame", |b| {
        let mut s = laid_out();
        s.down(Point::new(540.0, 960.0));
        let mut dx = 1.0;
        b.iter(|| {
            dx = -dx;
            black_box(s.scroll(Vec2::new(dx, 0.5 * dx)))
        });
    });

    group.bench_function("invalidate_and_rebuild", |b| {
        let mut s = laid_out();
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { 1920.0 } else { 1080.0 };
            s.set_view_size(Size::new(width, 1920.0));
            black_box(s.transform())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_clamp, bench_motion);
criterion_main!(benches);
