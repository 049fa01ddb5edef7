// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point, Size, Vec2};
use understory_zoom::{
    FitPolicy, FlingAxis, FrameQueue, PointerEvent, PointerId, Scroller, VelocityTracker, ZoomView,
};

const POLICIES: [FitPolicy; 7] = [
    FitPolicy::FitCenter,
    FitPolicy::CenterInside,
    FitPolicy::CenterCrop,
    FitPolicy::Center,
    FitPolicy::FitStart,
    FitPolicy::FitEnd,
    FitPolicy::FitXY,
];

fn view(viewport: f64, content: Size) -> ZoomView<FrameQueue> {
    let mut view = ZoomView::new(FrameQueue::new());
    view.layout(Size::new(viewport, viewport), Insets::ZERO);
    view.set_content_size(Some(content));
    view
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/fit");
    let content = Size::new(4_032.0, 3_024.0);
    let viewport = Size::new(1_080.0, 2_340.0);
    for policy in POLICIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{policy:?}")),
            &policy,
            |b, &policy| b.iter(|| black_box(policy.fit(black_box(content), black_box(viewport)))),
        );
    }
    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/pinch");
    let a = PointerId(1);
    let b = PointerId(2);

    // A spread-then-squeeze pinch, so the second half unwinds the history
    // recorded by the first.
    for steps in [16usize, 64, 256] {
        let spans: Vec<f64> = (0..steps)
            .map(|i| {
                let phase = i as f64 / steps as f64 * core::f64::consts::TAU;
                200.0 + 80.0 * phase.sin()
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("gesture", steps), &spans, |bench, spans| {
            bench.iter_batched(
                || view(800.0, Size::new(1_600.0, 1_200.0)),
                |mut view| {
                    let anchor = Point::new(300.0, 400.0);
                    view.handle_pointer(PointerEvent::down(a, anchor, 0));
                    view.handle_pointer(PointerEvent::added(b, anchor + Vec2::new(200.0, 0.0), 0));
                    for (i, span) in spans.iter().enumerate() {
                        let at = anchor + Vec2::new(*span, 0.0);
                        view.handle_pointer(PointerEvent::moved(b, at, i as u64 * 8));
                    }
                    view.handle_pointer(PointerEvent::removed(b, anchor, steps as u64 * 8));
                    black_box(view.draw_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/fling");

    group.bench_function("scroller_frames", |b| {
        b.iter(|| {
            let mut scroller = Scroller::new();
            scroller.fling(
                0,
                FlingAxis::Both,
                Point::new(100.0, 100.0),
                black_box(Vec2::new(6_000.0, -4_500.0)),
                Point::new(-1_000.0, -1_000.0),
                Point::new(1_000.0, 1_000.0),
                50.0,
            );
            let mut now = 0;
            while scroller.compute(now) {
                now += 15;
            }
            black_box(scroller.position())
        });
    });

    group.bench_function("velocity_estimate", |b| {
        let mut tracker = VelocityTracker::new();
        for i in 0..20_u64 {
            let t = i as f64;
            tracker.add(i * 8, Point::new(t * t * 0.5, 300.0 - t * 4.0));
        }
        b.iter(|| black_box(tracker.velocity(black_box(8_000.0))));
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_pinch, bench_fling);
criterion_main!(benches);
