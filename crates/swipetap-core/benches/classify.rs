//! Benchmarks for release classification and the engine hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::rc::Rc;
use swipetap_core::{
    classify_release, is_not_slided, AdapterKind, GestureEngine, GestureOptions, InputEvent,
    InputPhase, ManualClock, Point, TimedPoint,
};

fn trajectory(samples: usize) -> Vec<TimedPoint> {
    (0..samples)
        .map(|i| TimedPoint::stamp(Point::new(i as f64 * 0.5, 0.0), i as f64 * 4.0))
        .collect()
}

// =============================================================================
// Classification
// =============================================================================

fn bench_is_not_slided(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_not_slided");

    for size in [2, 16, 64, 256].iter() {
        let tracking = trajectory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tracking, |b, tracking| {
            b.iter(|| is_not_slided(tracking[0], black_box(tracking), 20.0));
        });
    }

    group.finish();
}

fn bench_classify_release(c: &mut Criterion) {
    let options = GestureOptions::default();
    let tracking = trajectory(64);
    let start = tracking[0];
    let current = tracking[tracking.len() - 1];

    c.bench_function("classify_release", |b| {
        b.iter(|| classify_release(black_box(start), black_box(current), &tracking, 0, &options));
    });
}

// =============================================================================
// Engine
// =============================================================================

fn bench_engine_swipe(c: &mut Criterion) {
    c.bench_function("engine_swipe", |b| {
        b.iter(|| {
            let clock = ManualClock::default();
            let mut engine = GestureEngine::with_clock(
                AdapterKind::Pointer,
                GestureOptions::default(),
                Rc::new(clock.clone()),
            );
            engine.handle_event(&InputEvent::pointer(InputPhase::Start, 1, Point::ORIGIN));
            for i in 1..=10 {
                clock.advance(10.0);
                let p = Point::new(f64::from(i) * 10.0, 0.0);
                engine.handle_event(&InputEvent::pointer(InputPhase::Move, 1, p));
            }
            let up = InputEvent::pointer(InputPhase::End, 1, Point::new(100.0, 0.0));
            black_box(engine.handle_event(&up))
        });
    });
}

criterion_group!(
    benches,
    bench_is_not_slided,
    bench_classify_release,
    bench_engine_swipe
);
criterion_main!(benches);
