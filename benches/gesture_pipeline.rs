// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the gesture to viewer state pipeline.
//!
//! Measures the performance of:
//! - A full dismiss drag (press, moves, release, tick)
//! - Pinch zoom steps on a loaded page

use criterion::{criterion_group, criterion_main, Criterion};
use iced::{Point, Size};
use lens_pager::config::ViewerSettings;
use lens_pager::media::Bitmap;
use lens_pager::ui::viewer::component::{Message, State};
use lens_pager::ui::viewer::subcomponents::gesture;
use std::hint::black_box;
use std::time::{Duration, Instant};

const MOVES: usize = 60;

fn viewer() -> State {
    let settings = ViewerSettings {
        animation: Duration::ZERO,
        ..ViewerSettings::default()
    };
    let mut viewer = State::new(["url1", "url2", "url3"], None, settings);
    let _ = viewer.handle_message(Message::Appeared);
    let _ = viewer.handle_message(Message::ViewportMeasured(Size::new(400.0, 800.0)));
    let first = viewer.viewer().pages()[0].id;
    let _ = viewer.handle_message(Message::PageFetched {
        page: first,
        result: Ok(Bitmap::from_rgba(64, 64, vec![0; 64 * 64 * 4])),
    });
    viewer
}

fn pointer(viewer: &mut State, msg: gesture::Message) {
    let _ = viewer.handle_message(Message::Pointer(msg));
}

/// Benchmark a snapping-back dismiss drag with one tick per move.
fn bench_dismiss_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_pipeline");

    group.bench_function("dismiss_drag", |b| {
        b.iter(|| {
            let mut viewer = viewer();
            let at = Instant::now();
            pointer(
                &mut viewer,
                gesture::Message::Pressed {
                    finger: 1,
                    position: Point::new(200.0, 100.0),
                    at,
                },
            );
            for step in 1..=MOVES {
                pointer(
                    &mut viewer,
                    gesture::Message::Moved {
                        finger: 1,
                        position: Point::new(200.0, 100.0 + step as f32 * 2.0),
                        at,
                    },
                );
                let _ = viewer.handle_message(Message::Tick(at));
            }
            pointer(
                &mut viewer,
                gesture::Message::Released {
                    finger: 1,
                    position: Point::new(200.0, 220.0),
                    at,
                },
            );
            let _ = viewer.handle_message(Message::Tick(at));
            black_box(viewer.viewer().backdrop_opacity());
        });
    });

    group.finish();
}

/// Benchmark two-finger pinch steps routed to the zoom surface.
fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_pipeline");

    group.bench_function("pinch", |b| {
        b.iter(|| {
            let mut viewer = viewer();
            let at = Instant::now();
            for (finger, x) in [(1, 150.0), (2, 250.0)] {
                pointer(
                    &mut viewer,
                    gesture::Message::Pressed {
                        finger,
                        position: Point::new(x, 400.0),
                        at,
                    },
                );
            }
            for step in 1..=MOVES {
                pointer(
                    &mut viewer,
                    gesture::Message::Moved {
                        finger: 2,
                        position: Point::new(250.0 + step as f32, 400.0),
                        at,
                    },
                );
            }
            black_box(viewer.viewer().zoom_scale());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dismiss_drag, bench_pinch);
criterion_main!(benches);
