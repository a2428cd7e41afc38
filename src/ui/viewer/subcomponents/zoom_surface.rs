// SPDX-License-Identifier: MPL-2.0
//! Zoom surface sub-component: one zoomable, pannable page.
//!
//! Owns the page's [`ZoomState`] and publishes its current and fit zoom
//! through [`Effect::ZoomChanged`]: once when the content is first measured,
//! on every pinch or wheel step, and on every frame of a double-tap zoom
//! animation.

use crate::config::WHEEL_ZOOM_FACTOR;
use crate::ui::state::{MaxZoom, ZoomState};
use crate::ui::viewer::animation::Tween;
use iced::{Point, Size, Vector};
use std::time::{Duration, Instant};

/// Current and fit zoom of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomReport {
    pub current: f32,
    pub fit: f32,
}

#[derive(Debug, Clone, Copy)]
struct ZoomAnimation {
    zoom: Tween<f32>,
    offset: Tween<Vector>,
}

/// Zoom surface sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    zoom: ZoomState,
    animation: Option<ZoomAnimation>,
    animation_duration: Duration,
}

/// Messages for the zoom surface sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// The viewport was measured or resized.
    Layout(Size),
    /// Two-finger scale change centered at a viewport point.
    Pinch { factor: f32, center: Point },
    /// Mouse wheel zoom; positive lines zoom in.
    Wheel { lines: f32, position: Point },
    /// Toggle between fit and maximum zoom around the tapped point.
    DoubleTap { position: Point, at: Instant },
    /// Drag the zoomed content by a viewport delta.
    Pan(Vector),
    /// Advance a running zoom animation.
    Tick(Instant),
    /// Return to fit zoom.
    Reset,
}

/// Effects produced by the zoom surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    ZoomChanged(ZoomReport),
}

impl State {
    /// Creates the surface for content of the given intrinsic size.
    ///
    /// # Panics
    ///
    /// Panics if `content` is empty.
    #[must_use]
    pub fn new(content: Size, max_zoom: MaxZoom, animation_duration: Duration) -> Self {
        Self {
            zoom: ZoomState::new(content, max_zoom),
            animation: None,
            animation_duration,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Layout(viewport) => {
                if self.zoom.layout(viewport) {
                    self.animation = None;
                    self.report()
                } else {
                    Effect::None
                }
            }
            Message::Pinch { factor, center } => self.scale_by(factor, center),
            Message::Wheel { lines, position } => {
                self.scale_by(WHEEL_ZOOM_FACTOR.powf(lines), position)
            }
            Message::DoubleTap { position, at } => self.double_tap(position, at),
            Message::Pan(delta) => {
                if self.zoom.is_at_fit() {
                    return Effect::None;
                }
                self.animation = None;
                self.zoom.pan(delta);
                Effect::None
            }
            Message::Tick(now) => self.step(now),
            Message::Reset => {
                if !self.zoom.is_measured() {
                    return Effect::None;
                }
                self.animation = None;
                self.zoom.reset();
                self.report()
            }
        }
    }

    fn scale_by(&mut self, factor: f32, anchor: Point) -> Effect {
        if !self.zoom.is_measured() || !factor.is_finite() || factor <= 0.0 {
            return Effect::None;
        }
        self.animation = None;
        let target = self.zoom.zoom() * factor;
        self.zoom.zoom_anchored(target, anchor);
        self.report()
    }

    fn double_tap(&mut self, position: Point, at: Instant) -> Effect {
        if !self.zoom.is_measured() {
            return Effect::None;
        }
        let target = if self.zoom.is_at_fit() {
            self.zoom.max_zoom()
        } else {
            self.zoom.min_zoom()
        };
        let content_point = self.zoom.to_content(position);
        let rect = self.zoom.zoom_rect(target, content_point);
        let offset = self.zoom.rect_offset(rect, target);

        if self.animation_duration.is_zero() {
            self.animation = None;
            self.zoom.apply(target, offset);
            return self.report();
        }

        self.animation = Some(ZoomAnimation {
            zoom: Tween::new(self.zoom.zoom(), target, at, self.animation_duration),
            offset: Tween::new(self.zoom.offset(), offset, at, self.animation_duration),
        });
        Effect::None
    }

    fn step(&mut self, now: Instant) -> Effect {
        let Some(animation) = self.animation else {
            return Effect::None;
        };
        self.zoom
            .apply(animation.zoom.sample(now), animation.offset.sample(now));
        if animation.zoom.is_finished(now) {
            self.animation = None;
        }
        self.report()
    }

    fn report(&self) -> Effect {
        Effect::ZoomChanged(ZoomReport {
            current: self.zoom.zoom(),
            fit: self.zoom.min_zoom(),
        })
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_ZOOM;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    fn viewport() -> Size {
        Size::new(400.0, 800.0)
    }

    fn surface(animation: Duration) -> State {
        let mut state = State::new(Size::new(800.0, 800.0), MaxZoom::default(), animation);
        state.handle(Message::Layout(viewport()));
        state
    }

    fn reported(effect: Effect) -> ZoomReport {
        match effect {
            Effect::ZoomChanged(report) => report,
            Effect::None => panic!("expected a zoom report"),
        }
    }

    #[test]
    #[should_panic(expected = "non-empty size")]
    fn empty_content_panics() {
        let _ = State::new(Size::new(10.0, 0.0), MaxZoom::default(), Duration::ZERO);
    }

    #[test]
    fn first_layout_reports_fit() {
        let mut state = State::new(Size::new(800.0, 800.0), MaxZoom::default(), Duration::ZERO);
        let report = reported(state.handle(Message::Layout(viewport())));
        assert_abs_diff_eq!(report.fit, 0.5, epsilon = F32_EPSILON);
        assert_eq!(report.current, report.fit);

        assert_eq!(state.handle(Message::Layout(viewport())), Effect::None);
    }

    #[test]
    fn gestures_before_layout_are_ignored() {
        let mut state = State::new(Size::new(800.0, 800.0), MaxZoom::default(), Duration::ZERO);
        assert_eq!(
            state.handle(Message::Pinch {
                factor: 2.0,
                center: Point::ORIGIN
            }),
            Effect::None
        );
        assert_eq!(
            state.handle(Message::DoubleTap {
                position: Point::ORIGIN,
                at: Instant::now()
            }),
            Effect::None
        );
    }

    #[test]
    fn pinch_reports_every_change() {
        let mut state = surface(Duration::ZERO);
        let report = reported(state.handle(Message::Pinch {
            factor: 2.0,
            center: Point::new(200.0, 400.0),
        }));
        assert_abs_diff_eq!(report.current, 1.0, epsilon = F32_EPSILON);

        // Clamped at fit, still reported.
        let report = reported(state.handle(Message::Pinch {
            factor: 0.01,
            center: Point::new(200.0, 400.0),
        }));
        assert_eq!(report.current, report.fit);
    }

    #[test]
    fn pinch_centers_small_content() {
        let mut state = surface(Duration::ZERO);
        state.handle(Message::Pinch {
            factor: 1.2,
            center: Point::new(200.0, 400.0),
        });
        // 800 * 0.6 = 480 tall inside 800: centered vertically.
        let bounds = state.zoom().image_bounds();
        assert_abs_diff_eq!(bounds.y, 160.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn wheel_zooms_by_factor_per_line() {
        let mut state = surface(Duration::ZERO);
        let report = reported(state.handle(Message::Wheel {
            lines: 2.0,
            position: Point::new(200.0, 400.0),
        }));
        assert_abs_diff_eq!(report.current, 0.5 * 1.1 * 1.1, epsilon = F32_EPSILON);
    }

    #[test]
    fn double_tap_toggles_between_fit_and_max() {
        let mut state = surface(Duration::ZERO);
        let at = Instant::now();

        let zoomed = reported(state.handle(Message::DoubleTap {
            position: Point::new(100.0, 300.0),
            at,
        }));
        assert_abs_diff_eq!(zoomed.current, DEFAULT_MAX_ZOOM, epsilon = F32_EPSILON);

        let back = reported(state.handle(Message::DoubleTap {
            position: Point::new(100.0, 300.0),
            at,
        }));
        assert_eq!(back.current, back.fit);
        assert!(state.zoom().is_at_fit());
    }

    #[test]
    fn double_tap_centers_on_tapped_point() {
        let mut state = surface(Duration::ZERO);
        // Viewport (100, 400) maps to content (200, 400) at fit.
        let tap = Point::new(100.0, 400.0);
        let content_point = state.zoom().to_content(tap);

        state.handle(Message::DoubleTap {
            position: tap,
            at: Instant::now(),
        });

        let center = state.zoom().to_content(Point::new(200.0, 400.0));
        assert_abs_diff_eq!(center.x, content_point.x, epsilon = 0.01);
        assert_abs_diff_eq!(center.y, content_point.y, epsilon = 0.01);
    }

    #[test]
    fn animated_double_tap_reports_each_step() {
        let duration = Duration::from_millis(250);
        let mut state = surface(duration);
        let start = Instant::now();

        assert_eq!(
            state.handle(Message::DoubleTap {
                position: Point::new(200.0, 400.0),
                at: start,
            }),
            Effect::None
        );
        assert!(state.is_animating());

        let mid = reported(state.handle(Message::Tick(start + Duration::from_millis(100))));
        assert!(mid.current > mid.fit && mid.current < DEFAULT_MAX_ZOOM);

        let end = reported(state.handle(Message::Tick(start + duration)));
        assert_eq!(end.current, DEFAULT_MAX_ZOOM);
        assert!(!state.is_animating());
        assert_eq!(state.handle(Message::Tick(start + duration * 2)), Effect::None);
    }

    #[test]
    fn pan_only_moves_zoomed_content() {
        let mut state = surface(Duration::ZERO);
        state.handle(Message::Pan(Vector::new(-50.0, -50.0)));
        assert_eq!(state.zoom().offset(), Vector::ZERO);

        state.handle(Message::Pinch {
            factor: 4.0,
            center: Point::ORIGIN,
        });
        state.handle(Message::Pan(Vector::new(-50.0, -50.0)));
        assert_eq!(state.zoom().offset(), Vector::new(50.0, 50.0));
    }

    #[test]
    fn reset_reports_fit() {
        let mut state = surface(Duration::ZERO);
        state.handle(Message::Pinch {
            factor: 3.0,
            center: Point::ORIGIN,
        });
        let report = reported(state.handle(Message::Reset));
        assert_eq!(report.current, report.fit);
    }
}
