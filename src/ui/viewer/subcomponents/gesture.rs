// SPDX-License-Identifier: MPL-2.0
//! Pointer gesture recognizer.
//!
//! Turns raw finger (or left mouse button) events into the discrete gestures
//! the viewer routes: axis-locked single-finger drags, two-finger pinches and
//! double taps.
//!
//! A drag only starts once the finger leaves the touch slop around its press
//! point, then stays locked to its dominant axis. A second finger cancels the
//! drag and starts a pinch; after a pinch the recognizer ignores input until
//! every finger is up.

use crate::config::{DOUBLE_TAP_SLOP, TOUCH_SLOP};
use crate::ui::state::DragState;
use iced::{Point, Vector};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identifier of a touch point.
pub type FingerId = u64;

/// The finger id used for the left mouse button.
pub const MOUSE_FINGER: FingerId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn of(translation: Vector) -> Self {
        if translation.x.abs() > translation.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// Messages for the gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Pressed {
        finger: FingerId,
        position: Point,
        at: Instant,
    },
    Moved {
        finger: FingerId,
        position: Point,
        at: Instant,
    },
    Released {
        finger: FingerId,
        position: Point,
        at: Instant,
    },
    /// The platform lost track of the finger (e.g. window focus change).
    Lost { finger: FingerId, at: Instant },
}

/// Recognized gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    DragStarted {
        axis: Axis,
        translation: Vector,
        position: Point,
    },
    DragMoved {
        axis: Axis,
        translation: Vector,
        delta: Vector,
        position: Point,
    },
    DragEnded {
        axis: Axis,
        translation: Vector,
        at: Instant,
    },
    DragCancelled {
        axis: Axis,
        at: Instant,
    },
    /// Distance ratio between the two pinch fingers since the last move.
    Pinched {
        factor: f32,
        center: Point,
    },
    PinchEnded,
    DoubleTapped {
        position: Point,
        at: Instant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed,
    Dragging(Axis),
    Pinching {
        first: FingerId,
        second: FingerId,
        distance: f32,
    },
    /// Waiting for every finger to lift.
    Inert,
}

#[derive(Debug, Clone)]
pub struct State {
    fingers: BTreeMap<FingerId, Point>,
    primary: Option<FingerId>,
    drag: DragState,
    last_position: Option<Point>,
    last_tap: Option<(Point, Instant)>,
    phase: Phase,
    double_tap_interval: Duration,
}

impl State {
    pub fn new(double_tap_interval: Duration) -> Self {
        Self {
            fingers: BTreeMap::new(),
            primary: None,
            drag: DragState::default(),
            last_position: None,
            last_tap: None,
            phase: Phase::Idle,
            double_tap_interval,
        }
    }

    /// Whether any finger is currently down.
    pub fn is_active(&self) -> bool {
        !self.fingers.is_empty()
    }

    /// Axis of the drag in progress, if any.
    pub fn dragging_axis(&self) -> Option<Axis> {
        match self.phase {
            Phase::Dragging(axis) => Some(axis),
            _ => None,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Pressed {
                finger,
                position,
                at,
            } => self.on_pressed(finger, position, at),
            Message::Moved {
                finger, position, ..
            } => self.on_moved(finger, position),
            Message::Released {
                finger,
                position,
                at,
            } => self.on_released(finger, position, at),
            Message::Lost { finger, at } => self.on_lost(finger, at),
        }
    }

    fn on_pressed(&mut self, finger: FingerId, position: Point, at: Instant) -> Effect {
        self.fingers.insert(finger, position);

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Pressed;
                self.primary = Some(finger);
                self.drag.start(position);
                self.last_position = Some(position);
                Effect::None
            }
            Phase::Pressed | Phase::Dragging(_) => {
                let cancelled = self.dragging_axis();
                self.start_pinch(finger);
                match cancelled {
                    Some(axis) => Effect::DragCancelled { axis, at },
                    None => Effect::None,
                }
            }
            Phase::Pinching { .. } | Phase::Inert => Effect::None,
        }
    }

    fn start_pinch(&mut self, second: FingerId) {
        self.drag.stop();
        self.last_tap = None;
        let Some(first) = self.primary.take() else {
            self.phase = Phase::Inert;
            return;
        };
        let distance = self.finger_distance(first, second).unwrap_or(0.0);
        self.phase = Phase::Pinching {
            first,
            second,
            distance,
        };
    }

    fn finger_distance(&self, first: FingerId, second: FingerId) -> Option<f32> {
        let a = self.fingers.get(&first)?;
        let b = self.fingers.get(&second)?;
        Some(a.distance(*b))
    }

    fn on_moved(&mut self, finger: FingerId, position: Point) -> Effect {
        let Some(tracked) = self.fingers.get_mut(&finger) else {
            return Effect::None;
        };
        *tracked = position;

        match self.phase {
            Phase::Pressed if self.primary == Some(finger) => {
                let Some(translation) = self.drag.translation(position) else {
                    return Effect::None;
                };
                if translation.x.hypot(translation.y) <= TOUCH_SLOP {
                    return Effect::None;
                }
                let axis = Axis::of(translation);
                self.phase = Phase::Dragging(axis);
                self.last_position = Some(position);
                Effect::DragStarted {
                    axis,
                    translation,
                    position,
                }
            }
            Phase::Dragging(axis) if self.primary == Some(finger) => {
                let Some(translation) = self.drag.translation(position) else {
                    return Effect::None;
                };
                let delta = self
                    .last_position
                    .map_or(Vector::ZERO, |last| position - last);
                self.last_position = Some(position);
                Effect::DragMoved {
                    axis,
                    translation,
                    delta,
                    position,
                }
            }
            Phase::Pinching {
                first,
                second,
                distance,
            } if finger == first || finger == second => {
                let Some(current) = self.finger_distance(first, second) else {
                    return Effect::None;
                };
                self.phase = Phase::Pinching {
                    first,
                    second,
                    distance: current,
                };
                if distance <= f32::EPSILON {
                    return Effect::None;
                }
                let (Some(a), Some(b)) = (self.fingers.get(&first), self.fingers.get(&second))
                else {
                    return Effect::None;
                };
                Effect::Pinched {
                    factor: current / distance,
                    center: Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
                }
            }
            _ => Effect::None,
        }
    }

    fn on_released(&mut self, finger: FingerId, position: Point, at: Instant) -> Effect {
        if self.fingers.remove(&finger).is_none() {
            return Effect::None;
        }

        let effect = match self.phase {
            Phase::Pressed if self.primary == Some(finger) => self.on_tap(position, at),
            Phase::Dragging(axis) if self.primary == Some(finger) => {
                let translation = self.drag.translation(position).unwrap_or(Vector::ZERO);
                self.last_tap = None;
                self.end_single_finger();
                Effect::DragEnded {
                    axis,
                    translation,
                    at,
                }
            }
            Phase::Pinching { first, second, .. } if finger == first || finger == second => {
                self.phase = Phase::Inert;
                Effect::PinchEnded
            }
            _ => Effect::None,
        };

        self.settle_when_all_up();
        effect
    }

    fn on_tap(&mut self, position: Point, at: Instant) -> Effect {
        self.end_single_finger();

        let is_double = self.last_tap.is_some_and(|(previous, tapped_at)| {
            at.saturating_duration_since(tapped_at) <= self.double_tap_interval
                && previous.distance(position) <= DOUBLE_TAP_SLOP
        });

        if is_double {
            self.last_tap = None;
            Effect::DoubleTapped { position, at }
        } else {
            self.last_tap = Some((position, at));
            Effect::None
        }
    }

    fn on_lost(&mut self, finger: FingerId, at: Instant) -> Effect {
        if self.fingers.remove(&finger).is_none() {
            return Effect::None;
        }

        let effect = match self.phase {
            Phase::Pressed if self.primary == Some(finger) => {
                self.end_single_finger();
                Effect::None
            }
            Phase::Dragging(axis) if self.primary == Some(finger) => {
                self.end_single_finger();
                Effect::DragCancelled { axis, at }
            }
            Phase::Pinching { first, second, .. } if finger == first || finger == second => {
                self.phase = Phase::Inert;
                Effect::PinchEnded
            }
            _ => Effect::None,
        };

        self.last_tap = None;
        self.settle_when_all_up();
        effect
    }

    fn end_single_finger(&mut self) {
        self.drag.stop();
        self.primary = None;
        self.last_position = None;
        self.phase = if self.fingers.is_empty() {
            Phase::Idle
        } else {
            Phase::Inert
        };
    }

    fn settle_when_all_up(&mut self) {
        if self.fingers.is_empty() {
            self.phase = Phase::Idle;
            self.primary = None;
            self.drag.stop();
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_DOUBLE_TAP_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    const A: FingerId = 1;
    const B: FingerId = 2;

    fn press(state: &mut State, finger: FingerId, x: f32, y: f32, at: Instant) -> Effect {
        state.handle(Message::Pressed {
            finger,
            position: Point::new(x, y),
            at,
        })
    }

    fn move_to(state: &mut State, finger: FingerId, x: f32, y: f32, at: Instant) -> Effect {
        state.handle(Message::Moved {
            finger,
            position: Point::new(x, y),
            at,
        })
    }

    fn release(state: &mut State, finger: FingerId, x: f32, y: f32, at: Instant) -> Effect {
        state.handle(Message::Released {
            finger,
            position: Point::new(x, y),
            at,
        })
    }

    #[test]
    fn movement_within_slop_is_not_a_drag() {
        let mut state = State::default();
        let now = Instant::now();
        press(&mut state, A, 100.0, 100.0, now);
        assert_eq!(move_to(&mut state, A, 105.0, 104.0, now), Effect::None);
        assert_eq!(state.dragging_axis(), None);
    }

    #[test]
    fn vertical_drag_locks_axis_and_reports_translation() {
        let mut state = State::default();
        let now = Instant::now();
        press(&mut state, A, 100.0, 100.0, now);

        let started = move_to(&mut state, A, 102.0, 130.0, now);
        assert_eq!(
            started,
            Effect::DragStarted {
                axis: Axis::Vertical,
                translation: Vector::new(2.0, 30.0),
                position: Point::new(102.0, 130.0),
            }
        );

        // Horizontal movement afterwards keeps the vertical lock.
        let moved = move_to(&mut state, A, 160.0, 140.0, now);
        assert_eq!(
            moved,
            Effect::DragMoved {
                axis: Axis::Vertical,
                translation: Vector::new(60.0, 40.0),
                delta: Vector::new(58.0, 10.0),
                position: Point::new(160.0, 140.0),
            }
        );

        let ended = release(&mut state, A, 160.0, 350.0, now);
        assert_eq!(
            ended,
            Effect::DragEnded {
                axis: Axis::Vertical,
                translation: Vector::new(60.0, 250.0),
                at: now,
            }
        );
        assert!(!state.is_active());
    }

    #[test]
    fn horizontal_drag_is_detected() {
        let mut state = State::default();
        let now = Instant::now();
        press(&mut state, A, 300.0, 400.0, now);
        let started = move_to(&mut state, A, 280.0, 395.0, now);
        assert!(matches!(
            started,
            Effect::DragStarted {
                axis: Axis::Horizontal,
                ..
            }
        ));
    }

    #[test]
    fn second_finger_cancels_drag_and_pinches() {
        let mut state = State::default();
        let now = Instant::now();
        press(&mut state, A, 100.0, 100.0, now);
        move_to(&mut state, A, 100.0, 150.0, now);

        let effect = press(&mut state, B, 200.0, 150.0, now);
        assert!(matches!(
            effect,
            Effect::DragCancelled {
                axis: Axis::Vertical,
                ..
            }
        ));

        // Fingers 100 apart, now 200 apart.
        let pinched = move_to(&mut state, B, 300.0, 150.0, now);
        match pinched {
            Effect::Pinched { factor, center } => {
                assert_abs_diff_eq!(factor, 2.0, epsilon = F32_EPSILON);
                assert_eq!(center, Point::new(200.0, 150.0));
            }
            other => panic!("expected pinch, got {other:?}"),
        }

        assert_eq!(release(&mut state, B, 300.0, 150.0, now), Effect::PinchEnded);
        // The remaining finger does not start a new drag.
        assert_eq!(move_to(&mut state, A, 100.0, 400.0, now), Effect::None);
        assert_eq!(release(&mut state, A, 100.0, 400.0, now), Effect::None);
        assert!(!state.is_active());

        // A fresh press works again.
        press(&mut state, A, 0.0, 0.0, now);
        assert!(matches!(
            move_to(&mut state, A, 0.0, 50.0, now),
            Effect::DragStarted { .. }
        ));
    }

    #[test]
    fn two_quick_taps_are_a_double_tap() {
        let mut state = State::default();
        let start = Instant::now();
        press(&mut state, A, 50.0, 50.0, start);
        assert_eq!(release(&mut state, A, 50.0, 50.0, start), Effect::None);

        let second = start + Duration::from_millis(150);
        press(&mut state, A, 55.0, 52.0, second);
        assert_eq!(
            release(&mut state, A, 55.0, 52.0, second),
            Effect::DoubleTapped {
                position: Point::new(55.0, 52.0),
                at: second,
            }
        );

        // A third tap starts a new sequence.
        press(&mut state, A, 55.0, 52.0, second);
        assert_eq!(release(&mut state, A, 55.0, 52.0, second), Effect::None);
    }

    #[test]
    fn slow_taps_are_not_a_double_tap() {
        let mut state = State::default();
        let start = Instant::now();
        press(&mut state, A, 50.0, 50.0, start);
        release(&mut state, A, 50.0, 50.0, start);

        let late = start + Duration::from_millis(600);
        press(&mut state, A, 50.0, 50.0, late);
        assert_eq!(release(&mut state, A, 50.0, 50.0, late), Effect::None);
    }

    #[test]
    fn distant_taps_are_not_a_double_tap() {
        let mut state = State::default();
        let start = Instant::now();
        press(&mut state, A, 50.0, 50.0, start);
        release(&mut state, A, 50.0, 50.0, start);
        press(&mut state, A, 250.0, 50.0, start);
        assert_eq!(release(&mut state, A, 250.0, 50.0, start), Effect::None);
    }

    #[test]
    fn lost_finger_cancels_drag() {
        let mut state = State::default();
        let now = Instant::now();
        press(&mut state, A, 0.0, 0.0, now);
        move_to(&mut state, A, 0.0, 80.0, now);
        let effect = state.handle(Message::Lost { finger: A, at: now });
        assert_eq!(
            effect,
            Effect::DragCancelled {
                axis: Axis::Vertical,
                at: now
            }
        );
        assert!(!state.is_active());
    }

    #[test]
    fn unknown_finger_events_are_ignored() {
        let mut state = State::default();
        let now = Instant::now();
        assert_eq!(move_to(&mut state, MOUSE_FINGER, 10.0, 10.0, now), Effect::None);
        assert_eq!(release(&mut state, MOUSE_FINGER, 10.0, 10.0, now), Effect::None);
    }
}
