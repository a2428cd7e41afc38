// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss sub-component.
//!
//! A vertical drag fades the backdrop and moves the page with the finger. On
//! release the drag either snaps back or closes the viewer, depending on how
//! far it travelled.
//!
//! The drag is only honored while the selected page is at its fit zoom. The
//! guard is evaluated when the drag begins (a rejected drag stays inert until
//! it ends) and again on every move (a move made while zoomed is skipped).
//!
//! Writes to [`ViewerState`](crate::ui::viewer::state::ViewerState) are not
//! applied here: they are returned as deferred updates for the next UI tick.

use crate::ui::viewer::queue::PendingUpdate;
use crate::ui::viewer::state::ViewerState;
use iced::Vector;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    /// The drag began while zoomed; ignored until it ends.
    Rejected,
    SnapBack,
    /// Terminal: the close callback has been scheduled.
    Dismissing,
}

/// Messages for the dismiss sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Began,
    Moved {
        translation: Vector,
        viewport_height: f32,
    },
    Ended {
        translation: Vector,
    },
    Cancelled,
    /// The snap-back transition finished.
    SnapBackFinished,
}

/// Effects produced by the dismiss sub-component.
pub enum Effect {
    None,
    /// The drag was refused because the page is zoomed.
    Rejected,
    /// A state update for the next UI tick.
    Defer(PendingUpdate),
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Rejected => f.write_str("Rejected"),
            Effect::Defer(_) => f.write_str("Defer(..)"),
        }
    }
}

/// Backdrop opacity for a vertical drag of `dy` in a viewport `height` tall.
#[must_use]
pub fn backdrop_opacity(dy: f32, height: f32) -> f32 {
    if height <= 0.0 {
        return 1.0;
    }
    (1.0 - dy.abs() / (height / 2.0)).clamp(0.0, 1.0)
}

/// Dismiss sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    phase: Phase,
    dismiss_distance: f32,
    animation: Duration,
}

impl State {
    pub fn new(dismiss_distance: f32, animation: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            dismiss_distance,
            animation,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle(&mut self, msg: Message, viewer: &ViewerState) -> Effect {
        if self.phase == Phase::Dismissing {
            return Effect::None;
        }

        match msg {
            Message::Began => {
                if viewer.is_at_fit() {
                    self.phase = Phase::Dragging;
                    Effect::None
                } else {
                    self.phase = Phase::Rejected;
                    Effect::Rejected
                }
            }
            Message::Moved {
                translation,
                viewport_height,
            } => {
                if self.phase != Phase::Dragging || !viewer.is_at_fit() {
                    return Effect::None;
                }
                let opacity = backdrop_opacity(translation.y, viewport_height);
                Effect::Defer(Box::new(move |state, _| {
                    state.set_drag(translation, opacity);
                }))
            }
            Message::Ended { translation } => match self.phase {
                Phase::Dragging if translation.y.abs() < self.dismiss_distance => {
                    tracing::debug!(dy = translation.y, "dismiss drag snapped back");
                    self.phase = Phase::SnapBack;
                    let duration = self.animation;
                    Effect::Defer(Box::new(move |state, now| {
                        state.animate_presentation(1.0, Vector::ZERO, now, duration);
                    }))
                }
                Phase::Dragging => {
                    tracing::debug!(dy = translation.y, "dismiss drag closed the viewer");
                    self.phase = Phase::Dismissing;
                    Effect::Defer(Box::new(|state, _| {
                        state.close();
                    }))
                }
                Phase::Rejected => {
                    self.phase = Phase::Idle;
                    Effect::None
                }
                _ => Effect::None,
            },
            Message::Cancelled => match self.phase {
                Phase::Dragging => {
                    self.phase = Phase::Idle;
                    Effect::Defer(Box::new(|state, _| state.reset_presentation()))
                }
                Phase::Rejected => {
                    self.phase = Phase::Idle;
                    Effect::None
                }
                _ => Effect::None,
            },
            Message::SnapBackFinished => {
                if self.phase == Phase::SnapBack {
                    self.phase = Phase::Idle;
                }
                Effect::None
            }
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_DISMISS_DISTANCE,
            Duration::from_millis(crate::config::DEFAULT_ANIMATION_MS),
        )
    }
}
