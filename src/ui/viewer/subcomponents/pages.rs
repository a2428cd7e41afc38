// SPDX-License-Identifier: MPL-2.0
//! Page container sub-component.
//!
//! Lays the pages out as a horizontal strip around the selected page, follows
//! horizontal swipes, commits page changes and asks for a fetch every time a
//! page appears. Deduplicating those fetches is left to the fetcher.

use crate::ui::viewer::animation::Tween;
use crate::ui::viewer::state::{PageId, ViewerState};
use std::time::{Duration, Instant};

/// Resistance applied when swiping past the first or last page.
const EDGE_RESISTANCE: f32 = 3.0;

/// Page container sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    swipe_offset: f32,
    settle: Option<Tween<f32>>,
    appeared: bool,
    swipe_threshold: f32,
    animation: Duration,
}

/// Messages for the page container sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// The viewer became visible.
    ViewerAppeared,
    /// A page became visible.
    PageAppeared(PageId),
    /// Horizontal swipe translation since the press.
    SwipeMoved(f32),
    SwipeEnded {
        dx: f32,
        viewport_width: f32,
        at: Instant,
    },
    SwipeCancelled { at: Instant },
    Next,
    Previous,
    Tick(Instant),
}

/// Effects produced by the page container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The page needs its image.
    Fetch(PageId),
    /// The selection moved to this page.
    Selected(PageId),
}

impl State {
    pub fn new(swipe_threshold: f32, animation: Duration) -> Self {
        Self {
            swipe_offset: 0.0,
            settle: None,
            appeared: false,
            swipe_threshold,
            animation,
        }
    }

    pub fn handle(&mut self, msg: Message, viewer: &mut ViewerState) -> Effect {
        match msg {
            Message::ViewerAppeared => {
                viewer.reset_presentation();
                self.swipe_offset = 0.0;
                self.settle = None;
                if self.appeared {
                    return Effect::None;
                }
                self.appeared = true;
                viewer
                    .pages()
                    .first()
                    .map_or(Effect::None, |page| Effect::Fetch(page.id))
            }
            Message::PageAppeared(page) => Effect::Fetch(page),
            Message::SwipeMoved(dx) => {
                self.settle = None;
                let direction = if dx < 0.0 { 1 } else { -1 };
                self.swipe_offset = if viewer.neighbor(direction).is_some() {
                    dx
                } else {
                    dx / EDGE_RESISTANCE
                };
                Effect::None
            }
            Message::SwipeEnded {
                dx,
                viewport_width,
                at,
            } => {
                let direction: isize = if dx < 0.0 { 1 } else { -1 };
                let committed = viewport_width > 0.0
                    && dx.abs() >= self.swipe_threshold * viewport_width;
                match viewer.neighbor(direction).filter(|_| committed) {
                    Some(target) => {
                        // The new page continues from where the swipe left it.
                        let carried = self.swipe_offset + direction as f32 * viewport_width;
                        viewer.select(target);
                        tracing::trace!(page = %target, "page changed by swipe");
                        self.settle_from(carried, at);
                        Effect::Selected(target)
                    }
                    None => {
                        self.settle_from(self.swipe_offset, at);
                        Effect::None
                    }
                }
            }
            Message::SwipeCancelled { at } => {
                self.settle_from(self.swipe_offset, at);
                Effect::None
            }
            Message::Next => self.step(viewer, 1),
            Message::Previous => self.step(viewer, -1),
            Message::Tick(now) => {
                if let Some(settle) = self.settle {
                    self.swipe_offset = settle.sample(now);
                    if settle.is_finished(now) {
                        self.settle = None;
                    }
                }
                Effect::None
            }
        }
    }

    fn step(&mut self, viewer: &mut ViewerState, direction: isize) -> Effect {
        let Some(target) = viewer.neighbor(direction) else {
            return Effect::None;
        };
        viewer.select(target);
        tracing::trace!(page = %target, "page changed by keyboard");
        self.swipe_offset = 0.0;
        self.settle = None;
        Effect::Selected(target)
    }

    fn settle_from(&mut self, offset: f32, at: Instant) {
        if self.animation.is_zero() || offset == 0.0 {
            self.swipe_offset = 0.0;
            self.settle = None;
        } else {
            self.swipe_offset = offset;
            self.settle = Some(Tween::new(offset, 0.0, at, self.animation));
        }
    }

    /// Horizontal displacement of the selected page.
    pub fn swipe_offset(&self) -> f32 {
        self.swipe_offset
    }

    pub fn is_animating(&self) -> bool {
        self.settle.is_some()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_SWIPE_THRESHOLD,
            Duration::from_millis(crate::config::DEFAULT_ANIMATION_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Vector;

    fn viewer() -> ViewerState {
        ViewerState::new(["url1", "url2", "url3"], None)
    }

    #[test]
    fn first_appearance_fetches_first_page_only() {
        let mut viewer = viewer();
        let mut pages = State::default();
        viewer.set_drag(Vector::new(0.0, 40.0), 0.2);

        let effect = pages.handle(Message::ViewerAppeared, &mut viewer);

        assert_eq!(effect, Effect::Fetch(viewer.pages()[0].id));
        assert_eq!(viewer.backdrop_opacity(), 1.0);
        assert_eq!(viewer.drag_offset(), Vector::ZERO);
        assert_eq!(pages.handle(Message::ViewerAppeared, &mut viewer), Effect::None);
    }

    #[test]
    fn every_page_appearance_requests_fetch() {
        let mut viewer = viewer();
        let mut pages = State::default();
        let id = viewer.pages()[1].id;
        assert_eq!(pages.handle(Message::PageAppeared(id), &mut viewer), Effect::Fetch(id));
        assert_eq!(pages.handle(Message::PageAppeared(id), &mut viewer), Effect::Fetch(id));
    }

    #[test]
    fn long_swipe_selects_next_page() {
        let mut viewer = viewer();
        let mut pages = State::new(0.25, Duration::ZERO);
        let second = viewer.pages()[1].id;

        pages.handle(Message::SwipeMoved(-150.0), &mut viewer);
        let effect = pages.handle(
            Message::SwipeEnded {
                dx: -150.0,
                viewport_width: 400.0,
                at: Instant::now(),
            },
            &mut viewer,
        );

        assert_eq!(effect, Effect::Selected(second));
        assert_eq!(viewer.selected_index(), 2);
        assert_eq!(pages.swipe_offset(), 0.0);
    }

    #[test]
    fn short_swipe_springs_back() {
        let mut viewer = viewer();
        let mut pages = State::new(0.25, Duration::from_millis(250));
        let start = Instant::now();

        pages.handle(Message::SwipeMoved(-60.0), &mut viewer);
        let effect = pages.handle(
            Message::SwipeEnded {
                dx: -60.0,
                viewport_width: 400.0,
                at: start,
            },
            &mut viewer,
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(viewer.selected_index(), 1);
        assert!(pages.is_animating());

        pages.handle(Message::Tick(start + Duration::from_millis(250)), &mut viewer);
        assert_eq!(pages.swipe_offset(), 0.0);
        assert!(!pages.is_animating());
    }

    #[test]
    fn swipe_past_first_page_is_resisted_and_ignored() {
        let mut viewer = viewer();
        let mut pages = State::new(0.25, Duration::ZERO);

        pages.handle(Message::SwipeMoved(300.0), &mut viewer);
        assert_eq!(pages.swipe_offset(), 100.0);

        let effect = pages.handle(
            Message::SwipeEnded {
                dx: 300.0,
                viewport_width: 400.0,
                at: Instant::now(),
            },
            &mut viewer,
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(viewer.selected_index(), 1);
    }

    #[test]
    fn committed_swipe_carries_offset_into_new_page() {
        let mut viewer = viewer();
        let mut pages = State::new(0.25, Duration::from_millis(250));

        pages.handle(Message::SwipeMoved(-150.0), &mut viewer);
        pages.handle(
            Message::SwipeEnded {
                dx: -150.0,
                viewport_width: 400.0,
                at: Instant::now(),
            },
            &mut viewer,
        );

        assert_eq!(pages.swipe_offset(), 250.0);
        assert!(pages.is_animating());
    }

    #[test]
    fn keyboard_navigation_stops_at_edges() {
        let mut viewer = viewer();
        let mut pages = State::default();

        assert_eq!(pages.handle(Message::Previous, &mut viewer), Effect::None);
        pages.handle(Message::Next, &mut viewer);
        pages.handle(Message::Next, &mut viewer);
        assert_eq!(viewer.selected_index(), 3);
        assert_eq!(pages.handle(Message::Next, &mut viewer), Effect::None);
    }
}
