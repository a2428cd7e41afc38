// SPDX-License-Identifier: MPL-2.0
//! Viewer component orchestrator.
//!
//! Owns the [`ViewerState`] store and the sub-components, routes recognized
//! gestures between them and drives every animation from a single UI tick.
//!
//! Routing:
//! - vertical drag: dismiss controller, or pan when it refuses the drag
//! - horizontal drag: page swipe at fit zoom, pan otherwise
//! - pinch, wheel and double tap: the selected page's zoom surface
//!
//! Dismiss writes are queued and applied at the start of the next tick, in
//! the order they were produced.

use super::pane::{Pane, Slot};
use super::queue::UpdateQueue;
use super::state::{CloseCallback, PageId, ViewerState};
use super::subcomponents::{dismiss, gesture, pages, zoom_bridge, zoom_surface};
use crate::config::{ViewerSettings, UI_TICK};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::{Bitmap, Fetcher};
use crate::ui::state::ViewportState;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, container, text, Canvas, Row, Space, Stack};
use iced::{event, Element, Length, Padding, Point, Size, Subscription, Task, Vector};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Space between the close button and the top safe inset.
const OVERLAY_MARGIN: f32 = 16.0;

/// Hook receiving fetch failures.
pub type FetchErrorHook = Box<dyn Fn(PageId, &Error) + Send>;

/// Which consumer owns the drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    None,
    Dismiss,
    Swipe,
    Pan,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The viewer was shown.
    Appeared,
    ViewportMeasured(Size),
    /// The viewport changed size while delivering another message.
    Resized { size: Size, then: Box<Message> },
    Pointer(gesture::Message),
    WheelScrolled { lines: f32, position: Point },
    Tick(Instant),
    PageFetched {
        page: PageId,
        result: Result<Bitmap, Error>,
    },
    CloseTapped,
    NextPage,
    PreviousPage,
}

/// Effects reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The viewer closed; the close callback has run.
    Closed,
}

pub struct State {
    viewer: ViewerState,
    queue: UpdateQueue,
    gesture: gesture::State,
    surfaces: HashMap<PageId, zoom_surface::State>,
    bridge: zoom_bridge::Bridge,
    pages: pages::State,
    dismiss: dismiss::State,
    viewport: ViewportState,
    fetcher: Fetcher,
    settings: ViewerSettings,
    route: Route,
    closed_reported: bool,
    on_fetch_error: Option<FetchErrorHook>,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("viewer", &self.viewer)
            .field("queue", &self.queue)
            .field("route", &self.route)
            .field("dismiss", &self.dismiss.phase())
            .field("surfaces", &self.surfaces.len())
            .finish_non_exhaustive()
    }
}

impl State {
    pub fn new<I, S>(sources: I, on_close: Option<CloseCallback>, settings: ViewerSettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            viewer: ViewerState::new(sources, on_close),
            queue: UpdateQueue::new(),
            gesture: gesture::State::new(settings.double_tap_interval),
            surfaces: HashMap::new(),
            bridge: zoom_bridge::Bridge::new(),
            pages: pages::State::new(settings.swipe_threshold, settings.animation),
            dismiss: dismiss::State::new(settings.dismiss_distance, settings.animation),
            viewport: ViewportState::default(),
            fetcher: Fetcher::new(),
            settings,
            route: Route::None,
            closed_reported: false,
            on_fetch_error: None,
        }
    }

    /// Installs a hook called for every failed fetch.
    #[must_use]
    pub fn with_fetch_error_hook(mut self, hook: impl Fn(PageId, &Error) + Send + 'static) -> Self {
        self.on_fetch_error = Some(Box::new(hook));
        self
    }

    /// Sets the device top safe inset used to place the overlay.
    pub fn set_top_inset(&mut self, inset: f32) {
        self.viewport.top_inset = inset.max(0.0);
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    /// Mutable access to the store, e.g. to subscribe observers.
    pub fn viewer_mut(&mut self) -> &mut ViewerState {
        &mut self.viewer
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn pages_state(&self) -> &pages::State {
        &self.pages
    }

    pub fn dismiss_phase(&self) -> dismiss::Phase {
        self.dismiss.phase()
    }

    /// Zoom surface of a loaded page.
    pub fn surface(&self, page: PageId) -> Option<&zoom_surface::State> {
        self.surfaces.get(&page)
    }

    pub fn pending_updates(&self) -> usize {
        self.queue.len()
    }

    /// Whether the next frame needs a tick.
    pub fn needs_tick(&self) -> bool {
        !self.queue.is_empty()
            || self.viewer.is_animating()
            || self.pages.is_animating()
            || self.dismiss.phase() == dismiss::Phase::SnapBack
            || self.surfaces.values().any(zoom_surface::State::is_animating)
            || (self.viewer.is_closed() && !self.closed_reported)
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Appeared => {
                // Every appearance starts at fit zoom.
                let pages: Vec<PageId> = self.surfaces.keys().copied().collect();
                for page in pages {
                    self.drive_surface(page, zoom_surface::Message::Reset);
                }
                let effect = self.pages.handle(pages::Message::ViewerAppeared, &mut self.viewer);
                (Effect::None, self.apply_pages_effect(effect))
            }
            Message::ViewportMeasured(size) => {
                if self.viewport.update(size) {
                    let pages: Vec<PageId> = self.surfaces.keys().copied().collect();
                    for page in pages {
                        self.drive_surface(page, zoom_surface::Message::Layout(size));
                    }
                }
                (Effect::None, Task::none())
            }
            Message::Resized { size, then } => {
                let _ = self.handle_message(Message::ViewportMeasured(size));
                self.handle_message(*then)
            }
            Message::Pointer(msg) => {
                if self.viewer.is_closed() {
                    return (Effect::None, Task::none());
                }
                let effect = self.gesture.handle(msg);
                (Effect::None, self.route_gesture(effect))
            }
            Message::WheelScrolled { lines, position } => {
                if let Some(page) = self.viewer.selected_id() {
                    self.drive_surface(page, zoom_surface::Message::Wheel { lines, position });
                }
                (Effect::None, Task::none())
            }
            Message::Tick(now) => (self.tick(now), Task::none()),
            Message::PageFetched { page, result } => {
                self.on_page_fetched(page, result);
                (Effect::None, Task::none())
            }
            Message::CloseTapped => {
                if self.viewer.close() {
                    self.closed_reported = true;
                    (Effect::Closed, Task::none())
                } else {
                    (Effect::None, Task::none())
                }
            }
            Message::NextPage => self.navigate(pages::Message::Next),
            Message::PreviousPage => self.navigate(pages::Message::Previous),
        }
    }

    fn navigate(&mut self, msg: pages::Message) -> (Effect, Task<Message>) {
        if self.gesture.is_active() || self.viewer.is_closed() {
            return (Effect::None, Task::none());
        }
        let effect = self.pages.handle(msg, &mut self.viewer);
        (Effect::None, self.apply_pages_effect(effect))
    }

    fn route_gesture(&mut self, effect: gesture::Effect) -> Task<Message> {
        match effect {
            gesture::Effect::None | gesture::Effect::PinchEnded => {}
            gesture::Effect::DragStarted {
                axis: gesture::Axis::Vertical,
                translation,
                ..
            } => match self.dismiss.handle(dismiss::Message::Began, &self.viewer) {
                dismiss::Effect::Rejected => {
                    self.route = Route::Pan;
                    self.pan_selected(translation);
                }
                other => {
                    self.route = Route::Dismiss;
                    self.apply_dismiss_effect(other);
                    self.dismiss_moved(translation);
                }
            },
            gesture::Effect::DragStarted {
                axis: gesture::Axis::Horizontal,
                translation,
                ..
            } => {
                if self.viewer.is_at_fit() {
                    self.route = Route::Swipe;
                    let effect = self
                        .pages
                        .handle(pages::Message::SwipeMoved(translation.x), &mut self.viewer);
                    return self.apply_pages_effect(effect);
                }
                self.route = Route::Pan;
                self.pan_selected(translation);
            }
            gesture::Effect::DragMoved {
                translation, delta, ..
            } => match self.route {
                Route::Dismiss => self.dismiss_moved(translation),
                Route::Swipe => {
                    let effect = self
                        .pages
                        .handle(pages::Message::SwipeMoved(translation.x), &mut self.viewer);
                    return self.apply_pages_effect(effect);
                }
                Route::Pan => self.pan_selected(delta),
                Route::None => {}
            },
            gesture::Effect::DragEnded { translation, at, .. } => {
                match std::mem::replace(&mut self.route, Route::None) {
                    Route::Dismiss => {
                        let effect = self
                            .dismiss
                            .handle(dismiss::Message::Ended { translation }, &self.viewer);
                        self.apply_dismiss_effect(effect);
                    }
                    Route::Swipe => {
                        let effect = self.pages.handle(
                            pages::Message::SwipeEnded {
                                dx: translation.x,
                                viewport_width: self.viewport.width(),
                                at,
                            },
                            &mut self.viewer,
                        );
                        return self.apply_pages_effect(effect);
                    }
                    Route::Pan => {
                        // A refused dismiss still needs its end to reset.
                        let effect = self
                            .dismiss
                            .handle(dismiss::Message::Ended { translation }, &self.viewer);
                        self.apply_dismiss_effect(effect);
                    }
                    Route::None => {}
                }
            }
            gesture::Effect::DragCancelled { at, .. } => {
                match std::mem::replace(&mut self.route, Route::None) {
                    Route::Dismiss | Route::Pan => {
                        let effect = self.dismiss.handle(dismiss::Message::Cancelled, &self.viewer);
                        self.apply_dismiss_effect(effect);
                    }
                    Route::Swipe => {
                        let effect = self
                            .pages
                            .handle(pages::Message::SwipeCancelled { at }, &mut self.viewer);
                        return self.apply_pages_effect(effect);
                    }
                    Route::None => {}
                }
            }
            gesture::Effect::Pinched { factor, center } => {
                if let Some(page) = self.viewer.selected_id() {
                    self.drive_surface(page, zoom_surface::Message::Pinch { factor, center });
                }
            }
            gesture::Effect::DoubleTapped { position, at } => {
                if let Some(page) = self.viewer.selected_id() {
                    self.drive_surface(page, zoom_surface::Message::DoubleTap { position, at });
                }
            }
        }
        Task::none()
    }

    fn dismiss_moved(&mut self, translation: Vector) {
        let effect = self.dismiss.handle(
            dismiss::Message::Moved {
                translation,
                viewport_height: self.viewport.height(),
            },
            &self.viewer,
        );
        self.apply_dismiss_effect(effect);
    }

    fn apply_dismiss_effect(&mut self, effect: dismiss::Effect) {
        if let dismiss::Effect::Defer(update) = effect {
            self.queue.enqueue(update);
        }
    }

    fn pan_selected(&mut self, delta: Vector) {
        if let Some(page) = self.viewer.selected_id() {
            self.drive_surface(page, zoom_surface::Message::Pan(delta));
        }
    }

    fn drive_surface(&mut self, page: PageId, msg: zoom_surface::Message) {
        let Some(surface) = self.surfaces.get_mut(&page) else {
            return;
        };
        if let zoom_surface::Effect::ZoomChanged(report) = surface.handle(msg) {
            self.bridge.record(&mut self.viewer, page, report);
        }
    }

    fn apply_pages_effect(&mut self, effect: pages::Effect) -> Task<Message> {
        match effect {
            pages::Effect::None => Task::none(),
            pages::Effect::Selected(page) => {
                self.bridge.republish(&mut self.viewer, page);
                let effect = self.pages.handle(pages::Message::PageAppeared(page), &mut self.viewer);
                self.apply_pages_effect(effect)
            }
            pages::Effect::Fetch(page) => {
                let Some(model) = self.viewer.page(page) else {
                    return Task::none();
                };
                self.fetcher
                    .request(model, |page, result| Message::PageFetched { page, result })
                    .unwrap_or_else(Task::none)
            }
        }
    }

    fn on_page_fetched(&mut self, page: PageId, result: Result<Bitmap, Error>) {
        match result {
            Ok(bitmap) => {
                let size = bitmap.size();
                if !self.viewer.set_page_image(page, bitmap) {
                    return;
                }
                tracing::debug!(%page, width = size.width, height = size.height, "page loaded");
                self.surfaces.insert(
                    page,
                    zoom_surface::State::new(size, self.settings.max_zoom, self.settings.animation),
                );
                if let Some(viewport) = self.viewport.size {
                    self.drive_surface(page, zoom_surface::Message::Layout(viewport));
                }
            }
            Err(err) => {
                tracing::warn!(%page, error = %err, "page fetch failed");
                if let Some(hook) = &self.on_fetch_error {
                    hook(page, &err);
                }
            }
        }
    }

    fn tick(&mut self, now: Instant) -> Effect {
        self.queue.drain_into(&mut self.viewer, now);
        self.viewer.advance(now);
        self.pages.handle(pages::Message::Tick(now), &mut self.viewer);

        let animating: Vec<PageId> = self
            .surfaces
            .iter()
            .filter(|(_, surface)| surface.is_animating())
            .map(|(page, _)| *page)
            .collect();
        for page in animating {
            self.drive_surface(page, zoom_surface::Message::Tick(now));
        }

        if self.dismiss.phase() == dismiss::Phase::SnapBack && !self.viewer.is_animating() {
            self.dismiss.handle(dismiss::Message::SnapBackFinished, &self.viewer);
        }

        if self.viewer.is_closed() && !self.closed_reported {
            self.closed_reported = true;
            return Effect::Closed;
        }
        Effect::None
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let tick = if self.needs_tick() {
            iced::time::every(UI_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        };

        let keys = event::listen_with(|event, status, _window| {
            if let event::Status::Captured = status {
                return None;
            }
            match event {
                event::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(named),
                    ..
                }) => match named {
                    Named::ArrowRight => Some(Message::NextPage),
                    Named::ArrowLeft => Some(Message::PreviousPage),
                    Named::Escape => Some(Message::CloseTapped),
                    _ => None,
                },
                _ => None,
            }
        });

        Subscription::batch([tick, keys])
    }

    fn pane(&self, loading_label: String) -> Pane {
        let slots = [-1_i8, 0, 1]
            .into_iter()
            .filter_map(|shift| {
                let id = self.viewer.neighbor(isize::from(shift))?;
                let image = self.viewer.page(id).and_then(|page| {
                    let bitmap = page.image()?;
                    let surface = self.surfaces.get(&id)?;
                    surface
                        .zoom()
                        .is_measured()
                        .then(|| (bitmap.handle.clone(), surface.zoom().image_bounds()))
                });
                Some(Slot { shift, image })
            })
            .collect();

        Pane {
            slots,
            swipe_offset: self.pages.swipe_offset(),
            drag_offset: self.viewer.drag_offset(),
            backdrop_opacity: self.viewer.backdrop_opacity(),
            loading_label,
        }
    }

    /// Padding placing the overlay below the top safe inset.
    fn overlay_padding(&self) -> Padding {
        Padding {
            top: self.viewport.top_inset + OVERLAY_MARGIN,
            right: OVERLAY_MARGIN,
            bottom: 0.0,
            left: OVERLAY_MARGIN,
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let pane = Canvas::new(self.pane(i18n.tr("viewer-loading")))
            .width(Length::Fill)
            .height(Length::Fill);

        let current = self.viewer.selected_index().to_string();
        let total = self.viewer.pages().len().to_string();
        let counter = text(i18n.tr_with_args(
            "viewer-page-counter",
            &[("current", current.as_str()), ("total", total.as_str())],
        ))
        .size(14);

        let overlay = Row::new()
            .push(counter)
            .push(Space::new().width(Length::Fill))
            .push(button(text(i18n.tr("viewer-close"))).on_press(Message::CloseTapped))
            .align_y(iced::alignment::Vertical::Center);

        let overlay = container(overlay)
            .width(Length::Fill)
            .padding(self.overlay_padding());

        Stack::new().push(pane).push(overlay).into()
    }
}
