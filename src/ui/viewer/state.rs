// SPDX-License-Identifier: MPL-2.0
//! Observable viewer state.
//!
//! [`ViewerState`] is the single store the viewer sub-components read and
//! mutate: the ordered pages, the selected page, the selected page's zoom
//! values, and the backdrop presentation (opacity and drag offset). Every
//! mutation is announced to subscribers as one [`Change`].

use super::animation::Tween;
use crate::media::Bitmap;
use iced::Vector;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque page identity. Pages compare and hash by this id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// One page of the viewer.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub id: PageId,
    pub source: Option<String>,
    image: Option<Bitmap>,
}

impl PageModel {
    pub fn new(source: Option<String>) -> Self {
        Self {
            id: PageId::next(),
            source,
            image: None,
        }
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Stores the fetched image. A page is loaded at most once; later calls
    /// are ignored and return `false`.
    pub fn set_image(&mut self, image: Bitmap) -> bool {
        if self.image.is_some() {
            return false;
        }
        self.image = Some(image);
        true
    }
}

impl PartialEq for PageModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PageModel {}

impl std::hash::Hash for PageModel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A mutation of [`ViewerState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    SelectedPage(PageId),
    Zoom { current: f32, fit: f32 },
    Presentation { opacity: f32, offset: Vector },
    PageLoaded(PageId),
    Closed,
}

/// Handle returned by [`ViewerState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type CloseCallback = Box<dyn FnOnce() + Send>;

type Observer = Box<dyn FnMut(&Change) + Send>;

#[derive(Debug, Clone, Copy)]
struct PresentationTransition {
    opacity: Tween<f32>,
    offset: Tween<Vector>,
}

pub struct ViewerState {
    pages: Vec<PageModel>,
    selected: Option<PageId>,
    zoom_scale: f32,
    fit_zoom_scale: f32,
    backdrop_opacity: f32,
    drag_offset: Vector,
    transition: Option<PresentationTransition>,
    on_close: Option<CloseCallback>,
    closed: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for ViewerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerState")
            .field("pages", &self.pages.len())
            .field("selected", &self.selected)
            .field("zoom_scale", &self.zoom_scale)
            .field("fit_zoom_scale", &self.fit_zoom_scale)
            .field("backdrop_opacity", &self.backdrop_opacity)
            .field("drag_offset", &self.drag_offset)
            .field("animating", &self.transition.is_some())
            .field("closed", &self.closed)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ViewerState {
    /// Creates one page per source, in order, and selects the first.
    pub fn new<I, S>(sources: I, on_close: Option<CloseCallback>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<PageModel> = sources
            .into_iter()
            .map(|source| PageModel::new(Some(source.into())))
            .collect();
        let selected = pages.first().map(|page| page.id);

        Self {
            pages,
            selected,
            zoom_scale: 1.0,
            fit_zoom_scale: 1.0,
            backdrop_opacity: 1.0,
            drag_offset: Vector::ZERO,
            transition: None,
            on_close,
            closed: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn subscribe(&mut self, observer: impl FnMut(&Change) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        before != self.observers.len()
    }

    fn notify(&mut self, change: Change) {
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
    }

    // =========================================================================
    // Pages
    // =========================================================================

    pub fn pages(&self) -> &[PageModel] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&PageModel> {
        self.pages.iter().find(|page| page.id == id)
    }

    fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    /// Stores a fetched image on its page. Returns `false` if the page is
    /// unknown or already loaded.
    pub fn set_page_image(&mut self, id: PageId, image: Bitmap) -> bool {
        let Some(page) = self.pages.iter_mut().find(|page| page.id == id) else {
            return false;
        };
        if !page.set_image(image) {
            return false;
        }
        self.notify(Change::PageLoaded(id));
        true
    }

    pub fn selected_page(&self) -> Option<&PageModel> {
        self.selected.and_then(|id| self.page(id))
    }

    pub fn selected_id(&self) -> Option<PageId> {
        self.selected
    }

    /// Makes `id` the selected page.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this viewer.
    pub fn select(&mut self, id: PageId) {
        assert!(
            self.position(id).is_some(),
            "{id} is not a page of this viewer"
        );
        if self.selected == Some(id) {
            return;
        }
        self.selected = Some(id);
        self.notify(Change::SelectedPage(id));
    }

    /// Page next to the selected one, `offset` positions away.
    pub fn neighbor(&self, offset: isize) -> Option<PageId> {
        let index = self.selected.and_then(|id| self.position(id))?;
        let target = index.checked_add_signed(offset)?;
        self.pages.get(target).map(|page| page.id)
    }

    /// 1-based position of the selected page, 1 when nothing is selected.
    pub fn selected_index(&self) -> usize {
        self.selected
            .and_then(|id| self.position(id))
            .map_or(1, |index| index + 1)
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    pub fn fit_zoom_scale(&self) -> f32 {
        self.fit_zoom_scale
    }

    /// Whether the selected page shows its fit zoom.
    #[allow(clippy::float_cmp)]
    pub fn is_at_fit(&self) -> bool {
        self.zoom_scale == self.fit_zoom_scale
    }

    #[allow(clippy::float_cmp)]
    pub fn set_zoom(&mut self, current: f32, fit: f32) {
        debug_assert!(current >= fit, "zoom {current} below fit {fit}");
        if self.zoom_scale == current && self.fit_zoom_scale == fit {
            return;
        }
        self.zoom_scale = current;
        self.fit_zoom_scale = fit;
        self.notify(Change::Zoom { current, fit });
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop_opacity
    }

    pub fn drag_offset(&self) -> Vector {
        self.drag_offset
    }

    #[allow(clippy::float_cmp)]
    fn write_presentation(&mut self, opacity: f32, offset: Vector) {
        let opacity = opacity.clamp(0.0, 1.0);
        if self.backdrop_opacity == opacity && self.drag_offset == offset {
            return;
        }
        self.backdrop_opacity = opacity;
        self.drag_offset = offset;
        self.notify(Change::Presentation { opacity, offset });
    }

    /// Writes the live drag presentation, cancelling any running transition.
    pub fn set_drag(&mut self, offset: Vector, opacity: f32) {
        self.transition = None;
        self.write_presentation(opacity, offset);
    }

    /// Fully opaque backdrop with no offset.
    pub fn reset_presentation(&mut self) {
        self.set_drag(Vector::ZERO, 1.0);
    }

    /// Animates the presentation toward `opacity` and `offset`.
    pub fn animate_presentation(
        &mut self,
        opacity: f32,
        offset: Vector,
        now: Instant,
        duration: Duration,
    ) {
        if duration.is_zero() {
            self.set_drag(offset, opacity);
            return;
        }
        self.transition = Some(PresentationTransition {
            opacity: Tween::new(self.backdrop_opacity, opacity.clamp(0.0, 1.0), now, duration),
            offset: Tween::new(self.drag_offset, offset, now, duration),
        });
    }

    /// Steps a running transition. Returns `true` while one was running.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        let finished = transition.opacity.is_finished(now);
        self.write_presentation(transition.opacity.sample(now), transition.offset.sample(now));
        if finished {
            self.transition = None;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// Invokes the close callback. Only the first call has an effect.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.transition = None;
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
        self.notify(Change::Closed);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
