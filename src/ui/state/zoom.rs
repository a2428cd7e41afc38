// SPDX-License-Identifier: MPL-2.0
//! Per-page zoom state
//!
//! This module holds the zoom geometry of one page, including:
//! - Fit (minimum) zoom computed from the viewport and content sizes
//! - Maximum zoom ceiling
//! - Scroll offset of the zoomed content, clamped to the scrollable range
//! - Centering of content smaller than the viewport
//!
//! Offsets are expressed in scaled-content pixels, like a scroll view's
//! content offset: `(0, 0)` shows the top-left corner of the content.

pub use crate::config::{DEFAULT_MAX_ZOOM, MAX_MAX_ZOOM, MIN_MAX_ZOOM};

use iced::{Point, Rectangle, Size, Vector};

/// Maximum zoom factor, guaranteed to be within valid range (1×–20×).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxZoom(f32);

impl MaxZoom {
    /// Creates a new maximum zoom, clamping the value to the valid range.
    ///
    /// `NaN` yields the default.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(MIN_MAX_ZOOM, MAX_MAX_ZOOM))
    }

    /// Returns the raw zoom factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for MaxZoom {
    fn default() -> Self {
        Self(DEFAULT_MAX_ZOOM)
    }
}

/// Scale at which `content` fits entirely inside `viewport`.
///
/// Returns `None` while the viewport has no area.
#[must_use]
pub fn fit_zoom(content: Size, viewport: Size) -> Option<f32> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    Some((viewport.width / content.width).min(viewport.height / content.height))
}

/// Zoom geometry of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    content: Size,
    viewport: Size,
    zoom: f32,
    min_zoom: f32,
    max_zoom: MaxZoom,
    offset: Vector,
    measured: bool,
}

impl ZoomState {
    /// Creates the zoom state for content of the given intrinsic size.
    ///
    /// # Panics
    ///
    /// Panics if `content` has a zero (or negative) dimension.
    #[must_use]
    pub fn new(content: Size, max_zoom: MaxZoom) -> Self {
        assert!(
            content.width > 0.0 && content.height > 0.0,
            "zoom content must have a non-empty size, got {content:?}"
        );
        Self {
            content,
            viewport: Size::ZERO,
            zoom: 1.0,
            min_zoom: 1.0,
            max_zoom,
            offset: Vector::ZERO,
            measured: false,
        }
    }

    /// Recomputes the fit zoom for a new viewport size.
    ///
    /// A page that was at fit (or never measured) is re-fitted; a zoom that
    /// falls below the new fit is raised to it; any other zoom is kept.
    /// Returns `true` when the zoom or fit values changed.
    pub fn layout(&mut self, viewport: Size) -> bool {
        let Some(fit) = fit_zoom(self.content, viewport) else {
            return false;
        };

        let before = (self.zoom, self.min_zoom, self.measured);
        let was_at_fit = !self.measured || self.is_at_fit();

        self.viewport = viewport;
        self.min_zoom = fit;
        if was_at_fit {
            self.zoom = fit;
            self.offset = Vector::ZERO;
        } else if self.zoom < fit {
            self.zoom = fit;
        }
        self.offset = self.clamp_offset(self.offset);
        self.measured = true;

        before != (self.zoom, self.min_zoom, self.measured)
    }

    /// Whether a viewport size has been applied yet.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    /// Effective maximum: the configured ceiling, or fit when fit is larger.
    pub fn max_zoom(&self) -> f32 {
        self.max_zoom.value().max(self.min_zoom)
    }

    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns whether the current zoom is exactly the fit zoom.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_at_fit(&self) -> bool {
        self.zoom == self.min_zoom
    }

    #[must_use]
    pub fn scaled_size(&self) -> Size {
        self.scaled_size_at(self.zoom)
    }

    fn scaled_size_at(&self, zoom: f32) -> Size {
        Size::new(self.content.width * zoom, self.content.height * zoom)
    }

    /// Inset that centers content smaller than the viewport on each axis.
    #[must_use]
    pub fn content_origin(&self) -> Vector {
        let scaled = self.scaled_size();
        Vector::new(
            (self.viewport.width - scaled.width).max(0.0) / 2.0,
            (self.viewport.height - scaled.height).max(0.0) / 2.0,
        )
    }

    fn max_offset_at(&self, zoom: f32) -> Vector {
        let scaled = self.scaled_size_at(zoom);
        Vector::new(
            (scaled.width - self.viewport.width).max(0.0),
            (scaled.height - self.viewport.height).max(0.0),
        )
    }

    #[must_use]
    pub fn max_offset(&self) -> Vector {
        self.max_offset_at(self.zoom)
    }

    fn clamp_offset_at(&self, offset: Vector, zoom: f32) -> Vector {
        let max = self.max_offset_at(zoom);
        Vector::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    #[must_use]
    pub fn clamp_offset(&self, offset: Vector) -> Vector {
        self.clamp_offset_at(offset, self.zoom)
    }

    /// Where the scaled content is drawn, relative to the viewport origin.
    #[must_use]
    pub fn image_bounds(&self) -> Rectangle {
        let origin = self.content_origin();
        Rectangle::new(
            Point::new(origin.x - self.offset.x, origin.y - self.offset.y),
            self.scaled_size(),
        )
    }

    /// Converts a viewport point to unscaled content coordinates.
    #[must_use]
    pub fn to_content(&self, point: Point) -> Point {
        let origin = self.content_origin();
        Point::new(
            (point.x - origin.x + self.offset.x) / self.zoom,
            (point.y - origin.y + self.offset.y) / self.zoom,
        )
    }

    /// Zooms to `zoom` keeping the content under `anchor` in place.
    ///
    /// Returns `true` if the zoom or offset changed.
    pub fn zoom_anchored(&mut self, zoom: f32, anchor: Point) -> bool {
        let before = (self.zoom, self.offset);
        let target = zoom.clamp(self.min_zoom, self.max_zoom());
        let content_point = self.to_content(anchor);

        self.zoom = target;
        let origin = self.content_origin();
        let offset = Vector::new(
            origin.x + content_point.x * target - anchor.x,
            origin.y + content_point.y * target - anchor.y,
        );
        self.offset = self.clamp_offset(offset);

        before != (self.zoom, self.offset)
    }

    /// Rectangle in content coordinates that zooming to `target` should show,
    /// centered on `content_point`.
    #[must_use]
    pub fn zoom_rect(&self, target: f32, content_point: Point) -> Rectangle {
        let size = Size::new(self.viewport.width / target, self.viewport.height / target);
        Rectangle::new(
            Point::new(
                content_point.x - size.width / 2.0,
                content_point.y - size.height / 2.0,
            ),
            size,
        )
    }

    /// Scroll offset that centers `rect` in the viewport at `zoom`.
    #[must_use]
    pub fn rect_offset(&self, rect: Rectangle, zoom: f32) -> Vector {
        let center = rect.center();
        let offset = Vector::new(
            center.x * zoom - self.viewport.width / 2.0,
            center.y * zoom - self.viewport.height / 2.0,
        );
        self.clamp_offset_at(offset, zoom)
    }

    /// Sets zoom and offset directly, clamping both.
    pub fn apply(&mut self, zoom: f32, offset: Vector) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom());
        self.offset = self.clamp_offset(offset);
    }

    /// Moves the content by `delta` viewport pixels.
    ///
    /// Returns `true` if the offset changed.
    pub fn pan(&mut self, delta: Vector) -> bool {
        let before = self.offset;
        self.offset = self.clamp_offset(self.offset - delta);
        before != self.offset
    }

    /// Returns to fit zoom with no scroll offset.
    pub fn reset(&mut self) {
        self.zoom = self.min_zoom;
        self.offset = Vector::ZERO;
    }
}
