// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Holds the measured size of the viewer surface and the top safe inset used
//! to place overlays.

use iced::Size;

/// Manages viewport metrics
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    /// Current viewport size, `None` until the first layout pass
    pub size: Option<Size>,

    /// Previous viewport size (for layout change detection)
    pub previous_size: Option<Size>,

    /// Device-independent top safe inset
    pub top_inset: f32,
}

impl ViewportState {
    /// Records a new viewport size.
    /// Returns true if the size differs from the last recorded one.
    pub fn update(&mut self, size: Size) -> bool {
        self.previous_size = self.size;
        self.size = Some(size);
        self.previous_size != self.size
    }

    /// Viewport width, or zero before the first layout pass.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.map_or(0.0, |size| size.width)
    }

    /// Viewport height, or zero before the first layout pass.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.map_or(0.0, |size| size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_viewport_is_unmeasured() {
        let state = ViewportState::default();
        assert!(state.size.is_none());
        assert_eq!(state.width(), 0.0);
        assert_eq!(state.height(), 0.0);
    }

    #[test]
    fn first_update_reports_change() {
        let mut state = ViewportState::default();
        assert!(state.update(Size::new(400.0, 800.0)));
        assert_eq!(state.height(), 800.0);
    }

    #[test]
    fn identical_update_reports_no_change() {
        let mut state = ViewportState::default();
        state.update(Size::new(400.0, 800.0));
        assert!(!state.update(Size::new(400.0, 800.0)));
        assert_eq!(state.previous_size, Some(Size::new(400.0, 800.0)));
    }

    #[test]
    fn rotation_reports_change() {
        let mut state = ViewportState::default();
        state.update(Size::new(400.0, 800.0));
        assert!(state.update(Size::new(800.0, 400.0)));
        assert_eq!(state.width(), 800.0);
    }
}
