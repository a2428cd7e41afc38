// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks where a single-finger drag started so gestures can report their
//! translation from the press point.

use iced::{Point, Vector};

/// Manages press-and-drag state for one pointer.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Position where the drag started
    pub start_position: Option<Point>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point) {
        self.is_dragging = true;
        self.start_position = Some(position);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
    }

    /// Translation from the press point to `current_position`.
    #[must_use]
    pub fn translation(&self, current_position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }
        let start = self.start_position?;
        Some(current_position - start)
    }
}
