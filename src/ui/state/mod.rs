// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Plain state shared by the viewer sub-components: per-page zoom geometry,
//! single-pointer drag tracking and viewport metrics.

pub mod drag;
pub mod viewport;
pub mod zoom;

pub use drag::DragState;
pub use viewport::ViewportState;
pub use zoom::{MaxZoom, ZoomState};
