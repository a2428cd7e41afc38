// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the viewer.
//!
//! Each sub-component has its own State, Message, Effect, and handle() method.
//! The main component.rs orchestrates these sub-components.
//!
//! ## Architecture
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── gesture       - Pointer events to drags, pinches and double taps
//!     ├── zoom_surface  - Per-page zoom, pan and zoom-to-rect animation
//!     ├── zoom_bridge   - Publishes the selected page's zoom into ViewerState
//!     ├── pages         - Page strip, swipe navigation, fetch on appear
//!     └── dismiss       - Drag-to-dismiss state machine
//! ```

pub mod dismiss;
pub mod gesture;
pub mod pages;
pub mod zoom_bridge;
pub mod zoom_surface;
