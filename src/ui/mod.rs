// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`viewer`] - Paged image viewer with zoom, swipe and dismiss gestures
//! - [`state`] - Reusable state management (zoom, viewport, drag)

pub mod state;
pub mod viewer;
