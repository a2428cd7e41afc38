// SPDX-License-Identifier: MPL-2.0
//! Full-screen paged image viewer with pinch zoom, swipe navigation and
//! drag-to-dismiss.
//!
//! [`component::State`] is the entry point: hosts feed it
//! [`component::Message`]s, render [`component::State::view`] and react to
//! [`component::Effect::Closed`].

pub mod animation;
pub mod component;
pub mod pane;
pub mod queue;
pub mod state;
pub mod subcomponents;

pub use state::{Change, PageId, PageModel, ViewerState};
