// SPDX-License-Identifier: MPL-2.0
//! `lens_pager` is a full-screen paged image viewer built with the Iced GUI
//! framework.
//!
//! Pages are fetched on demand from files or http(s) URLs, can be zoomed by
//! pinch, wheel or double tap, paged by horizontal swipes and dismissed by a
//! vertical drag.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
