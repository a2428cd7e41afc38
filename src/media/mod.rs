// SPDX-License-Identifier: MPL-2.0
//! Page media: decoded bitmaps and the fetch collaborator that produces them.

pub mod bitmap;
pub mod fetch;

pub use bitmap::Bitmap;
pub use fetch::{Fetcher, Source};
