// SPDX-License-Identifier: MPL-2.0
//! Decoded page bitmaps ready for rendering.

use crate::error::{Error, Result};
use iced::widget::image;
use iced::Size;

/// A decoded RGBA image and its iced render handle.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Creates a bitmap from raw RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Decodes encoded bytes (PNG, JPEG, WebP, ...) into a bitmap.
    ///
    /// Images with a zero dimension are rejected: they cannot be laid out
    /// in a zoom surface.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image_rs::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Decode(format!("empty image ({width}x{height})")));
        }
        Ok(Self::from_rgba(width, height, rgba.into_raw()))
    }

    /// Intrinsic size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
