//! Display-handle abstraction for hints.
//!
//! The core never talks to a renderer directly. Hosts implement
//! [`TextureAllocator`] to upload decoded hint images to their own renderer;
//! the deck only tracks the opaque handles it gets back. This module also
//! holds the fit and placement math used when drawing a hint into the
//! overlay window.

use image::RgbaImage;

use crate::error::Result;

/// An opaque id naming a texture uploaded to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Create a handle from a raw renderer id.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw renderer id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The seam between the deck and the host renderer.
///
/// Implementations live with the host integration. The deck creates a
/// texture lazily when a hint first draws and releases it when the hint
/// scrolls out of view, so at most one hint holds renderer memory.
pub trait TextureAllocator {
    /// Upload an RGBA image and return a handle to the resulting texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot allocate the texture.
    fn create(&self, image: &RgbaImage) -> Result<TextureHandle>;

    /// Release a previously created texture.
    fn deallocate(&self, handle: TextureHandle);
}

/// Uniform scale factor that fits an image inside a viewport while
/// preserving its aspect ratio.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn scale_to_fit(image_size: (u32, u32), viewport: (f32, f32)) -> f32 {
    let (width, height) = image_size;
    let width_scale = viewport.0 / width as f32;
    let height_scale = viewport.1 / height as f32;
    width_scale.min(height_scale)
}

/// Default overlay placement offset: `size / proportion` pixels in from the
/// screen edge, capped at `min` pixels.
#[must_use]
pub fn offset_from_edge(size: u32, proportion: u32, min: u32) -> u32 {
    (size / proportion).min(min)
}
