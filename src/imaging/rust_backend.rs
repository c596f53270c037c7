//! Pure Rust codec backend, no system libraries.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, WebP) | `image::load_from_memory` (format sniffed from the bytes) |
//! | Convert to RGBA8 | `image::DynamicImage::into_rgba8` |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, RGBA8, straight alpha |

use super::backend::{BackendError, ImageBackend};
use super::buffer::PixelBuffer;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, BackendError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(PixelBuffer::from(decoded))
    }

    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                image.as_rgba().as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| BackendError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
