//! Shared test utilities for the iconsmith test suite.
//!
//! Provides synthetic source images, alpha probes, and a temp workspace with
//! a real PNG on disk for the file-stage tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let src = bordered_image(400, TEAL, WHITE, 50);
//! let rounded = round_corners(&resize(&src, 64), 16);
//! assert_eq!(alpha_at(&rounded, 0, 0), 0);
//!
//! let tmp = setup_workspace(&src);
//! let input = tmp.path().join(SOURCE_NAME);
//! ```

use image::Rgba;
use std::path::Path;
use tempfile::TempDir;

use crate::imaging::{ImageBackend, PixelBuffer, RustBackend};

/// File name of the source image written by [`setup_workspace`].
pub const SOURCE_NAME: &str = "source.png";

// =========================================================================
// Synthetic images
// =========================================================================

/// A `size × size` image of one colour.
pub fn solid_image(size: u32, fill: Rgba<u8>) -> PixelBuffer {
    PixelBuffer::from_fn(size, size, |_, _| fill)
}

/// A `size × size` image of `fill` framed by a `width`-pixel `border`.
///
/// Handy for crop tests: a crop that removes at least `width` pixels per
/// side leaves only `fill`.
pub fn bordered_image(size: u32, fill: Rgba<u8>, border: Rgba<u8>, width: u32) -> PixelBuffer {
    let far = size.saturating_sub(width);
    PixelBuffer::from_fn(size, size, |x, y| {
        if x < width || y < width || x >= far || y >= far {
            border
        } else {
            fill
        }
    })
}

// =========================================================================
// Assertions
// =========================================================================

/// Alpha channel at `(x, y)`.
pub fn alpha_at(image: &PixelBuffer, x: u32, y: u32) -> u8 {
    image.pixel(x, y)[3]
}

/// Panic with the first offending coordinate if any pixel is not opaque.
pub fn assert_fully_opaque(image: &PixelBuffer) {
    for (x, y, pixel) in image.as_rgba().enumerate_pixels() {
        assert_eq!(pixel[3], 255, "pixel ({x}, {y}) is not opaque: {pixel:?}");
    }
}

// =========================================================================
// Workspace setup
// =========================================================================

/// A temp directory holding `image` encoded as [`SOURCE_NAME`].
pub fn setup_workspace(image: &PixelBuffer) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_png(tmp.path(), SOURCE_NAME, image);
    tmp
}

/// Encode `image` as PNG at `dir/name`.
pub fn write_png(dir: &Path, name: &str, image: &PixelBuffer) {
    let bytes = RustBackend::new().encode(image).unwrap();
    std::fs::write(dir.join(name), bytes).unwrap();
}
