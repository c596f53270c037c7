//! Icon transforms built on the calculations and the resampler.
//!
//! Every function here is pure: it reads its input buffer and returns a new
//! one. Percentages are assumed already validated by the caller
//! (see [`PipelineConfig::validate`](crate::pipeline::PipelineConfig::validate)).

use super::buffer::{PixelBuffer, TRANSPARENT};
use super::calculations::{crop_rect, padding_px};
use super::geometry::is_inside;
use super::resample::resize;

/// Keep the centered `percent` of each dimension.
///
/// `percent = 100` returns a same-size copy.
pub fn crop_center(image: &PixelBuffer, percent: u32) -> PixelBuffer {
    let rect = crop_rect(image.width(), image.height(), percent);
    image.sub_image(rect.x, rect.y, rect.width, rect.height)
}

/// Mask the corners of a square image with a hard quarter-circle cut.
///
/// Pixels outside the rounded rectangle become fully transparent; all others
/// are copied unchanged. A radius larger than half the side is clamped to
/// half the side so the corner zones never overlap.
pub fn round_corners(image: &PixelBuffer, radius: u32) -> PixelBuffer {
    debug_assert!(image.is_square(), "round_corners expects a square image");
    let size = image.width();
    let radius = radius.min(size / 2);

    PixelBuffer::from_fn(size, image.height(), |x, y| {
        if is_inside(x, y, size, radius) {
            image.pixel(x, y)
        } else {
            TRANSPARENT
        }
    })
}

/// Surround a square image with a transparent margin, then scale back to
/// `target × target`.
///
/// The margin on each side is `floor(size * percent / 100)` pixels of the
/// input, so the visible content shrinks while the output size stays fixed.
/// `percent = 0` returns an unchanged copy.
pub fn add_padding(image: &PixelBuffer, percent: u32, target: u32) -> PixelBuffer {
    if percent == 0 {
        return image.clone();
    }

    let current = image.width();
    let padding = padding_px(current, percent);
    let padded_size = current + padding * 2;

    let mut canvas = PixelBuffer::transparent(padded_size, padded_size);
    canvas.replace(image, padding, padding);

    resize(&canvas, target)
}
