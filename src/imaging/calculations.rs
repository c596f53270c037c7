//! Pure calculation functions for icon geometry.
//!
//! All functions here are pure and testable without any pixels or I/O.
//! Products are computed in `u64` so large sources cannot overflow.

/// An axis-aligned rectangle inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the centered rectangle that keeps `percent` of each dimension.
///
/// # Arguments
/// * `width`, `height` - Source dimensions
/// * `percent` - Share of each dimension to keep, 1–100
///
/// # Returns
/// * Rectangle of `floor(W*p/100) × floor(H*p/100)` centered with floor offsets
///
/// ```text
/// 100x100 at 80%  → 80x80 at (10, 10)
/// 101x100 at 50%  → 50x50 at (25, 25)
/// ```
pub fn crop_rect(width: u32, height: u32, percent: u32) -> CropRect {
    let crop_w = scale_percent(width, percent);
    let crop_h = scale_percent(height, percent);
    CropRect {
        x: (width - crop_w) / 2,
        y: (height - crop_h) / 2,
        width: crop_w,
        height: crop_h,
    }
}

/// Calculate the scaled content size when fitting a source into a square.
///
/// The longer source edge maps exactly to `target`. The shorter edge is
/// `short * target / long`, rounded half-up in integer arithmetic, so a
/// square source always fills the whole target.
pub fn content_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width >= height {
        (target, scale_ratio(height, target, width))
    } else {
        (scale_ratio(width, target, height), target)
    }
}

/// Offset that centers `content` inside `outer` (floor division).
pub fn centered_offset(outer: u32, content: u32) -> u32 {
    outer.saturating_sub(content) / 2
}

/// Transparent margin in pixels for one side of a padded icon.
pub fn padding_px(size: u32, percent: u32) -> u32 {
    scale_percent(size, percent)
}

/// Corner radius for an icon of `size` pixels (truncating).
pub fn corner_radius(size: u32, radius_percent: u32) -> u32 {
    scale_percent(size, radius_percent)
}

fn scale_percent(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent) / 100) as u32
}

/// `round(value * num / den)` with ties rounded up. `den` must be non-zero.
fn scale_ratio(value: u32, num: u32, den: u32) -> u32 {
    let den = u64::from(den);
    ((u64::from(value) * u64::from(num) + den / 2) / den) as u32
}
