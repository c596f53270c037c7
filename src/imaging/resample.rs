//! Aspect-preserving scale-to-square with bilinear interpolation.
//!
//! The longer source edge maps exactly onto the target; the scaled content is
//! centered on a fully transparent square (letterbox or pillarbox for
//! non-square sources).
//!
//! Each destination pixel `(x, y)` samples source coordinate `(x/s, y/s)` and
//! blends the four surrounding samples:
//!
//! ```text
//! top    = c00 * (1 - fx) + c10 * fx
//! bottom = c01 * (1 - fx) + c11 * fx
//! out    = top * (1 - fy) + bottom * fy
//! ```
//!
//! Channels are blended as `f64` and rounded once on store. Alpha is blended
//! exactly like colour: samples are treated as straight, not premultiplied.

use super::buffer::PixelBuffer;
use super::calculations::{centered_offset, content_dimensions};
use image::Rgba;

/// Resize `image` to a `target × target` square, preserving aspect ratio.
///
/// Always returns exactly `target × target`. Area outside the centered
/// content is fully transparent; an empty source yields an all-transparent
/// buffer.
pub fn resize(image: &PixelBuffer, target: u32) -> PixelBuffer {
    let mut out = PixelBuffer::transparent(target, target);
    if image.is_empty() || target == 0 {
        return out;
    }

    let (width, height) = image.dimensions();
    let (content_w, content_h) = content_dimensions(width, height, target);
    let offset_x = centered_offset(target, content_w);
    let offset_y = centered_offset(target, content_h);

    // Source pixels per destination pixel, i.e. 1 / s.
    let step = f64::from(width.max(height)) / f64::from(target);

    for y in 0..content_h {
        let sy = axis_sample(f64::from(y) * step, height);
        for x in 0..content_w {
            let sx = axis_sample(f64::from(x) * step, width);
            out.put_pixel(offset_x + x, offset_y + y, bilinear(image, sx, sy));
        }
    }

    out
}

/// The two neighbouring source indices along one axis and the weight of the
/// second one.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSample {
    lo: u32,
    hi: u32,
    frac: f64,
}

/// Split a fractional source coordinate into neighbours and weight.
///
/// Once the integer part reaches `len - 1` the pair is clamped to
/// `(len - 2, len - 1)` with weight 1.0, which reproduces the edge sample
/// exactly without reading past the end. A single-sample axis uses that
/// sample for both neighbours.
fn axis_sample(coord: f64, len: u32) -> AxisSample {
    if len < 2 {
        return AxisSample {
            lo: 0,
            hi: 0,
            frac: 0.0,
        };
    }

    let whole = coord.floor();
    let lo = whole as u32;
    if lo >= len - 1 {
        AxisSample {
            lo: len - 2,
            hi: len - 1,
            frac: 1.0,
        }
    } else {
        AxisSample {
            lo,
            hi: lo + 1,
            frac: coord - whole,
        }
    }
}

fn bilinear(image: &PixelBuffer, sx: AxisSample, sy: AxisSample) -> Rgba<u8> {
    let c00 = image.pixel(sx.lo, sy.lo);
    let c10 = image.pixel(sx.hi, sy.lo);
    let c01 = image.pixel(sx.lo, sy.hi);
    let c11 = image.pixel(sx.hi, sy.hi);

    let mut out = [0u8; 4];
    for (channel, value) in out.iter_mut().enumerate() {
        let blended = blend(
            f64::from(c00[channel]),
            f64::from(c10[channel]),
            f64::from(c01[channel]),
            f64::from(c11[channel]),
            sx.frac,
            sy.frac,
        );
        *value = blended.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Bilinear blend of one channel.
fn blend(c00: f64, c10: f64, c01: f64, c11: f64, fx: f64, fy: f64) -> f64 {
    let top = c00 * (1.0 - fx) + c10 * fx;
    let bottom = c01 * (1.0 - fx) + c11 * fx;
    top * (1.0 - fy) + bottom * fy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::buffer::TRANSPARENT;
    use crate::test_helpers::{assert_fully_opaque, solid_image};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    // =========================================================================
    // axis_sample / blend
    // =========================================================================

    #[test]
    fn axis_sample_interior() {
        let s = axis_sample(2.25, 10);
        assert_eq!((s.lo, s.hi), (2, 3));
        assert!((s.frac - 0.25).abs() < 1e-12);
    }

    #[test]
    fn axis_sample_clamps_at_last_index() {
        assert_eq!(
            axis_sample(9.0, 10),
            AxisSample {
                lo: 8,
                hi: 9,
                frac: 1.0
            }
        );
        assert_eq!(
            axis_sample(9.7, 10),
            AxisSample {
                lo: 8,
                hi: 9,
                frac: 1.0
            }
        );
    }

    #[test]
    fn axis_sample_single_sample_axis() {
        assert_eq!(
            axis_sample(0.6, 1),
            AxisSample {
                lo: 0,
                hi: 0,
                frac: 0.0
            }
        );
    }

    #[test]
    fn blend_corners_and_midpoint() {
        assert_eq!(blend(10.0, 20.0, 30.0, 40.0, 0.0, 0.0), 10.0);
        assert_eq!(blend(10.0, 20.0, 30.0, 40.0, 1.0, 0.0), 20.0);
        assert_eq!(blend(10.0, 20.0, 30.0, 40.0, 0.0, 1.0), 30.0);
        assert_eq!(blend(10.0, 20.0, 30.0, 40.0, 1.0, 1.0), 40.0);
        assert_eq!(blend(10.0, 20.0, 30.0, 40.0, 0.5, 0.5), 25.0);
    }

    // =========================================================================
    // resize
    // =========================================================================

    #[test]
    fn resize_output_is_always_target_square() {
        let src = solid_image(200, RED);
        for target in [1, 16, 64, 128, 256, 512] {
            let out = resize(&src, target);
            assert_eq!(out.dimensions(), (target, target));
        }
    }

    #[test]
    fn resize_square_source_fills_target() {
        let out = resize(&solid_image(300, RED), 32);
        assert_fully_opaque(&out);
        assert_eq!(out.pixel(0, 0), RED);
        assert_eq!(out.pixel(31, 31), RED);
    }

    #[test]
    fn resize_upscale_square_fills_target() {
        let out = resize(&solid_image(3, RED), 64);
        assert_fully_opaque(&out);
    }

    #[test]
    fn resize_same_size_is_identity() {
        let src = PixelBuffer::from_fn(8, 8, |x, y| Rgba([x as u8 * 30, y as u8 * 30, 7, 255]));
        assert_eq!(resize(&src, 8), src);
    }

    #[test]
    fn resize_landscape_letterboxes_top_and_bottom() {
        let src = PixelBuffer::from_fn(400, 200, |_, _| RED);
        let out = resize(&src, 64);

        // Content is 64x32 at offset (0, 16).
        assert_eq!(out.pixel(32, 0), TRANSPARENT);
        assert_eq!(out.pixel(32, 15), TRANSPARENT);
        assert_eq!(out.pixel(32, 16), RED);
        assert_eq!(out.pixel(0, 47), RED);
        assert_eq!(out.pixel(63, 47), RED);
        assert_eq!(out.pixel(32, 48), TRANSPARENT);
        assert_eq!(out.pixel(32, 63), TRANSPARENT);
    }

    #[test]
    fn resize_portrait_pillarboxes_left_and_right() {
        let src = PixelBuffer::from_fn(100, 200, |_, _| RED);
        let out = resize(&src, 16);

        // Content is 8x16 at offset (4, 0).
        assert_eq!(out.pixel(3, 8), TRANSPARENT);
        assert_eq!(out.pixel(4, 8), RED);
        assert_eq!(out.pixel(11, 8), RED);
        assert_eq!(out.pixel(12, 8), TRANSPARENT);
    }

    #[test]
    fn resize_interpolates_between_columns() {
        // Two columns, black then white, upscaled to 4 → step 0.5.
        let src = PixelBuffer::from_fn(2, 2, |x, _| {
            let v = if x == 0 { 0 } else { 200 };
            Rgba([v, v, v, 255])
        });
        let out = resize(&src, 4);
        assert_eq!(out.pixel(0, 0)[0], 0);
        assert_eq!(out.pixel(1, 0)[0], 100);
        // x = 2 → coord 1.0 → clamped to edge sample.
        assert_eq!(out.pixel(2, 0)[0], 200);
        assert_eq!(out.pixel(3, 0)[0], 200);
    }

    #[test]
    fn resize_interpolates_alpha_independently() {
        // Transparent black next to opaque white: colour and alpha both halve.
        let src = PixelBuffer::from_fn(2, 2, |x, _| {
            if x == 0 {
                TRANSPARENT
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let out = resize(&src, 4);
        assert_eq!(out.pixel(1, 0), Rgba([128, 128, 128, 128]));
    }

    #[test]
    fn resize_single_pixel_source() {
        let src = solid_image(1, RED);
        let out = resize(&src, 16);
        assert_fully_opaque(&out);
        assert_eq!(out.pixel(15, 15), RED);
    }

    #[test]
    fn resize_single_row_source() {
        let src = PixelBuffer::from_fn(4, 1, |_, _| RED);
        let out = resize(&src, 8);
        // Content is 8x2 at offset (0, 3).
        assert_eq!(out.pixel(0, 3), RED);
        assert_eq!(out.pixel(7, 4), RED);
        assert_eq!(out.pixel(0, 2), TRANSPARENT);
        assert_eq!(out.pixel(0, 5), TRANSPARENT);
    }

    #[test]
    fn resize_empty_source_is_transparent() {
        let out = resize(&PixelBuffer::transparent(0, 0), 16);
        assert_eq!(out.dimensions(), (16, 16));
        assert_eq!(out.pixel(8, 8), TRANSPARENT);
    }
}
