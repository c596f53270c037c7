//! The pixel data model shared by every transform.
//!
//! A [`PixelBuffer`] is an owned RGBA8 raster with straight (non-premultiplied)
//! alpha. Transforms take `&PixelBuffer` and return a new buffer; nothing in
//! the crate mutates a buffer once another stage has started reading it.

use image::{DynamicImage, Rgba, RgbaImage};

/// Fully transparent sample: the letterbox, padding and mask background.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Owned RGBA8 raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// A `width × height` buffer with every channel zeroed.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    /// Build a buffer by evaluating `f` at every coordinate.
    pub fn from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_fn(width, height, f),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// Sample at `(x, y)`. Panics when out of bounds, like `RgbaImage`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        self.image.put_pixel(x, y, pixel);
    }

    /// Copy `src` into this buffer with its top-left corner at `(x, y)`.
    ///
    /// Source samples replace destination samples outright, alpha included
    /// (no compositing). Parts of `src` falling outside are dropped.
    pub(crate) fn replace(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        image::imageops::replace(&mut self.image, &src.image, i64::from(x), i64::from(y));
    }

    /// Extract the `width × height` rectangle at `(x, y)` as a new buffer.
    pub(crate) fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            image: image::imageops::crop_imm(&self.image, x, y, width, height).to_image(),
        }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl From<DynamicImage> for PixelBuffer {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }
}
