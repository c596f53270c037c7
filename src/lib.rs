//! # Iconsmith
//!
//! Generates the standard macOS/iOS application-icon PNG set from one source
//! image: eleven square sizes from 16 to 1024 pixels, each optionally paired
//! with a rounded-corner variant.
//!
//! # Architecture: Two Layers
//!
//! ```text
//! pipeline   PixelBuffer → Vec<GeneratedIcon>     (pure: crop, resize, round, pad)
//! process    input file  → <output_dir>/icon_*.png (I/O: decode, clean, encode, write)
//! ```
//!
//! The [`pipeline`] never touches the filesystem, so every pixel rule is unit
//! tested on in-memory buffers. The [`process`] stage wraps it with file I/O,
//! a codec [`ImageBackend`](imaging::ImageBackend), rayon fan-out, and
//! progress events.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`iconset`] | The standard size table and rounded-variant naming |
//! | [`imaging`] | Pure-Rust pixel operations and the PNG codec backend |
//! | [`pipeline`] | Validation, crop-once, per-size resize → round → pad |
//! | [`process`] | File stage: clean, decode, parallel encode + write, manifest |
//! | [`config`] | `icons.toml` loading, validation and command-line overrides |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Own Resampler
//!
//! Resizing uses a small bilinear sampler in [`imaging::resample`] rather than
//! `image::imageops`. Output pixels are a fixed function of the source, so
//! icon sets are reproducible byte for byte across platforms and `image`
//! releases.
//!
//! ## Hard-Edged Corners
//!
//! Rounded variants use a binary alpha mask: a pixel is either kept untouched
//! or fully transparent. No anti-aliasing is applied at the arc.
//!
//! ## Pure-Rust Codecs
//!
//! Decoding and encoding go through the `image` crate only. The binary has
//! no system dependencies.

pub mod config;
pub mod iconset;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
