//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Function |
//! |---|---|
//! | **Crop** | [`crop_center`]: centered sub-rectangle |
//! | **Resize** | [`resize`]: aspect-preserving bilinear scale-to-square |
//! | **Round** | [`round_corners`]: hard quarter-circle alpha mask |
//! | **Pad** | [`add_padding`]: transparent margin, then resize back |
//! | **Decode / encode** | [`ImageBackend`] + [`RustBackend`] (`image` crate, PNG out) |
//!
//! The module is split into:
//! - **Buffer**: the [`PixelBuffer`] data model
//! - **Calculations**: pure dimension math (unit testable)
//! - **Geometry**: the rounded-corner inclusion test
//! - **Resample**: the bilinear resampler
//! - **Operations**: crop, round and pad built on the above
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod buffer;
mod calculations;
pub mod geometry;
pub mod operations;
pub mod resample;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use buffer::{PixelBuffer, TRANSPARENT};
pub use calculations::corner_radius;
pub use geometry::is_inside;
pub use operations::{add_padding, crop_center, round_corners};
pub use resample::resize;
pub use rust_backend::RustBackend;
