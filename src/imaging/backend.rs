//! Codec backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the boundary between the pure pixel pipeline
//! and the container formats on disk: decode arbitrary raster bytes into a
//! [`PixelBuffer`], encode a buffer as PNG bytes with per-pixel alpha.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): the `image` crate's
//! pure-Rust codecs, statically linked.

use super::buffer::PixelBuffer;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for codec backends.
///
/// `Sync` so one backend can serve every rayon worker.
pub trait ImageBackend: Sync {
    /// Decode raster bytes (format sniffed from content) into RGBA.
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, BackendError>;

    /// Encode a buffer as PNG, preserving alpha.
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, BackendError>;
}
