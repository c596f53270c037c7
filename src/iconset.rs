//! The standard application-icon size table and output naming.
//!
//! ## Standard Set
//!
//! Eleven PNGs covering the macOS/iOS app-icon sizes, @1x and @2x:
//!
//! ```text
//! icon_16x16.png        16    icon_256x256.png      256
//! icon_16x16@2x.png     32    icon_256x256@2x.png   512
//! icon_32x32.png        32    icon_512x512.png      512
//! icon_32x32@2x.png     64    icon_512x512@2x.png  1024
//! icon_128x128.png     128    icon_1024x1024.png   1024
//! icon_128x128@2x.png  256
//! ```
//!
//! ## Rounded Variants
//!
//! A rounded variant keeps the extension and inserts `_rounded` before it:
//! `icon_16x16@2x.png` → `icon_16x16@2x_rounded.png`.

use serde::Serialize;

/// One output icon: file name and square edge length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    pub name: &'static str,
    pub size: u32,
}

impl IconSpec {
    pub const fn new(name: &'static str, size: u32) -> Self {
        Self { name, size }
    }
}

/// The standard icon set, smallest to largest.
pub static STANDARD_ICONS: [IconSpec; 11] = [
    IconSpec::new("icon_16x16.png", 16),
    IconSpec::new("icon_16x16@2x.png", 32),
    IconSpec::new("icon_32x32.png", 32),
    IconSpec::new("icon_32x32@2x.png", 64),
    IconSpec::new("icon_128x128.png", 128),
    IconSpec::new("icon_128x128@2x.png", 256),
    IconSpec::new("icon_256x256.png", 256),
    IconSpec::new("icon_256x256@2x.png", 512),
    IconSpec::new("icon_512x512.png", 512),
    IconSpec::new("icon_512x512@2x.png", 1024),
    IconSpec::new("icon_1024x1024.png", 1024),
];

/// File-name prefix shared by every generated icon; `--clean` removes
/// `<prefix>*.png` from the output directory.
pub const ICON_PREFIX: &str = "icon_";

/// Derive the rounded-variant file name.
///
/// - `"icon_16x16.png"` → `"icon_16x16_rounded.png"`
/// - `"icon_16x16@2x.png"` → `"icon_16x16@2x_rounded.png"`
/// - `"favicon"` → `"favicon_rounded"`
pub fn rounded_variant_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_rounded{}", &name[..dot], &name[dot..]),
        _ => format!("{name}_rounded"),
    }
}

/// Index of the base icon: the last spec holding the largest size.
///
/// For [`STANDARD_ICONS`] that is `icon_1024x1024.png`, the App Store master.
/// `None` only for an empty table.
pub fn base_icon_index(specs: &[IconSpec]) -> Option<usize> {
    let largest = specs.iter().map(|s| s.size).max()?;
    specs.iter().rposition(|s| s.size == largest)
}
