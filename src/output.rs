//! CLI output formatting.
//!
//! Every `format_*` function is pure and returns display lines; the matching
//! `print_*` wrapper writes them to stdout. Keeping formatting pure lets the
//! wording be tested without capturing the terminal.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Cleaning existing icon_*.png in: icons (3 removed)
//! Pre-trimming input to centered 80% area, then generating PNGs in: icons
//!  - icon_16x16.png (16x16)
//!  - icon_16x16_rounded.png (16x16, r=3)
//!  ...
//! Done. Generated 22 icon PNGs in icons
//! ```
//!
//! Icon lines arrive as workers finish, so their order can vary between runs.
//!
//! ## Check
//!
//! ```text
//! Source: logo.png (1200x1200)
//! Crop: centered 80% -> 960x960
//!  - icon_16x16.png (16x16, padded)
//!  - icon_16x16_rounded.png (16x16, r=3, padded)
//!  ...
//! Configuration is valid: 22 icon PNGs would be generated
//! ```

use crate::pipeline::Variant;
use crate::process::{CheckReport, CropSummary, Manifest, ProcessEvent};
use std::path::Path;

// ============================================================================
// Shared formatting helpers
// ============================================================================

/// ` - <name> (<S>x<S>[, r=<R>][, padded])`
fn icon_line(name: &str, size: u32, variant: Variant, padded: bool) -> String {
    let mut detail = format!("{size}x{size}");
    if let Variant::Rounded { radius } = variant {
        detail.push_str(&format!(", r={radius}"));
    }
    if padded {
        detail.push_str(", padded");
    }
    format!(" - {name} ({detail})")
}

fn crop_line(crop: &CropSummary, dir: &Path) -> String {
    match crop {
        CropSummary::Centered { trim_percent, .. } => format!(
            "Pre-trimming input to centered {}% area, then generating PNGs in: {}",
            trim_percent,
            dir.display()
        ),
        CropSummary::Disabled => format!(
            "Cropping disabled; generating PNGs from full image in: {}",
            dir.display()
        ),
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Cleaned { dir, removed } => vec![format!(
            "Cleaning existing icon_*.png in: {} ({} removed)",
            dir.display(),
            removed
        )],
        ProcessEvent::Cropped {
            dir,
            trim_percent,
            width,
            height,
        } => vec![crop_line(
            &CropSummary::Centered {
                trim_percent: *trim_percent,
                width: *width,
                height: *height,
            },
            dir,
        )],
        ProcessEvent::CropSkipped { dir } => vec![crop_line(&CropSummary::Disabled, dir)],
        ProcessEvent::IconWritten {
            name,
            size,
            variant,
            padded,
        } => vec![icon_line(name, *size, *variant, *padded)],
    }
}

/// Closing line after a successful run.
pub fn format_summary(manifest: &Manifest) -> Vec<String> {
    vec![format!(
        "Done. Generated {} icon PNGs in {}",
        manifest.icons.len(),
        manifest.output_dir.display()
    )]
}

pub fn print_summary(manifest: &Manifest) {
    for line in format_summary(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a dry-run report: source, crop result, and every planned file.
pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let (width, height) = report.source_dimensions;
    let mut lines = vec![format!(
        "Source: {} ({}x{})",
        report.source.display(),
        width,
        height
    )];

    lines.push(match report.crop {
        CropSummary::Centered {
            trim_percent,
            width,
            height,
        } => format!("Crop: centered {trim_percent}% -> {width}x{height}"),
        CropSummary::Disabled => "Crop: disabled".to_string(),
    });

    lines.extend(
        report
            .planned
            .iter()
            .map(|p| icon_line(&p.name, p.size, p.variant, p.padded)),
    );

    lines.push(format!(
        "Configuration is valid: {} icon PNGs would be generated",
        report.planned.len()
    ));
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}
