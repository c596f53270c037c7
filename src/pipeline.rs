//! The icon pipeline: crop once, then resize, round and pad per icon size.
//!
//! ```text
//! source ─crop?─▶ prepared ─┬─ resize(16) ─┬─ pad? ──────────▶ icon_16x16.png
//!                           │              └─ round ─ pad? ──▶ icon_16x16_rounded.png
//!                           ├─ resize(32) ─ …
//!                           └─ …
//! ```
//!
//! Everything here is pure: no I/O, no logging. [`generate`] returns the
//! finished buffers; [`generate_each`] streams them to a fallible sink and
//! stops at the first error. The file stage in [`process`](crate::process)
//! uses [`prepare_source`], [`plan`] and [`render`] directly to fan the
//! per-size work out over rayon.
//!
//! ## Padding and the Base Icon
//!
//! With `padding_excludes_largest` the base icon (the last spec holding the
//! largest size, see [`base_icon_index`]) skips padding for both of its
//! variants. App Store submissions expect a full-bleed 1024px master while
//! smaller in-app sizes carry a margin.

use crate::iconset::{IconSpec, base_icon_index, rounded_variant_name};
use crate::imaging::{
    PixelBuffer, add_padding, corner_radius, crop_center, resize, round_corners,
};
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

/// A configuration value outside its allowed range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("trim percent must be between 1 and 100 (got {0})")]
    TrimPercent(u32),
    #[error("radius percent must be between 0 and 50 (got {0})")]
    RadiusPercent(u32),
    #[error("padding percent must be between 0 and 50 (got {0})")]
    PaddingPercent(u32),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(
        "Source is empty after cropping ({width}x{height}); use a larger trim percent or a bigger image"
    )]
    EmptySource { width: u32, height: u32 },
}

/// Transform settings for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub crop_enabled: bool,
    /// Share of each source dimension kept by the center crop (1–100).
    pub trim_percent: u32,
    /// Corner radius as a share of the icon size (0–50). 0 disables rounded variants.
    pub radius_percent: u32,
    /// Transparent margin as a share of the icon size (0–50).
    pub padding_percent: u32,
    pub padding_excludes_largest: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crop_enabled: true,
            trim_percent: 80,
            radius_percent: 20,
            padding_percent: 0,
            padding_excludes_largest: false,
        }
    }
}

impl PipelineConfig {
    /// Reject out-of-range percentages. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=100).contains(&self.trim_percent) {
            return Err(ValidationError::TrimPercent(self.trim_percent));
        }
        if self.radius_percent > 50 {
            return Err(ValidationError::RadiusPercent(self.radius_percent));
        }
        if self.padding_percent > 50 {
            return Err(ValidationError::PaddingPercent(self.padding_percent));
        }
        Ok(())
    }
}

/// Which flavour of an icon size a buffer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Variant {
    Regular,
    Rounded { radius: u32 },
}

/// One output file the pipeline will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedIcon {
    pub name: String,
    pub size: u32,
    pub variant: Variant,
    pub padded: bool,
}

/// The work for one spec: its position, the spec, and whether it is padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconJob {
    pub index: usize,
    pub spec: IconSpec,
    pub padded: bool,
}

impl IconJob {
    /// The regular variant, then the rounded one when rounding is enabled.
    pub fn outputs(&self, config: &PipelineConfig) -> Vec<PlannedIcon> {
        let mut outputs = vec![PlannedIcon {
            name: self.spec.name.to_string(),
            size: self.spec.size,
            variant: Variant::Regular,
            padded: self.padded,
        }];
        if config.radius_percent > 0 {
            outputs.push(PlannedIcon {
                name: rounded_variant_name(self.spec.name),
                size: self.spec.size,
                variant: Variant::Rounded {
                    radius: corner_radius(self.spec.size, config.radius_percent),
                },
                padded: self.padded,
            });
        }
        outputs
    }
}

/// A finished icon buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedIcon {
    /// Position of the originating spec in the table.
    pub spec_index: usize,
    pub name: String,
    pub size: u32,
    pub variant: Variant,
    pub padded: bool,
    pub image: PixelBuffer,
}

/// Validate the config and apply the optional center crop.
///
/// Borrows the source unchanged when cropping is disabled.
pub fn prepare_source<'a>(
    source: &'a PixelBuffer,
    config: &PipelineConfig,
) -> Result<Cow<'a, PixelBuffer>, PipelineError> {
    config.validate()?;

    let prepared = if config.crop_enabled {
        Cow::Owned(crop_center(source, config.trim_percent))
    } else {
        Cow::Borrowed(source)
    };

    if prepared.is_empty() {
        let (width, height) = prepared.dimensions();
        return Err(PipelineError::EmptySource { width, height });
    }
    Ok(prepared)
}

/// One job per spec, in declaration order, with the padding decision made.
pub fn plan(specs: &[IconSpec], config: &PipelineConfig) -> Vec<IconJob> {
    let base = base_icon_index(specs);
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let exempt = config.padding_excludes_largest && Some(index) == base;
            IconJob {
                index,
                spec: *spec,
                padded: config.padding_percent > 0 && !exempt,
            }
        })
        .collect()
}

/// Render every variant of one job from the prepared source.
///
/// The rounded variant masks the resized buffer before padding, so its
/// corners shrink together with the content.
pub fn render(
    prepared: &PixelBuffer,
    job: &IconJob,
    config: &PipelineConfig,
) -> Vec<GeneratedIcon> {
    let resized = resize(prepared, job.spec.size);

    job.outputs(config)
        .into_iter()
        .map(|planned| {
            let shaped = match planned.variant {
                Variant::Regular => resized.clone(),
                Variant::Rounded { radius } => round_corners(&resized, radius),
            };
            let image = if planned.padded {
                add_padding(&shaped, config.padding_percent, planned.size)
            } else {
                shaped
            };
            GeneratedIcon {
                spec_index: job.index,
                name: planned.name,
                size: planned.size,
                variant: planned.variant,
                padded: planned.padded,
                image,
            }
        })
        .collect()
}

/// Run the pipeline, handing each icon to `emit` as soon as it is ready.
///
/// Icons arrive in spec order, regular before rounded. The first error from
/// `emit` stops the run and is returned; earlier emissions are not undone.
pub fn generate_each<E, F>(
    source: &PixelBuffer,
    config: &PipelineConfig,
    specs: &[IconSpec],
    mut emit: F,
) -> Result<(), E>
where
    E: From<PipelineError>,
    F: FnMut(GeneratedIcon) -> Result<(), E>,
{
    let prepared = prepare_source(source, config)?;
    for job in plan(specs, config) {
        for icon in render(&prepared, &job, config) {
            emit(icon)?;
        }
    }
    Ok(())
}

/// Run the pipeline and collect every icon in emission order.
pub fn generate(
    source: &PixelBuffer,
    config: &PipelineConfig,
    specs: &[IconSpec],
) -> Result<Vec<GeneratedIcon>, PipelineError> {
    let mut icons = Vec::with_capacity(specs.len() * 2);
    generate_each(source, config, specs, |icon| -> Result<(), PipelineError> {
        icons.push(icon);
        Ok(())
    })?;
    Ok(icons)
}
