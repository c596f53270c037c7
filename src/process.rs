//! The file stage: read the source, run the pipeline, write PNGs.
//!
//! ## Steps
//!
//! 1. The input must exist and the transform settings must validate.
//! 2. The output directory is created (with parents).
//! 3. With `clean`, every `icon_*.png` directly inside it is removed.
//! 4. The source is decoded and center-cropped once.
//! 5. Icon sizes are rendered, encoded and written in parallel with
//!    [rayon](https://docs.rs/rayon). The first failure aborts the run;
//!    files already written stay on disk.
//!
//! ## Output Structure
//!
//! ```text
//! <output_dir>/
//! ├── icon_16x16.png
//! ├── icon_16x16_rounded.png      # only when radius_percent > 0
//! ├── icon_16x16@2x.png
//! ├── ...
//! └── icon_1024x1024_rounded.png
//! ```
//!
//! Progress is reported as [`ProcessEvent`]s over an optional channel; the
//! returned [`Manifest`] records every file written, in table order.

use crate::iconset::{ICON_PREFIX, IconSpec, STANDARD_ICONS};
use crate::imaging::{BackendError, ImageBackend, PixelBuffer};
use crate::pipeline::{
    GeneratedIcon, PipelineConfig, PipelineError, PlannedIcon, Variant, plan, prepare_source,
    render,
};
use rayon::prelude::*;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("input image not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to clean {}: {source}", path.display())]
    Clean { path: PathBuf, source: io::Error },
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to load source image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: BackendError,
    },
    #[error("failed to encode {name}: {source}")]
    Encode { name: String, source: BackendError },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to generate and where.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Remove existing `icon_*.png` before writing.
    pub clean: bool,
    pub pipeline: PipelineConfig,
    pub specs: Vec<IconSpec>,
}

impl ProcessOptions {
    /// The standard icon set with default transforms, no cleaning.
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            clean: false,
            pipeline: PipelineConfig::default(),
            specs: STANDARD_ICONS.to_vec(),
        }
    }
}

/// Progress events emitted during processing.
///
/// Sent through an optional channel so the caller can display progress as
/// work completes. `IconWritten` arrives from worker threads, so its order
/// across sizes is not fixed.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Cleaned {
        dir: PathBuf,
        removed: usize,
    },
    Cropped {
        dir: PathBuf,
        trim_percent: u32,
        width: u32,
        height: u32,
    },
    CropSkipped {
        dir: PathBuf,
    },
    IconWritten {
        name: String,
        size: u32,
        variant: Variant,
        padded: bool,
    },
}

/// How the source was prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CropSummary {
    Disabled,
    Centered {
        trim_percent: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenIcon {
    pub name: String,
    pub size: u32,
    #[serde(flatten)]
    pub variant: Variant,
    pub padded: bool,
    /// Encoded PNG length.
    pub bytes: usize,
}

/// Record of one run, written as JSON with `--manifest`.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub source: PathBuf,
    pub source_dimensions: (u32, u32),
    pub output_dir: PathBuf,
    pub crop: CropSummary,
    pub removed: usize,
    pub icons: Vec<WrittenIcon>,
}

/// Result of a dry run: what `process` would produce.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub source: PathBuf,
    pub source_dimensions: (u32, u32),
    pub crop: CropSummary,
    pub planned: Vec<PlannedIcon>,
}

/// Generate every icon described by `options`.
pub fn process(
    backend: &impl ImageBackend,
    options: &ProcessOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<Manifest, ProcessError> {
    if !options.input.exists() {
        return Err(ProcessError::SourceNotFound(options.input.clone()));
    }
    options.pipeline.validate().map_err(PipelineError::from)?;

    let dir = &options.output_dir;
    std::fs::create_dir_all(dir).map_err(|source| ProcessError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let removed = if options.clean {
        let removed = clean_icons(dir, Some(&options.input))?;
        send(&events, ProcessEvent::Cleaned {
            dir: dir.clone(),
            removed,
        });
        removed
    } else {
        0
    };

    let source = load_source(backend, &options.input)?;
    let prepared = prepare_source(&source, &options.pipeline)?;
    let crop = crop_summary(&options.pipeline, &prepared);
    send(&events, match crop {
        CropSummary::Centered {
            trim_percent,
            width,
            height,
        } => ProcessEvent::Cropped {
            dir: dir.clone(),
            trim_percent,
            width,
            height,
        },
        CropSummary::Disabled => ProcessEvent::CropSkipped { dir: dir.clone() },
    });

    let jobs = plan(&options.specs, &options.pipeline);
    let written: Vec<Vec<WrittenIcon>> = jobs
        .par_iter()
        .map(|job| {
            render(&prepared, job, &options.pipeline)
                .into_iter()
                .map(|icon| write_icon(backend, dir, icon, &events))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;

    Ok(Manifest {
        source: options.input.clone(),
        source_dimensions: source.dimensions(),
        output_dir: dir.clone(),
        crop,
        removed,
        icons: written.into_iter().flatten().collect(),
    })
}

/// Decode and prepare the source without writing anything.
pub fn check(
    backend: &impl ImageBackend,
    input: &Path,
    config: &PipelineConfig,
    specs: &[IconSpec],
) -> Result<CheckReport, ProcessError> {
    if !input.exists() {
        return Err(ProcessError::SourceNotFound(input.to_path_buf()));
    }
    config.validate().map_err(PipelineError::from)?;

    let source = load_source(backend, input)?;
    let prepared = prepare_source(&source, config)?;

    Ok(CheckReport {
        source: input.to_path_buf(),
        source_dimensions: source.dimensions(),
        crop: crop_summary(config, &prepared),
        planned: plan(specs, config)
            .iter()
            .flat_map(|job| job.outputs(config))
            .collect(),
    })
}

/// Remove every `icon_*.png` directly inside `dir`. Returns the count.
///
/// Subdirectories and other files are left alone, and so is `keep` (the
/// source image) when it lives in `dir` under an icon-like name.
pub fn clean_icons(dir: &Path, keep: Option<&Path>) -> Result<usize, ProcessError> {
    let keep = keep.and_then(|path| path.canonicalize().ok());
    let mut removed = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| ProcessError::Clean {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: io::Error::from(e),
        })?;
        if !entry.file_type().is_file() || !is_generated_icon(entry.file_name().to_str()) {
            continue;
        }
        if keep.is_some() && entry.path().canonicalize().ok() == keep {
            continue;
        }
        std::fs::remove_file(entry.path()).map_err(|source| ProcessError::Clean {
            path: entry.path().to_path_buf(),
            source,
        })?;
        removed += 1;
    }
    Ok(removed)
}

/// Serialize the manifest as pretty JSON at `path`.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ProcessError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json).map_err(|source| ProcessError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn is_generated_icon(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with(ICON_PREFIX) && n.ends_with(".png"))
}

fn load_source(backend: &impl ImageBackend, path: &Path) -> Result<PixelBuffer, ProcessError> {
    let bytes = std::fs::read(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    backend.decode(&bytes).map_err(|source| ProcessError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn crop_summary(config: &PipelineConfig, prepared: &PixelBuffer) -> CropSummary {
    if config.crop_enabled {
        let (width, height) = prepared.dimensions();
        CropSummary::Centered {
            trim_percent: config.trim_percent,
            width,
            height,
        }
    } else {
        CropSummary::Disabled
    }
}

fn write_icon(
    backend: &impl ImageBackend,
    dir: &Path,
    icon: GeneratedIcon,
    events: &Option<Sender<ProcessEvent>>,
) -> Result<WrittenIcon, ProcessError> {
    let encoded = backend
        .encode(&icon.image)
        .map_err(|source| ProcessError::Encode {
            name: icon.name.clone(),
            source,
        })?;

    let path = dir.join(&icon.name);
    std::fs::write(&path, &encoded).map_err(|source| ProcessError::Write { path, source })?;

    send(events, ProcessEvent::IconWritten {
        name: icon.name.clone(),
        size: icon.size,
        variant: icon.variant,
        padded: icon.padded,
    });

    Ok(WrittenIcon {
        name: icon.name,
        size: icon.size,
        variant: icon.variant,
        padded: icon.padded,
        bytes: encoded.len(),
    })
}

fn send(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening.
        let _ = tx.send(event);
    }
}
