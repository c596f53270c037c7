//! Icon generation settings.
//!
//! Handles loading, validating, and overriding `icons.toml`. Settings come
//! from three layers, later ones winning field by field:
//!
//! 1. stock defaults ([`IconConfig::default`])
//! 2. an `icons.toml` file: `--config <PATH>`, or `icons.toml` next to the
//!    input image when present
//! 3. command-line flags ([`Overrides`])
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [crop]
//! enabled = true            # Center-crop before resizing
//! trim_percent = 80         # Share of each dimension kept (1-100)
//!
//! [rounding]
//! radius_percent = 20       # Corner radius as % of icon size (0-50, 0 = off)
//!
//! [padding]
//! percent = 0               # Transparent margin as % of icon size (0-50)
//! exclude_largest = false   # Keep the 1024px base icon full-bleed
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early. Range checks run after
//! the command-line overrides are applied, so a flag can fix a bad file value.

use crate::pipeline::{PipelineConfig, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up next to the input image.
pub const CONFIG_FILE_NAME: &str = "icons.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Settings loaded from `icons.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    pub crop: CropConfig,
    pub rounding: RoundingConfig,
    pub padding: PaddingConfig,
    pub processing: ProcessingConfig,
}

impl IconConfig {
    /// Validate percentages are within their ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline_config().validate()?;
        Ok(())
    }

    /// The transform settings the pipeline runs with.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            crop_enabled: self.crop.enabled,
            trim_percent: self.crop.trim_percent,
            radius_percent: self.rounding.radius_percent,
            padding_percent: self.padding.percent,
            padding_excludes_largest: self.padding.exclude_largest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Center-crop the source before resizing.
    pub enabled: bool,
    /// Share of each source dimension kept (1-100).
    pub trim_percent: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trim_percent: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundingConfig {
    /// Corner radius as a percentage of icon size. 0 disables rounded variants.
    pub radius_percent: u32,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self { radius_percent: 20 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingConfig {
    /// Transparent margin as a percentage of icon size.
    pub percent: u32,
    /// Leave the largest (base) icon unpadded, as the App Store expects.
    pub exclude_largest: bool,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Command-line values that replace file values when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub no_crop: bool,
    pub trim_percent: Option<u32>,
    pub radius_percent: Option<u32>,
    pub padding_percent: Option<u32>,
    pub padding_excludes_largest: bool,
    pub max_processes: Option<usize>,
}

impl Overrides {
    pub fn apply(&self, config: &mut IconConfig) {
        if self.no_crop {
            config.crop.enabled = false;
        }
        if let Some(trim) = self.trim_percent {
            config.crop.trim_percent = trim;
        }
        if let Some(radius) = self.radius_percent {
            config.rounding.radius_percent = radius;
        }
        if let Some(padding) = self.padding_percent {
            config.padding.percent = padding;
        }
        if self.padding_excludes_largest {
            config.padding.exclude_largest = true;
        }
        if let Some(jobs) = self.max_processes {
            config.processing.max_processes = Some(jobs);
        }
    }
}

/// `icons.toml` in the input image's directory, if one exists.
pub fn discover_config(input: &Path) -> Option<PathBuf> {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Parse a config file without range checks. `None` yields the defaults.
pub fn load_raw_config(path: Option<&Path>) -> Result<IconConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(IconConfig::default()),
    }
}

/// Load and validate a config file. `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<IconConfig, ConfigError> {
    let config = load_raw_config(path)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, apply command-line overrides, then validate.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<IconConfig, ConfigError> {
    let mut config = load_raw_config(path)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `icons.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Iconsmith Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass with --config <PATH>, or save as icons.toml next to the source image.
# Command-line flags override values from this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Center crop
# ---------------------------------------------------------------------------
[crop]
# Trim the source to its centered area before resizing.
enabled = true

# Share of each dimension kept when cropping (1-100).
# 80 removes 10% from every edge.
trim_percent = 80

# ---------------------------------------------------------------------------
# Rounded variants
# ---------------------------------------------------------------------------
[rounding]
# Corner radius as a percentage of icon size (0-50).
# Each icon also gets an *_rounded.png variant; 0 disables them.
radius_percent = 20

# ---------------------------------------------------------------------------
# Padding
# ---------------------------------------------------------------------------
[padding]
# Transparent margin as a percentage of icon size (0-50).
percent = 0

# Keep the 1024px base icon full-bleed (App Store submissions).
exclude_largest = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit to use all CPU cores.
# Values above the core count are clamped down.
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    // =========================================================================
    // Defaults and parsing
    // =========================================================================

    #[test]
    fn default_config_values() {
        let config = IconConfig::default();
        assert!(config.crop.enabled);
        assert_eq!(config.crop.trim_percent, 80);
        assert_eq!(config.rounding.radius_percent, 20);
        assert_eq!(config.padding.percent, 0);
        assert!(!config.padding.exclude_largest);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn default_maps_to_default_pipeline() {
        assert_eq!(
            IconConfig::default().pipeline_config(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn parse_partial_config() {
        let config: IconConfig = toml::from_str(
            r#"
[padding]
percent = 15
exclude_largest = true
"#,
        )
        .unwrap();

        assert_eq!(config.padding.percent, 15);
        assert!(config.padding.exclude_largest);
        assert_eq!(config.crop, CropConfig::default());
        assert_eq!(config.rounding.radius_percent, 20);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let result: Result<IconConfig, _> = toml::from_str("[crop]\ntrim = 50\n");
        assert!(result.is_err());

        let result: Result<IconConfig, _> = toml::from_str("[colors]\nbackground = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_negative_percent() {
        let result: Result<IconConfig, _> = toml::from_str("[rounding]\nradius_percent = -5\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_none_is_default() {
        assert_eq!(load_config(None).unwrap(), IconConfig::default());
    }

    #[test]
    fn load_config_from_file() {
        let (_tmp, path) = write_config("[crop]\nenabled = false\n[processing]\nmax_processes = 2\n");
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.crop.enabled);
        assert_eq!(config.processing.max_processes, Some(2));
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let (_tmp, path) = write_config("this is not valid toml [[[");
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_out_of_range_is_validation_error() {
        let (_tmp, path) = write_config("[crop]\ntrim_percent = 0\n");
        let result = load_config(Some(&path));
        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::TrimPercent(0)))
        ));
    }

    #[test]
    fn discover_config_next_to_input() {
        let (tmp, path) = write_config("");
        assert_eq!(discover_config(&tmp.path().join("logo.png")), Some(path));
    }

    #[test]
    fn discover_config_absent() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(discover_config(&tmp.path().join("logo.png")), None);
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[test]
    fn overrides_replace_file_values() {
        let (_tmp, path) = write_config("[crop]\ntrim_percent = 60\n[rounding]\nradius_percent = 10\n");
        let overrides = Overrides {
            trim_percent: Some(75),
            padding_excludes_largest: true,
            ..Overrides::default()
        };

        let config = resolve_config(Some(&path), &overrides).unwrap();

        assert_eq!(config.crop.trim_percent, 75);
        assert_eq!(config.rounding.radius_percent, 10);
        assert!(config.padding.exclude_largest);
    }

    #[test]
    fn overrides_can_fix_invalid_file_value() {
        let (_tmp, path) = write_config("[padding]\npercent = 90\n");
        let overrides = Overrides {
            padding_percent: Some(10),
            ..Overrides::default()
        };
        let config = resolve_config(Some(&path), &overrides).unwrap();
        assert_eq!(config.padding.percent, 10);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = Overrides {
            radius_percent: Some(51),
            ..Overrides::default()
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config validation error: radius percent must be between 0 and 50 (got 51)"
        );
    }

    #[test]
    fn no_crop_override_disables_crop() {
        let mut config = IconConfig::default();
        Overrides {
            no_crop: true,
            ..Overrides::default()
        }
        .apply(&mut config);
        assert!(!config.crop.enabled);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = IconConfig::default();
        Overrides::default().apply(&mut config);
        assert_eq!(config, IconConfig::default());
    }

    // =========================================================================
    // Processing config
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let threads = effective_threads(&ProcessingConfig::default());
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // stock_config_toml
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: IconConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, IconConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[crop]"));
        assert!(content.contains("[rounding]"));
        assert!(content.contains("[padding]"));
        assert!(content.contains("[processing]"));
    }
}
