//! Studio configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [sliders.height]
//! min = 384
//! max = 1024
//! step = 64
//! default = 512
//!
//! [sliders.width]
//! min = 384
//! max = 1024
//! step = 64
//! default = 512
//!
//! [sliders.cfg_scale]
//! min = 1
//! max = 20
//! step = 1
//! default = 7
//!
//! [sliders.steps]
//! min = 10
//! max = 150
//! step = 1
//! default = 50
//!
//! [sliders.image_count]
//! min = 1
//! max = 10
//! step = 1
//! default = 1
//!
//! [form]
//! aspect_ratios = ["1:1", "2:3", "3:2", "3:4", "4:3", "9:16", "16:9"]
//! # sampler = "k_euler"      # Preselected sampler (omit for none)
//! seed = 12789305732983
//! public = true
//!
//! [upload]
//! max_bytes = 3145728         # 3 MiB
//! accept = ["image/png", "image/gif", "image/jpeg", "image/svg+xml", "image/webp", "image/avif"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::settings::Sampler;
use crate::sizing::{AspectRatio, PRESET_RATIOS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Studio configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Bounds and defaults for every slider on the form.
    pub sliders: SlidersConfig,
    /// Picker choices and fixed form values.
    pub form: FormConfig,
    /// Dropzone acceptance rules.
    pub upload: UploadConfig,
}

impl StudioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in self.sliders.named() {
            range.validate(name)?;
        }
        if self.sliders.height.min == 0 || self.sliders.width.min == 0 {
            return Err(ConfigError::Validation(
                "sliders.height and sliders.width must have a non-zero min".into(),
            ));
        }
        if self.form.aspect_ratios.is_empty() {
            return Err(ConfigError::Validation(
                "form.aspect_ratios must not be empty".into(),
            ));
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "upload.max_bytes must be non-zero".into(),
            ));
        }
        if self.upload.accept.is_empty() {
            return Err(ConfigError::Validation(
                "upload.accept must not be empty".into(),
            ));
        }
        if let Some(bad) = self.upload.accept.iter().find(|m| !m.starts_with("image/")) {
            return Err(ConfigError::Validation(format!(
                "upload.accept entries must be image MIME types, got {bad:?}"
            )));
        }
        Ok(())
    }
}

/// A numeric slider: inclusive bounds, step size and initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl SliderRange {
    pub const fn new(min: u32, max: u32, step: u32, default: u32) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp into range, then move to the nearest `min + k * step`.
    ///
    /// Ties round up. A snapped value past `max` falls back one step. An
    /// unvalidated range (zero step, or `min >= max`) only clamps.
    pub fn snap(&self, value: u32) -> u32 {
        let clamped = value.max(self.min).min(self.max);
        if self.step == 0 || self.min >= self.max {
            return clamped;
        }
        // Grid math in u64: min + k * step can pass u32::MAX before falling back.
        let (min, max, step) = (u64::from(self.min), u64::from(self.max), u64::from(self.step));
        let steps = (u64::from(clamped) - min + step / 2) / step;
        let mut snapped = min + steps * step;
        if snapped > max {
            snapped -= step;
        }
        u32::try_from(snapped).unwrap_or(self.max)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::Validation(format!(
                "sliders.{name}.step must be non-zero"
            )));
        }
        if self.min > self.max {
            return Err(ConfigError::Validation(format!(
                "sliders.{name}.min must not exceed max"
            )));
        }
        if !self.contains(self.default) {
            return Err(ConfigError::Validation(format!(
                "sliders.{name}.default must be within {}..={}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Slider settings for the generation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlidersConfig {
    pub height: SliderRange,
    pub width: SliderRange,
    /// Classifier-free guidance scale.
    pub cfg_scale: SliderRange,
    /// Inference steps.
    pub steps: SliderRange,
    /// Images generated per request.
    pub image_count: SliderRange,
}

impl SlidersConfig {
    fn named(&self) -> [(&'static str, &SliderRange); 5] {
        [
            ("height", &self.height),
            ("width", &self.width),
            ("cfg_scale", &self.cfg_scale),
            ("steps", &self.steps),
            ("image_count", &self.image_count),
        ]
    }
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            height: SliderRange::new(384, 1024, 64, 512),
            width: SliderRange::new(384, 1024, 64, 512),
            cfg_scale: SliderRange::new(1, 20, 1, 7),
            steps: SliderRange::new(10, 150, 1, 50),
            image_count: SliderRange::new(1, 10, 1, 1),
        }
    }
}

/// Picker choices and fixed form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Ratios offered by the aspect-ratio picker, in display order.
    pub aspect_ratios: Vec<AspectRatio>,
    /// Preselected sampler. `None` leaves the picker empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Sampler>,
    /// Seed sent with every request. Not editable from the form.
    pub seed: u64,
    /// Whether generated images are public by default.
    pub public: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            aspect_ratios: PRESET_RATIOS.to_vec(),
            sampler: None,
            seed: 12_789_305_732_983,
            public: true,
        }
    }
}

/// Dropzone acceptance rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_bytes: u64,
    /// Accepted MIME types.
    pub accept: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 3 * 1024 * 1024,
            accept: [
                "image/png",
                "image/gif",
                "image/jpeg",
                "image/svg+xml",
                "image/webp",
                "image/avif",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(StudioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using stock defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    debug!(path = %config_path.display(), "loaded config file");
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<StudioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: StudioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<StudioConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Xenfiny Studio Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Sliders: inclusive min/max, step size, initial value
# ---------------------------------------------------------------------------
[sliders.height]
min = 384
max = 1024
step = 64
default = 512

[sliders.width]
min = 384
max = 1024
step = 64
default = 512

# Classifier-free guidance scale.
[sliders.cfg_scale]
min = 1
max = 20
step = 1
default = 7

# Inference steps.
[sliders.steps]
min = 10
max = 150
step = 1
default = 50

# Images generated per request.
[sliders.image_count]
min = 1
max = 10
step = 1
default = 1

# ---------------------------------------------------------------------------
# Form
# ---------------------------------------------------------------------------
[form]
# Ratios offered by the aspect-ratio picker, as "width:height".
aspect_ratios = ["1:1", "2:3", "3:2", "3:4", "4:3", "9:16", "16:9"]

# Preselected sampler: k_euler, k_euler_a, ddim, k_heun, k_dpm_2, k_lms, karas.
# Omit to leave the picker empty.
# sampler = "k_euler"

# Seed sent with every request.
seed = 12789305732983

# Whether generated images are public by default.
public = true

# ---------------------------------------------------------------------------
# Upload dropzone
# ---------------------------------------------------------------------------
[upload]
# Largest accepted file in bytes (3 MiB).
max_bytes = 3145728

# Accepted MIME types.
accept = ["image/png", "image/gif", "image/jpeg", "image/svg+xml", "image/webp", "image/avif"]
"##
}
