//! Generation form state.
//!
//! [`GenerationSettings`] holds every value on the generation form. Each widget
//! has one update method; widgets never write fields directly. The aspect-ratio
//! picker is the only widget that touches two fields at once: it runs the
//! resizer on the current height and width and stores both results.
//!
//! Slider updates are clamped and snapped to the slider grid, as a slider
//! drag would be. The aspect-ratio result is stored as-is, so a 16:9 canvas
//! can hold a width of 910 even though the width slider steps by 64. Moving
//! the height or width slider afterwards clears the selected ratio, since the
//! canvas no longer matches it.
//!
//! [`GenerationSettings::validate`] turns the form into a
//! [`GenerationRequest`], which is what the Generate button would submit.

use crate::config::{SliderRange, SlidersConfig, StudioConfig};
use crate::sizing::{AspectRatio, AspectRatioError, fit_to_ratio};
use crate::types::{Dimensions, GenerationRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error(transparent)]
    AspectRatio(#[from] AspectRatioError),
    #[error("Prompt must not be empty")]
    EmptyPrompt,
    #[error("Canvas dimensions must be non-zero, got {height}x{width}")]
    ZeroDimension { height: u32, width: u32 },
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("Unknown sampler {0:?}")]
    UnknownSampler(String),
}

/// Diffusion sampler method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sampler {
    #[serde(rename = "k_euler")]
    KEuler,
    #[serde(rename = "k_euler_a")]
    KEulerA,
    #[serde(rename = "ddim")]
    Ddim,
    #[serde(rename = "k_heun")]
    KHeun,
    #[serde(rename = "k_dpm_2")]
    KDpm2,
    #[serde(rename = "k_lms")]
    KLms,
    #[serde(rename = "karas")]
    Karas,
}

impl Sampler {
    /// All samplers in picker order.
    pub const ALL: [Sampler; 7] = [
        Sampler::KEuler,
        Sampler::KEulerA,
        Sampler::Ddim,
        Sampler::KHeun,
        Sampler::KDpm2,
        Sampler::KLms,
        Sampler::Karas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sampler::KEuler => "k_euler",
            Sampler::KEulerA => "k_euler_a",
            Sampler::Ddim => "ddim",
            Sampler::KHeun => "k_heun",
            Sampler::KDpm2 => "k_dpm_2",
            Sampler::KLms => "k_lms",
            Sampler::Karas => "karas",
        }
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sampler {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sampler::ALL
            .into_iter()
            .find(|sampler| sampler.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownSampler(s.to_string()))
    }
}

/// Current state of the generation form.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    sliders: SlidersConfig,
    prompt: String,
    negative_prompt: String,
    cfg_scale: u32,
    image_count: u32,
    steps: u32,
    dimensions: Dimensions,
    aspect_ratio: Option<AspectRatio>,
    sampler: Option<Sampler>,
    seed: u64,
    public: bool,
}

impl GenerationSettings {
    /// A fresh form with every widget at its configured default.
    pub fn from_config(config: &StudioConfig) -> Self {
        let sliders = config.sliders.clone();
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            cfg_scale: sliders.cfg_scale.default,
            image_count: sliders.image_count.default,
            steps: sliders.steps.default,
            dimensions: Dimensions::new(sliders.height.default, sliders.width.default),
            aspect_ratio: None,
            sampler: config.form.sampler,
            seed: config.form.seed,
            public: config.form.public,
            sliders,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio
    }

    pub fn cfg_scale(&self) -> u32 {
        self.cfg_scale
    }

    pub fn image_count(&self) -> u32 {
        self.image_count
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn sampler(&self) -> Option<Sampler> {
        self.sampler
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        debug!(len = self.prompt.len(), "prompt changed");
    }

    pub fn set_negative_prompt(&mut self, prompt: impl Into<String>) {
        self.negative_prompt = prompt.into();
        debug!(len = self.negative_prompt.len(), "negative prompt changed");
    }

    pub fn set_cfg_scale(&mut self, value: u32) {
        self.cfg_scale = self.sliders.cfg_scale.snap(value);
        debug!(value, cfg_scale = self.cfg_scale, "cfg scale slider changed");
    }

    pub fn set_image_count(&mut self, value: u32) {
        self.image_count = self.sliders.image_count.snap(value);
        debug!(value, image_count = self.image_count, "image count slider changed");
    }

    pub fn set_steps(&mut self, value: u32) {
        self.steps = self.sliders.steps.snap(value);
        debug!(value, steps = self.steps, "inference steps slider changed");
    }

    pub fn set_height(&mut self, value: u32) {
        self.dimensions.height = self.sliders.height.snap(value);
        self.aspect_ratio = None;
        debug!(value, height = self.dimensions.height, "height slider changed");
    }

    pub fn set_width(&mut self, value: u32) {
        self.dimensions.width = self.sliders.width.snap(value);
        self.aspect_ratio = None;
        debug!(value, width = self.dimensions.width, "width slider changed");
    }

    pub fn set_sampler(&mut self, sampler: Sampler) {
        self.sampler = Some(sampler);
        debug!(%sampler, "sampler changed");
    }

    pub fn set_public(&mut self, public: bool) {
        self.public = public;
        debug!(public, "visibility changed");
    }

    /// Handle a pick from the aspect-ratio selector.
    ///
    /// Resizes the current canvas to the ratio and stores both dimensions.
    /// On error the form is left untouched.
    pub fn apply_aspect_ratio(&mut self, input: Option<&str>) -> Result<Dimensions, SettingsError> {
        let ratio = AspectRatio::parse_opt(input)?;
        let resized = fit_to_ratio(self.dimensions, ratio);
        debug!(
            %ratio,
            height = resized.height,
            width = resized.width,
            "aspect ratio changed"
        );
        self.dimensions = resized;
        self.aspect_ratio = Some(ratio);
        Ok(resized)
    }

    /// Check the form and build the request the Generate button would send.
    pub fn validate(&self) -> Result<GenerationRequest, SettingsError> {
        if self.prompt.trim().is_empty() {
            return Err(SettingsError::EmptyPrompt);
        }
        let Dimensions { height, width } = self.dimensions;
        if height == 0 || width == 0 {
            return Err(SettingsError::ZeroDimension { height, width });
        }
        check_range("cfg_scale", self.cfg_scale, &self.sliders.cfg_scale)?;
        check_range("image_count", self.image_count, &self.sliders.image_count)?;
        check_range("steps", self.steps, &self.sliders.steps)?;

        let negative = self.negative_prompt.trim();
        Ok(GenerationRequest {
            prompt: self.prompt.trim().to_string(),
            negative_prompt: (!negative.is_empty()).then(|| negative.to_string()),
            cfg_scale: self.cfg_scale,
            image_count: self.image_count,
            steps: self.steps,
            height,
            width,
            aspect_ratio: self.aspect_ratio,
            sampler: self.sampler,
            seed: self.seed,
            public: self.public,
        })
    }
}

fn check_range(field: &'static str, value: u32, range: &SliderRange) -> Result<(), SettingsError> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}
