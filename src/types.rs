//! Shared types serialized between the library and the CLI.
//!
//! These are the shapes that leave the process: `--json` output and the
//! generation request payload.

use crate::settings::Sampler;
use crate::sizing::AspectRatio;
use serde::{Deserialize, Serialize};

/// Canvas size in pixels. Height comes first, as the form reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

/// A validated generation request, ready to hand to a backend.
///
/// Produced by [`GenerationSettings::validate`](crate::settings::GenerationSettings::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub cfg_scale: u32,
    pub image_count: u32,
    pub steps: u32,
    pub height: u32,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Sampler>,
    pub seed: u64,
    pub public: bool,
}
