//! # Xenfiny
//!
//! The settings core of the Xenfiny AI art studio: everything the generation
//! form knows, without the form.
//!
//! The one real computation is canvas sizing. Picking an aspect ratio keeps
//! one side of the current canvas and recomputes the other:
//!
//! ```text
//! 512 x 768 (h x w), pick 2:3  →  canvas is wider than 2:3, keep height  →  512 x 341
//! 1024 x 512,        pick 1:1  →  canvas is taller than 1:1, keep width  →  512 x 512
//! ```
//!
//! Around it sit the form model (sliders, sampler, seed, visibility), the
//! upload dropzone rules, and a layered `config.toml`. No image is generated
//! here; [`settings::GenerationSettings::validate`] yields the request a
//! backend would receive.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizing`] | `width:height` ratio parsing and the canvas fitting math |
//! | [`settings`] | Form state with one update method per widget, validation into a request |
//! | [`upload`] | Dropzone rules: MIME allow-list by extension, size cap |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Serialized shapes: `Dimensions`, `GenerationRequest` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Height First
//!
//! [`types::Dimensions`] and [`sizing::aspect_ratio_to_size`] take height
//! before width, the order the form reports them, while ratios are written
//! width first (`16:9` is landscape). Mixing the two up silently transposes
//! a canvas, so ratios are only ever built through [`sizing::AspectRatio`].
//!
//! ## Ratio Results Are Not Snapped
//!
//! Sliders step by 64, but `16:9` on a 512-high canvas needs a width of 910.
//! The resized canvas is stored exactly; only direct slider moves snap.

pub mod config;
pub mod output;
pub mod settings;
pub mod sizing;
pub mod types;
pub mod upload;
