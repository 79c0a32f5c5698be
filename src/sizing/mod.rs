//! Canvas sizing: aspect ratios and the dimension math around them.
//!
//! The module is split into:
//! - **Ratio**: [`AspectRatio`], its `width:height` parser and the picker presets
//! - **Calculations**: pure functions that fit a canvas to a ratio (unit testable)

mod calculations;
mod ratio;

pub use calculations::{aspect_ratio_to_size, fit_to_ratio};
pub use ratio::{AspectRatio, AspectRatioError, PRESET_RATIOS};
