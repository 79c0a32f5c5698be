//! Pure calculation functions for canvas dimensions.
//!
//! All functions here are pure and testable without any I/O.

use super::ratio::{AspectRatio, AspectRatioError};
use crate::types::Dimensions;

/// Fit a canvas to an aspect ratio by recomputing exactly one side.
///
/// If the canvas is proportionally wider than the target, the height is
/// kept and the width recomputed; otherwise the width is kept and the height
/// recomputed. The recomputed side is rounded half away from zero.
///
/// # Examples
/// ```
/// # use xenfiny::sizing::{AspectRatio, fit_to_ratio};
/// # use xenfiny::types::Dimensions;
/// // 768 wide, 512 high is wider than 1:1: height stays
/// let square = AspectRatio::new(1, 1).unwrap();
/// assert_eq!(
///     fit_to_ratio(Dimensions::new(512, 768), square),
///     Dimensions::new(512, 512)
/// );
///
/// // A square canvas is not wider than 16:9: width stays, height shrinks
/// let wide = AspectRatio::new(16, 9).unwrap();
/// assert_eq!(
///     fit_to_ratio(Dimensions::new(512, 512), wide),
///     Dimensions::new(288, 512)
/// );
/// ```
pub fn fit_to_ratio(current: Dimensions, ratio: AspectRatio) -> Dimensions {
    let Dimensions { height, width } = current;
    let (ratio_w, ratio_h) = (ratio.width() as f64, ratio.height() as f64);
    let current_aspect = width as f64 / height as f64;

    if current_aspect > ratio_w / ratio_h {
        // Canvas is wider than the target: keep height
        let w = (height as f64 * ratio_w / ratio_h).round() as u32;
        Dimensions::new(height, w)
    } else {
        // Canvas is taller than (or equal to) the target: keep width
        let h = (width as f64 * ratio_h / ratio_w).round() as u32;
        Dimensions::new(h, width)
    }
}

/// Resize a `height` x `width` canvas to match an aspect ratio specifier.
///
/// `aspect_ratio` is the raw picker value; `None` and `""` are both reported
/// as [`AspectRatioError::Missing`].
///
/// ```
/// # use xenfiny::sizing::aspect_ratio_to_size;
/// # use xenfiny::types::Dimensions;
/// assert_eq!(
///     aspect_ratio_to_size(512, 768, Some("2:3")).unwrap(),
///     Dimensions::new(512, 341)
/// );
/// assert!(aspect_ratio_to_size(512, 512, Some("1-2")).is_err());
/// ```
pub fn aspect_ratio_to_size(
    height: u32,
    width: u32,
    aspect_ratio: Option<&str>,
) -> Result<Dimensions, AspectRatioError> {
    let ratio = AspectRatio::parse_opt(aspect_ratio)?;
    Ok(fit_to_ratio(Dimensions::new(height, width), ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(w: u64, h: u64) -> AspectRatio {
        AspectRatio::new(w, h).unwrap()
    }

    // =========================================================================
    // fit_to_ratio tests
    // =========================================================================

    #[test]
    fn square_to_landscape_keeps_width() {
        // current 1.0 is not wider than 1.78, width kept, height = 512 * 9/16
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 512), ratio(16, 9)),
            Dimensions::new(288, 512)
        );
    }

    #[test]
    fn square_to_square_is_noop() {
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 512), ratio(1, 1)),
            Dimensions::new(512, 512)
        );
    }

    #[test]
    fn tall_to_square_keeps_width() {
        // current 0.5 < 1.0, width kept, height = 512
        assert_eq!(
            fit_to_ratio(Dimensions::new(1024, 512), ratio(1, 1)),
            Dimensions::new(512, 512)
        );
    }

    #[test]
    fn wide_to_portrait_keeps_height() {
        // current 1.5 > 0.667, height kept, width = round(512 * 2/3) = 341
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 768), ratio(2, 3)),
            Dimensions::new(512, 341)
        );
    }

    #[test]
    fn equal_aspect_keeps_width_branch() {
        // 768x1024 is exactly 4:3; equality takes the keep-width branch
        assert_eq!(
            fit_to_ratio(Dimensions::new(768, 1024), ratio(4, 3)),
            Dimensions::new(768, 1024)
        );
    }

    #[test]
    fn square_to_portrait_keeps_height() {
        // current 1.0 > 0.5625, height kept, width = round(512 * 9/16) = 288
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 512), ratio(9, 16)),
            Dimensions::new(512, 288)
        );
    }

    #[test]
    fn wide_to_landscape_keeps_height() {
        // 512x1024 (2.0) is wider than 16:9, width = round(512 * 16/9) = 910
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 1024), ratio(16, 9)),
            Dimensions::new(512, 910)
        );
    }

    #[test]
    fn extreme_ratio_rounds_recomputed_side_to_zero() {
        // 2.0 is not wider than 99999999999:1, width kept, height = 1024 / 1e11
        assert_eq!(
            fit_to_ratio(Dimensions::new(512, 1024), ratio(99_999_999_999, 1)),
            Dimensions::new(0, 1024)
        );
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 3 * 1/2 = 1.5 → 2
        assert_eq!(
            fit_to_ratio(Dimensions::new(7, 3), ratio(2, 1)),
            Dimensions::new(2, 3)
        );
    }

    // =========================================================================
    // aspect_ratio_to_size tests
    // =========================================================================

    #[test]
    fn missing_ratio_is_error() {
        assert_eq!(
            aspect_ratio_to_size(512, 512, None),
            Err(AspectRatioError::Missing)
        );
        assert_eq!(
            aspect_ratio_to_size(512, 512, Some("")),
            Err(AspectRatioError::Missing)
        );
    }

    #[test]
    fn malformed_ratio_is_error() {
        for bad in ["abc", "1-2", "1:2:3"] {
            assert!(matches!(
                aspect_ratio_to_size(512, 512, Some(bad)),
                Err(AspectRatioError::Malformed(_))
            ));
        }
    }

    #[test]
    fn valid_ratio_resizes() {
        assert_eq!(
            aspect_ratio_to_size(1024, 512, Some("1:1")),
            Ok(Dimensions::new(512, 512))
        );
    }
}
