//! Aspect ratio specifiers.
//!
//! A ratio is written `width:height` with two positive decimal integers and
//! nothing else: no whitespace, no sign, no third component. The first number
//! is always the width. `"16:9"` is landscape, `"9:16"` is portrait.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AspectRatioError {
    #[error("Aspect ratio must be supplied")]
    Missing,
    /// Not `digits:digits`, a zero component, or a component past `u64::MAX`.
    #[error("Aspect ratio must be in the format \"width:height\", got {0:?}")]
    Malformed(String),
}

/// Ratios offered by the aspect-ratio picker, in display order.
pub const PRESET_RATIOS: [AspectRatio; 7] = [
    AspectRatio::new_unchecked(1, 1),
    AspectRatio::new_unchecked(2, 3),
    AspectRatio::new_unchecked(3, 2),
    AspectRatio::new_unchecked(3, 4),
    AspectRatio::new_unchecked(4, 3),
    AspectRatio::new_unchecked(9, 16),
    AspectRatio::new_unchecked(16, 9),
];

/// A target proportion expressed as `width:height` units. Both are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    width: u64,
    height: u64,
}

impl AspectRatio {
    /// Returns `None` if either component is zero.
    pub fn new(width: u64, height: u64) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    const fn new_unchecked(width: u64, height: u64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> u64 {
        self.width
    }

    pub fn height(self) -> u64 {
        self.height
    }

    /// Width divided by height.
    pub fn as_f64(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Parse an optional specifier, treating `None` and `""` alike.
    ///
    /// This is the entry point for form input, where an unselected picker
    /// yields nothing at all.
    pub fn parse_opt(input: Option<&str>) -> Result<Self, AspectRatioError> {
        match input {
            None => Err(AspectRatioError::Missing),
            Some(s) => s.parse(),
        }
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AspectRatioError::Missing);
        }
        let malformed = || AspectRatioError::Malformed(s.to_string());
        let (w, h) = s.split_once(':').ok_or_else(malformed)?;
        let width = parse_component(w).ok_or_else(malformed)?;
        // A second colon lands in `h` and fails the digit check.
        let height = parse_component(h).ok_or_else(malformed)?;
        AspectRatio::new(width, height).ok_or_else(malformed)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_landscape() {
        let r: AspectRatio = "16:9".parse().unwrap();
        assert_eq!((r.width(), r.height()), (16, 9));
    }

    #[test]
    fn parses_multi_digit_components() {
        let r: AspectRatio = "1024:768".parse().unwrap();
        assert_eq!((r.width(), r.height()), (1024, 768));
    }

    #[test]
    fn leading_zeros_are_digits() {
        let r: AspectRatio = "04:03".parse().unwrap();
        assert_eq!(r, AspectRatio::new(4, 3).unwrap());
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!("".parse::<AspectRatio>(), Err(AspectRatioError::Missing));
    }

    #[test]
    fn none_is_missing() {
        assert_eq!(AspectRatio::parse_opt(None), Err(AspectRatioError::Missing));
        assert_eq!(
            AspectRatio::parse_opt(Some("")),
            Err(AspectRatioError::Missing)
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        for input in ["abc", "1-2", "1:2:3", ":", "1:", ":2", " 1:2", "1:2 ", "+1:2", "1.5:2"] {
            assert_eq!(
                input.parse::<AspectRatio>(),
                Err(AspectRatioError::Malformed(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn rejects_zero_components() {
        assert!(matches!(
            "0:5".parse::<AspectRatio>(),
            Err(AspectRatioError::Malformed(_))
        ));
        assert!(matches!(
            "5:0".parse::<AspectRatio>(),
            Err(AspectRatioError::Malformed(_))
        ));
    }

    #[test]
    fn accepts_components_past_u32() {
        let r: AspectRatio = "99999999999:1".parse().unwrap();
        assert_eq!((r.width(), r.height()), (99_999_999_999, 1));
    }

    #[test]
    fn rejects_component_past_u64() {
        assert!(matches!(
            "99999999999999999999:1".parse::<AspectRatio>(),
            Err(AspectRatioError::Malformed(_))
        ));
    }

    #[test]
    fn error_messages_are_distinct() {
        let missing = AspectRatioError::Missing.to_string();
        let malformed = AspectRatioError::Malformed("x".into()).to_string();
        assert!(missing.contains("must be supplied"));
        assert!(malformed.contains("width:height"));
    }

    #[test]
    fn display_matches_input_form() {
        assert_eq!(AspectRatio::new(9, 16).unwrap().to_string(), "9:16");
    }

    #[test]
    fn presets_are_valid_and_in_picker_order() {
        let names: Vec<String> = PRESET_RATIOS.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["1:1", "2:3", "3:2", "3:4", "4:3", "9:16", "16:9"]);
        for r in PRESET_RATIOS {
            assert_eq!(AspectRatio::new(r.width(), r.height()), Some(r));
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let r = AspectRatio::new(3, 2).unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"3:2\"");
        let back: AspectRatio = serde_json::from_str("\"3:2\"").unwrap();
        assert_eq!(back, r);
        assert!(serde_json::from_str::<AspectRatio>("\"3x2\"").is_err());
    }
}
