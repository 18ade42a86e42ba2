//! HEX colors and owner color assignment.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// High-contrast palette handed out to the first owners, in assignment order.
pub const PALETTE: [&str; 20] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
    "#F8B739", "#52B788", "#E74C3C", "#3498DB", "#9B59B6", "#1ABC9C", "#F39C12", "#E67E22",
    "#95A5A6", "#34495E", "#16A085", "#27AE60",
];

/// Fractional part of the golden ratio; stepping hue by this spreads colors evenly.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
const GENERATED_SATURATION: f64 = 0.7;
const GENERATED_LIGHTNESS: f64 = 0.6;

/// A `#RRGGBB` color.
///
/// ## Examples
///
/// ```
/// use roadmap_core::HexColor;
///
/// assert!(HexColor::parse("#FF6B6B").is_ok());
/// assert!(HexColor::parse("#ff6b6b").is_ok());
///
/// assert!(HexColor::parse("FF6B6B").is_err());   // missing #
/// assert!(HexColor::parse("#FF6B6").is_err());   // too short
/// assert!(HexColor::parse("#GG6B6B").is_err());  // not hex
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidColor`] unless the input is `#`
    /// followed by exactly six hex digits.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let valid = s.len() == 7
            && s.starts_with('#')
            && s.bytes().skip(1).all(|b| b.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(ValidationError::InvalidColor(s.to_owned()))
        }
    }

    /// Wrap a literal that is known to be a valid color.
    pub(crate) fn from_static(hex: &'static str) -> Self {
        Self(hex.to_owned())
    }

    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl std::str::FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Pick the color for the owner created after `existing_count` others.
///
/// The first twenty owners get the fixed palette in order. Past that, hues
/// are generated by golden-ratio rotation at fixed saturation and lightness,
/// so the same index always yields the same color.
#[must_use]
pub fn assign_color(existing_count: usize) -> HexColor {
    PALETTE
        .get(existing_count)
        .map_or_else(|| generated_color(existing_count), |hex| HexColor::from_static(*hex))
}

/// Golden-ratio HSL color for an arbitrary index.
#[must_use]
pub fn generated_color(index: usize) -> HexColor {
    #[allow(clippy::cast_precision_loss)] // owner counts never approach 2^52
    let hue = (index as f64 * GOLDEN_RATIO_CONJUGATE) % 1.0;
    let (r, g, b) = hsl_to_rgb(hue, GENERATED_SATURATION, GENERATED_LIGHTNESS);
    HexColor::from_rgb(r, g, b)
}

/// Convert HSL (each in `0.0..=1.0`) to 8-bit RGB, truncating channels.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let (r, g, b) = if s.abs() < f64::EPSILON {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };
    (to_byte(r), to_byte(g), to_byte(b))
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // channel is clamped to 0..=1
fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_in_order() {
        for (i, hex) in PALETTE.iter().enumerate() {
            assert_eq!(assign_color(i).as_str(), *hex);
        }
    }

    #[test]
    fn test_palette_entries_are_valid() {
        for hex in PALETTE {
            assert!(HexColor::parse(hex).is_ok(), "{hex}");
        }
    }

    #[test]
    fn test_generated_colors_past_palette() {
        assert_eq!(assign_color(20).as_str(), "#51E069");
        assert_eq!(assign_color(21).as_str(), "#E05163");
        assert_eq!(assign_color(41).as_str(), "#51E056");
        assert_ne!(assign_color(20), assign_color(41));
    }

    #[test]
    fn test_generated_colors_are_deterministic_and_valid() {
        for index in 20..200 {
            let first = assign_color(index);
            assert_eq!(first, assign_color(index));
            assert!(HexColor::parse(first.as_str()).is_ok());
        }
    }

    #[test]
    fn test_hsl_grey_when_unsaturated() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.5), (127, 127, 127));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(HexColor::parse("").is_err());
        assert!(HexColor::parse("#FFF").is_err());
        assert!(HexColor::parse("#FF6B6B0").is_err());
        assert!(HexColor::parse("#ZZZZZZ").is_err());
        assert!(HexColor::parse("FF6B6B#").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HexColor = serde_json::from_str("\"#95A5A6\"").unwrap();
        assert_eq!(ok.as_str(), "#95A5A6");
        assert!(serde_json::from_str::<HexColor>("\"grey\"").is_err());
    }
}
