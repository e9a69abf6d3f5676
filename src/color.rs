//! Group display colors
//!
//! `#RRGGBB` colors as returned by the API, and the label contrast rule used
//! when rendering a group's node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text color used on light fills
pub const DARK_TEXT: &str = "#000000";
/// Text color used on dark fills
pub const LIGHT_TEXT: &str = "#ffffff";

/// Luminance (scaled by 1000) at or above which a fill counts as light
const LIGHT_FILL_THRESHOLD: u32 = 186_000;

/// A validated `#RRGGBB` color
///
/// Deserialization rejects anything else, so a malformed color in a response
/// payload surfaces as a shape error at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Build a color from its channels
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string (hex digits in either case)
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{}' must start with '#'", s))?;

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{}' is not of the form #RRGGBB", s));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(format!("color '{}' is not of the form #RRGGBB", s)),
        }
    }

    /// Red, green and blue channels
    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Perceived luminance `0.299R + 0.587G + 0.114B`, scaled by 1000
    pub fn luminance_milli(&self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    /// Text color that stays readable on this fill
    pub fn readable_text_color(&self) -> &'static str {
        readable_text_color_on(self)
    }
}

/// Pick black text for light fills and white text for dark ones
///
/// Black when the luminance is 186 or more, white otherwise.
pub fn readable_text_color_on(color: &HexColor) -> &'static str {
    if color.luminance_milli() >= LIGHT_FILL_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl std::str::FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
