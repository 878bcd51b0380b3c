//! Canonical `#RRGGBB` colors and the HSV math behind the picker.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod math;

pub use math::{hsv_to_hex, hsv_to_rgb, rgb_to_hsv};

/// Built-in system palette, in its factory order.
pub const DEFAULT_COLORS: [&str; 11] = [
    "#FFFFFF", "#03FBFA", "#378BFC", "#F9C0D6", "#8A2AE3", "#E141F9", "#7702F9", "#FF00BB",
    "#FDE903", "#E3BBEC", "#EC602A",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color")]
    Empty,
    #[error("invalid color {0:?}: expected #RRGGBB or #RGB")]
    Invalid(String),
}

/// A 6-digit RGB color, always stored upper-case with a leading `#`.
///
/// Equality is plain string equality, which is only meaningful because
/// every constructor normalizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::Invalid(raw.to_string()));
        }
        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorError::Invalid(raw.to_string())),
        };
        Ok(Self(format!("#{}", expanded.to_ascii_uppercase())))
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    pub fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        // Constructors guarantee 6 hex digits after '#'.
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Factory system palette.
    pub fn defaults() -> Vec<Color> {
        DEFAULT_COLORS
            .iter()
            .map(|c| Color(c.to_string()))
            .collect()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.0
    }
}
