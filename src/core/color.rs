//! RGBA color type with CSS hex notation.

use crate::MapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
///
/// Serializes as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not opaque)
/// so option overrides can be written the same way a stylesheet would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color with explicit RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(src: &str) -> Result<Self, MapError> {
        let s = src.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| MapError::InvalidColor(format!("{s}: expected leading '#'")))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidColor(format!("{s}: non-hex digit")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| MapError::InvalidColor(format!("{s}: bad channel")))
        };

        match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            n => Err(MapError::InvalidColor(format!(
                "{s}: expected 3, 6 or 8 hex digits, got {n}"
            ))),
        }
    }

    /// Format as lowercase CSS hex.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Component-wise linear interpolation in sRGB space.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#929292").unwrap(), Color::rgb(0x92, 0x92, 0x92));
        assert_eq!(
            Color::from_hex("#98293a80").unwrap(),
            Color::new(0x98, 0x29, 0x3a, 0x80)
        );
        assert_eq!("#B39F7B".parse::<Color>().unwrap(), Color::rgb(0xb3, 0x9f, 0x7b));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex("929292").is_err());
        assert!(Color::from_hex("#92929").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0x33, 0x33, 0x33).to_hex(), "#333333");
        assert_eq!(Color::new(0, 0, 0, 0).to_string(), "#00000000");
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0xef, 0xc7, 0x7f)).unwrap();
        assert_eq!(json, "\"#efc77f\"");

        let parsed: Color = serde_json::from_str("\"#c4785d\"").unwrap();
        assert_eq!(parsed, Color::rgb(0xc4, 0x78, 0x5d));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
