//! RGBA colours stored in grid cells and carried by shapes.
//! Serialized as CSS hex so the browser can use them directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tint used for a hovered placement when the shape colour can't be parsed.
pub const FALLBACK_PREVIEW: &str = "rgba(76, 201, 240, 0.4)";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque colour from `0xRRGGBB`.
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
            a: 0xff,
        }
    }

    /// Colour from `0xRRGGBBAA`.
    pub const fn rgba(hex: u32) -> Self {
        Self {
            r: (hex >> 24) as u8,
            g: (hex >> 16) as u8,
            b: (hex >> 8) as u8,
            a: hex as u8,
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Translucent tint drawn under a hovered placement.
    pub fn preview_rgba(self) -> String {
        format!("rgba({}, {}, {}, 0.8)", self.r, self.g, self.b)
    }
}

/// Preview tint for an arbitrary CSS colour string.
/// Non-hex strings pass through untouched. Only `#rgb` and `#rrggbb` are
/// tinted; anything else starting with `#`, alpha forms included, gets
/// the fallback.
pub fn preview_color(css: &str) -> String {
    let trimmed = css.trim();
    let Some(digits) = trimmed.strip_prefix('#') else {
        return if trimmed.is_empty() {
            FALLBACK_PREVIEW.to_string()
        } else {
            trimmed.to_string()
        };
    };
    if !matches!(digits.len(), 3 | 6) {
        return FALLBACK_PREVIEW.to_string();
    }
    match trimmed.parse::<Color>() {
        Ok(color) => color.preview_rgba(),
        Err(_) => FALLBACK_PREVIEW.to_string(),
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(ColorError::BadLength(s.to_string())),
        };

        let value =
            u32::from_str_radix(&expanded, 16).map_err(|_| ColorError::BadDigit(s.to_string()))?;
        Ok(if expanded.len() == 8 {
            Color::rgba(value)
        } else {
            Color::rgb(value)
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
