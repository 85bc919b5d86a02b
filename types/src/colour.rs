//! Colour values as they appear in the settings document.
//!
//! A colour is either written as a string (`#rgb`, `#rrggbb`, `#rrggbbaa`
//! or a named colour) or as an explicit `[r, g, b, a]` byte array.

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA bytes.
pub type Rgba = [u8; 4];

/// A colour entry from the `colours` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColourValue {
    Rgba(Rgba),
    Text(String),
}

impl ColourValue {
    /// Resolve to RGBA bytes
    pub fn to_rgba(&self) -> Result<Rgba, ColourError> {
        match self {
            Self::Rgba(rgba) => Ok(*rgba),
            Self::Text(text) => parse_colour(text),
        }
    }
}

impl From<&str> for ColourValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Error returned for a colour string that is neither hex nor a known name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourError {
    pub value: String,
}

impl std::fmt::Display for ColourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognised colour {:?}", self.value)
    }
}

impl std::error::Error for ColourError {}

/// Named colours understood in addition to hex notation.
///
/// Covers the single-letter shorthands, the `tab:` palette and the common
/// CSS names.
const NAMED_COLOURS: &[(&str, Rgba)] = &[
    ("b", [0, 0, 255, 255]),
    ("g", [0, 128, 0, 255]),
    ("r", [255, 0, 0, 255]),
    ("c", [0, 191, 191, 255]),
    ("m", [191, 0, 191, 255]),
    ("y", [191, 191, 0, 255]),
    ("k", [0, 0, 0, 255]),
    ("w", [255, 255, 255, 255]),
    ("tab:blue", [31, 119, 180, 255]),
    ("tab:orange", [255, 127, 14, 255]),
    ("tab:green", [44, 160, 44, 255]),
    ("tab:red", [214, 39, 40, 255]),
    ("tab:purple", [148, 103, 189, 255]),
    ("tab:brown", [140, 86, 75, 255]),
    ("tab:pink", [227, 119, 194, 255]),
    ("tab:gray", [127, 127, 127, 255]),
    ("tab:grey", [127, 127, 127, 255]),
    ("tab:olive", [188, 189, 34, 255]),
    ("tab:cyan", [23, 190, 207, 255]),
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("navy", [0, 0, 128, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("gold", [255, 215, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("teal", [0, 128, 128, 255]),
    ("olive", [128, 128, 0, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("brown", [165, 42, 42, 255]),
    ("pink", [255, 192, 203, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("lightgray", [211, 211, 211, 255]),
    ("lightgrey", [211, 211, 211, 255]),
    ("darkgray", [169, 169, 169, 255]),
    ("darkgrey", [169, 169, 169, 255]),
    ("none", [0, 0, 0, 0]),
    ("transparent", [0, 0, 0, 0]),
];

/// Parse a colour string into RGBA bytes.
///
/// # Examples
/// ```
/// use aarshjul_types::parse_colour;
/// assert_eq!(parse_colour("#ff8000").unwrap(), [255, 128, 0, 255]);
/// assert_eq!(parse_colour("#f80").unwrap(), [255, 136, 0, 255]);
/// assert_eq!(parse_colour("White").unwrap(), [255, 255, 255, 255]);
/// ```
pub fn parse_colour(value: &str) -> Result<Rgba, ColourError> {
    let trimmed = value.trim();
    let err = || ColourError {
        value: value.to_string(),
    };

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(err);
    }

    let lower = trimmed.to_ascii_lowercase();
    NAMED_COLOURS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgba)| *rgba)
        .ok_or_else(err)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        4 => Some([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_colour("#000000").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_colour("#1f77b4").unwrap(), [31, 119, 180, 255]);
        assert_eq!(parse_colour("#1F77B480").unwrap(), [31, 119, 180, 128]);
        assert_eq!(parse_colour("#fff8").unwrap(), [255, 255, 255, 136]);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_colour("tab:blue").unwrap(), [31, 119, 180, 255]);
        assert_eq!(parse_colour("  GREY ").unwrap(), [128, 128, 128, 255]);
        assert_eq!(parse_colour("k").unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_colour("#12345").is_err());
        assert!(parse_colour("#zzzzzz").is_err());
        assert!(parse_colour("chartreuse-ish").is_err());
        let err = parse_colour("nope").unwrap_err();
        assert_eq!(err.to_string(), "unrecognised colour \"nope\"");
    }

    #[test]
    fn test_colour_value_from_json() {
        let text: ColourValue = serde_json::from_str("\"#ffffff\"").unwrap();
        let array: ColourValue = serde_json::from_str("[10, 20, 30, 40]").unwrap();
        assert_eq!(text.to_rgba().unwrap(), [255, 255, 255, 255]);
        assert_eq!(array.to_rgba().unwrap(), [10, 20, 30, 40]);
    }
}
