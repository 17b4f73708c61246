// 🎨 Liturgical Colors
// Vestment colors plus the display hex the app paints with.
//
// Stored colors may be any "#RRGGBB" display value. Hex values matching the
// palette map back to the named color; anything else is kept as Custom.

use crate::error::{CalendarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LiturgicalColor {
    /// Advent
    Purple,

    /// Lent
    Violet,

    /// Christmastide, Eastertide, most solemnities
    White,

    /// Ordinary Time
    Green,

    /// Martyrs, Pentecost, Passion
    Red,

    /// Gaudete and Laetare Sundays
    Rose,

    Gold,

    Black,

    /// Display color outside the palette, as 0xRRGGBB
    Custom(u32),
}

impl LiturgicalColor {
    /// Named palette (Custom excluded)
    pub const ALL: [LiturgicalColor; 8] = [
        LiturgicalColor::Purple,
        LiturgicalColor::Violet,
        LiturgicalColor::White,
        LiturgicalColor::Green,
        LiturgicalColor::Red,
        LiturgicalColor::Rose,
        LiturgicalColor::Gold,
        LiturgicalColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiturgicalColor::Purple => "purple",
            LiturgicalColor::Violet => "violet",
            LiturgicalColor::White => "white",
            LiturgicalColor::Green => "green",
            LiturgicalColor::Red => "red",
            LiturgicalColor::Rose => "rose",
            LiturgicalColor::Gold => "gold",
            LiturgicalColor::Black => "black",
            LiturgicalColor::Custom(_) => "custom",
        }
    }

    pub fn rgb(&self) -> u32 {
        match self {
            LiturgicalColor::Purple => 0x4B0082,
            LiturgicalColor::Violet => 0x8B008B,
            LiturgicalColor::White => 0xFFFFFF,
            LiturgicalColor::Green => 0x2E8B57,
            LiturgicalColor::Red => 0xFF0000,
            LiturgicalColor::Rose => 0xFF66CC,
            LiturgicalColor::Gold => 0xDAA520,
            LiturgicalColor::Black => 0x000000,
            LiturgicalColor::Custom(rgb) => *rgb,
        }
    }

    /// Display hex, e.g. "#8B008B"
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.rgb())
    }

    /// Palette color for this RGB value, else Custom
    pub fn from_rgb(rgb: u32) -> Self {
        LiturgicalColor::ALL
            .into_iter()
            .find(|c| c.rgb() == rgb)
            .unwrap_or(LiturgicalColor::Custom(rgb & 0xFFFFFF))
    }
}

/// "#RRGGBB" or "#RGB"
fn parse_hex(text: &str) -> Option<u32> {
    let digits = text.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok(),
        3 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&doubled, 16).ok()
        }
        _ => None,
    }
}

impl fmt::Display for LiturgicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiturgicalColor::Custom(_) => f.pad(&self.hex()),
            named => f.pad(named.as_str()),
        }
    }
}

impl FromStr for LiturgicalColor {
    type Err = CalendarError;

    /// Accepts a palette name (any case) or any display hex
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        if let Some(rgb) = parse_hex(needle) {
            return Ok(LiturgicalColor::from_rgb(rgb));
        }
        LiturgicalColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CalendarError::record(format!("unknown liturgical color: {:?}", s)))
    }
}

impl TryFrom<String> for LiturgicalColor {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LiturgicalColor> for String {
    fn from(color: LiturgicalColor) -> String {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_any_case() {
        assert_eq!("Red".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::Red);
        assert_eq!("WHITE".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::White);
        assert_eq!(" green ".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::Green);
    }

    #[test]
    fn test_parse_by_hex() {
        assert_eq!("#8b008b".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::Violet);
        assert_eq!("#4B0082".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::Purple);
        assert_eq!("#fff".parse::<LiturgicalColor>().unwrap(), LiturgicalColor::White);
    }

    #[test]
    fn test_app_hex_outside_palette_kept() {
        let dark_red = "#8B0000".parse::<LiturgicalColor>().unwrap();
        assert_eq!(dark_red, LiturgicalColor::Custom(0x8B0000));
        assert_eq!(dark_red.hex(), "#8B0000");
        assert_eq!(dark_red.to_string(), "#8B0000");
    }

    #[test]
    fn test_unknown_color_rejected() {
        let err = "chartreuse".parse::<LiturgicalColor>().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRecord(_)));
        assert!("#12345".parse::<LiturgicalColor>().is_err());
        assert!("#GGGGGG".parse::<LiturgicalColor>().is_err());
    }

    #[test]
    fn test_hex_round_trips_through_from_str() {
        for color in LiturgicalColor::ALL {
            assert_eq!(color.hex().parse::<LiturgicalColor>().unwrap(), color);
        }
    }

    #[test]
    fn test_serde_uses_names_and_hex() {
        assert_eq!(serde_json::to_string(&LiturgicalColor::Rose).unwrap(), "\"rose\"");
        assert_eq!(
            serde_json::to_string(&LiturgicalColor::Custom(0x8B0000)).unwrap(),
            "\"#8B0000\""
        );
        let back: LiturgicalColor = serde_json::from_str("\"#8B0000\"").unwrap();
        assert_eq!(back, LiturgicalColor::Custom(0x8B0000));
    }
}
