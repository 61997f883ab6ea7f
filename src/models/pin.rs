// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin data structures.
//!
//! A pin is a point annotation anchored to background-image coordinates.
//! It carries a color from a fixed palette and an ordered list of image
//! annotations.

use super::annotation::Annotation;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pin color palette.
///
/// Serialized by name. On load, `#rrggbb` values are also accepted: the
/// editor's extended palette maps each shade to its base color, and any
/// other hex value maps to the nearest palette color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Brown,
    Black,
    White,
}

/// Hex values of the editor's color picker, each with the palette color it stands for.
const HEX_SHADES: [(&str, PinColor); 17] = [
    ("#000000", PinColor::Black),
    ("#444444", PinColor::Black),
    ("#bbbbbb", PinColor::White),
    ("#ffffff", PinColor::White),
    ("#ff0000", PinColor::Red),
    ("#cc0000", PinColor::Red),
    ("#ffa500", PinColor::Orange),
    ("#cc8400", PinColor::Orange),
    ("#ffff00", PinColor::Yellow),
    ("#cccc00", PinColor::Yellow),
    ("#008000", PinColor::Green),
    ("#004000", PinColor::Green),
    ("#0000ff", PinColor::Blue),
    ("#000080", PinColor::Blue),
    ("#800080", PinColor::Purple),
    ("#4b004b", PinColor::Purple),
    ("#a52a2a", PinColor::Brown),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pin color '{0}'")]
pub struct UnknownColor(String);

fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

impl PinColor {
    pub const ALL: [PinColor; 9] = [
        PinColor::Red,
        PinColor::Green,
        PinColor::Blue,
        PinColor::Yellow,
        PinColor::Orange,
        PinColor::Purple,
        PinColor::Brown,
        PinColor::Black,
        PinColor::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PinColor::Red => "red",
            PinColor::Green => "green",
            PinColor::Blue => "blue",
            PinColor::Yellow => "yellow",
            PinColor::Orange => "orange",
            PinColor::Purple => "purple",
            PinColor::Brown => "brown",
            PinColor::Black => "black",
            PinColor::White => "white",
        }
    }

    /// Palette color closest to an RGB value.
    pub fn nearest(rgb: [u8; 3]) -> PinColor {
        let distance = |color: PinColor| -> u32 {
            color
                .rgb()
                .iter()
                .zip(rgb)
                .map(|(&a, b)| {
                    let d = a.abs_diff(b) as u32;
                    d * d
                })
                .sum()
        };
        PinColor::ALL
            .into_iter()
            .min_by_key(|&color| distance(color))
            .unwrap_or_default()
    }

    /// RGB value used when painting the pin.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            PinColor::Red => [0xff, 0x00, 0x00],
            PinColor::Green => [0x00, 0x80, 0x00],
            PinColor::Blue => [0x00, 0x00, 0xff],
            PinColor::Yellow => [0xff, 0xff, 0x00],
            PinColor::Orange => [0xff, 0xa5, 0x00],
            PinColor::Purple => [0x80, 0x00, 0x80],
            PinColor::Brown => [0xa5, 0x2a, 0x2a],
            PinColor::Black => [0x00, 0x00, 0x00],
            PinColor::White => [0xff, 0xff, 0xff],
        }
    }
}

impl FromStr for PinColor {
    type Err = UnknownColor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        if let Some(color) = PinColor::ALL.into_iter().find(|c| c.name() == value) {
            return Ok(color);
        }
        if let Some(&(_, color)) = HEX_SHADES.iter().find(|(hex, _)| *hex == value) {
            return Ok(color);
        }
        parse_hex(&value)
            .map(PinColor::nearest)
            .ok_or(UnknownColor(value))
    }
}

impl<'de> Deserialize<'de> for PinColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for PinColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pin placed on the map, in model-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub color: PinColor,
    #[serde(default)]
    pub images: Vec<Annotation>,
}

/// Partial update applied to a pin. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub color: Option<PinColor>,
    pub images: Option<Vec<Annotation>>,
}

impl PinPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn color(color: PinColor) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn images(images: Vec<Annotation>) -> Self {
        Self {
            images: Some(images),
            ..Default::default()
        }
    }
}

impl Pin {
    /// Create a new pin with the default color and no images.
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            color: PinColor::default(),
            images: Vec::new(),
        }
    }

    /// Merge a patch into the pin. Returns whether anything changed.
    pub fn apply(&mut self, patch: PinPatch) -> bool {
        let mut changed = false;
        if let Some(x) = patch.x {
            changed |= self.x != x;
            self.x = x;
        }
        if let Some(y) = patch.y {
            changed |= self.y != y;
            self.y = y;
        }
        if let Some(color) = patch.color {
            changed |= self.color != color;
            self.color = color;
        }
        if let Some(images) = patch.images {
            changed |= self.images != images;
            self.images = images;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pin_defaults() {
        let pin = Pin::new(7, 1.0, 2.0);
        assert_eq!(pin.color, PinColor::Red);
        assert!(pin.images.is_empty());
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut pin = Pin::new(1, 10.0, 20.0);
        pin.images.push(Annotation::new("data:a".to_string()));

        assert!(pin.apply(PinPatch::color(PinColor::Blue)));
        assert_eq!(pin.color, PinColor::Blue);
        assert_eq!((pin.x, pin.y), (10.0, 20.0));
        assert_eq!(pin.images.len(), 1);

        assert!(pin.apply(PinPatch::position(3.0, 4.0)));
        assert_eq!((pin.x, pin.y), (3.0, 4.0));
        assert_eq!(pin.color, PinColor::Blue);
    }

    #[test]
    fn test_apply_reports_no_change() {
        let mut pin = Pin::new(1, 10.0, 20.0);
        assert!(!pin.apply(PinPatch::position(10.0, 20.0)));
        assert!(!pin.apply(PinPatch::default()));
    }

    #[test]
    fn test_color_serialization() {
        assert_eq!(serde_json::to_string(&PinColor::Purple).unwrap(), "\"purple\"");
        let color: PinColor = serde_json::from_str("\"#ffa500\"").unwrap();
        assert_eq!(color, PinColor::Orange);
        let color: PinColor = serde_json::from_str("\"Blue\"").unwrap();
        assert_eq!(color, PinColor::Blue);
        assert!(serde_json::from_str::<PinColor>("\"teal\"").is_err());
        assert!(serde_json::from_str::<PinColor>("\"#12345\"").is_err());
        assert!(serde_json::from_str::<PinColor>("\"#12345g\"").is_err());
    }

    #[test]
    fn test_editor_hex_palette_loads() {
        let expected = [
            ("#000000", PinColor::Black),
            ("#444444", PinColor::Black),
            ("#bbbbbb", PinColor::White),
            ("#ffffff", PinColor::White),
            ("#ff0000", PinColor::Red),
            ("#cc0000", PinColor::Red),
            ("#ffa500", PinColor::Orange),
            ("#cc8400", PinColor::Orange),
            ("#ffff00", PinColor::Yellow),
            ("#cccc00", PinColor::Yellow),
            ("#008000", PinColor::Green),
            ("#004000", PinColor::Green),
            ("#0000ff", PinColor::Blue),
            ("#000080", PinColor::Blue),
            ("#800080", PinColor::Purple),
            ("#4b004b", PinColor::Purple),
            ("#a52a2a", PinColor::Brown),
        ];
        for (hex, color) in expected {
            let json = format!(r#"{{"id":1,"x":0,"y":0,"color":"{}"}}"#, hex);
            let pin: Pin = serde_json::from_str(&json).unwrap();
            assert_eq!(pin.color, color, "{}", hex);
        }
    }

    #[test]
    fn test_other_hex_maps_to_nearest() {
        assert_eq!("#fe0101".parse::<PinColor>().unwrap(), PinColor::Red);
        assert_eq!("#F0F0F0".parse::<PinColor>().unwrap(), PinColor::White);
        assert_eq!("#123456".parse::<PinColor>().unwrap(), PinColor::Black);
        assert_eq!(PinColor::nearest([0x00, 0x70, 0x10]), PinColor::Green);
    }

    #[test]
    fn test_palette_names_match_serde() {
        for color in PinColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.name()));
        }
    }
}
