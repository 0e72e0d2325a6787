use std::fmt;
use std::str::FromStr;

use egui::Color32;

use crate::error::DesignerError;

/// The fixed set of t-shirt colors offered by the palette selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShirtColor {
    #[default]
    White,
    Black,
    Red,
    Blue,
    Green,
}

impl ShirtColor {
    pub const ALL: [ShirtColor; 5] = [
        ShirtColor::White,
        ShirtColor::Black,
        ShirtColor::Red,
        ShirtColor::Blue,
        ShirtColor::Green,
    ];

    /// Palette key as delivered by the selector
    pub fn key(self) -> &'static str {
        match self {
            ShirtColor::White => "white",
            ShirtColor::Black => "black",
            ShirtColor::Red => "red",
            ShirtColor::Blue => "blue",
            ShirtColor::Green => "green",
        }
    }

    /// Body fill color
    pub fn fill(self) -> Color32 {
        match self {
            ShirtColor::White => Color32::from_rgb(0xff, 0xff, 0xff),
            ShirtColor::Black => Color32::from_rgb(0x00, 0x00, 0x00),
            ShirtColor::Red => Color32::from_rgb(0xdc, 0x26, 0x26),
            ShirtColor::Blue => Color32::from_rgb(0x25, 0x63, 0xeb),
            ShirtColor::Green => Color32::from_rgb(0x16, 0xa3, 0x4a),
        }
    }

    /// Neckline fill; a white shirt gets a light gray collar so it stays visible.
    pub fn neckline_fill(self) -> Color32 {
        match self {
            ShirtColor::White => Color32::from_rgb(0xf0, 0xf0, 0xf0),
            other => other.fill(),
        }
    }
}

impl fmt::Display for ShirtColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ShirtColor {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShirtColor::ALL
            .into_iter()
            .find(|color| color.key() == s)
            .ok_or_else(|| DesignerError::InvalidColor(s.to_owned()))
    }
}
