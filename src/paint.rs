use std::str::FromStr;

use crate::error::MoonError;

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const YELLOW: Color = Color(0xFFFF_FF00);
    pub const DARK_GRAY: Color = Color(0xFF44_4444);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }
}

impl FromStr for Color {
    type Err = MoonError;

    /// Parses `AARRGGBB`, optionally prefixed with `#` or `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 8 {
            return Err(MoonError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Color)
            .map_err(|_| MoonError::InvalidColor(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStyle {
    Fill,
    Stroke,
}

/// How a shape is painted: color, fill or stroke, and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color,
    pub draw_style: DrawStyle,
    pub stroke_width: f32,
}

impl Style {
    pub const fn fill(color: Color) -> Self {
        Self {
            color,
            draw_style: DrawStyle::Fill,
            stroke_width: 0.0,
        }
    }

    pub const fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            draw_style: DrawStyle::Stroke,
            stroke_width: width,
        }
    }
}
