//! Colors and paint used by the draw primitives.

use crate::error::{Error, Result};

/// An RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA", with or without the leading hash.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| Error::Invalid(format!("hex color {hex:?}")))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(Error::Invalid(format!("hex color {hex:?}"))),
        }
    }

    /// Scale the color channels by a factor, keeping alpha. 0.0 = black,
    /// 1.0 = unchanged.
    pub fn scale_brightness(self, factor: f32) -> Self {
        let scale = |v: u8| (f32::from(v) * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// Darken by a fraction of the current brightness.
    pub fn darken(self, amount: f32) -> Self {
        self.scale_brightness(1.0 - amount)
    }

    /// Blend this color with another. ratio 0.0 = self, 1.0 = other.
    pub fn blend(self, other: Self, ratio: f32) -> Self {
        let t = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) * (1.0 - t) + f32::from(b) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Outline stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke thickness.
    pub thickness: f32,
}

/// Fill and outline for a shape.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Paint {
    /// Interior fill.
    pub fill: Option<Color>,
    /// Outline stroke.
    pub outline: Option<Stroke>,
}

impl Paint {
    /// A plain fill.
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            outline: None,
        }
    }

    /// Add an outline.
    pub fn outline(mut self, color: Color, thickness: f32) -> Self {
        self.outline = Some(Stroke { color, thickness });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex() {
        assert_eq!(Color::from_hex("#3c3c3c").unwrap(), Color::rgb(60, 60, 60));
        assert_eq!(
            Color::from_hex("ff000080").unwrap(),
            Color::rgba(255, 0, 0, 128)
        );
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zz0000").is_err());
    }

    #[test]
    fn brightness() {
        let c = Color::rgb(100, 200, 40);
        assert_eq!(c.darken(0.5), Color::rgb(50, 100, 20));
        assert_eq!(c.scale_brightness(2.0), Color::rgb(200, 255, 80));
        assert_eq!(c.darken(0.0), c);
        assert_eq!(Color::BLACK.blend(Color::WHITE, 0.5), Color::rgb(128, 128, 128));
    }
}
