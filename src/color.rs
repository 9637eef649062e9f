//! # Color
//!
//! The color identity carried by every living cell. Colors are plain values:
//! they are created, blended and formatted, never edited in place.

use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);
    pub const ORANGE: Color = Color::new(255, 128, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const CHARTREUSE: Color = Color::new(128, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const SPRING_GREEN: Color = Color::new(0, 255, 128);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const DODGER_BLUE: Color = Color::new(0, 128, 255);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const PURPLE: Color = Color::new(128, 0, 255);
    pub const VIOLET: Color = Color::new(255, 0, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 128);

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// The hue palette, walking the color wheel in 30° steps starting at red.
    pub const HUES: [Color; 12] = [
        Color::RED,
        Color::ORANGE,
        Color::YELLOW,
        Color::CHARTREUSE,
        Color::GREEN,
        Color::SPRING_GREEN,
        Color::CYAN,
        Color::DODGER_BLUE,
        Color::BLUE,
        Color::PURPLE,
        Color::VIOLET,
        Color::MAGENTA,
    ];

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blends colors by taking the floored arithmetic mean of each channel.
    ///
    /// # Panics
    ///
    /// Panics if `colors` is empty. Newborn cells always have exactly three
    /// parents, so the grid never calls this with nothing to blend.
    pub fn blend(colors: &[Color]) -> Color {
        assert!(
            !colors.is_empty(),
            "precondition violated: Color::blend needs at least one color"
        );

        let (r, g, b) = colors.iter().fold((0_u32, 0_u32, 0_u32), |(r, g, b), c| {
            (r + c.r as u32, g + c.g as u32, b + c.b as u32)
        });
        let n = colors.len() as u32;

        // The mean of u8 values always fits back into a u8.
        Color::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }

    /// Picks one of the twelve [`Color::HUES`] uniformly at random.
    pub fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> Color {
        *Self::HUES.choose(rng).unwrap_or(&Color::WHITE)
    }

    /// A uniformly random channel triple. Each channel lands in `0..255`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Color::new(
            rng.gen_range(0..255),
            rng.gen_range(0..255),
            rng.gen_range(0..255),
        )
    }

    /// Formats the color as `#rrggbb` with lowercase, zero-padded channels.
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

/// Failure to read a color written as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("expected 6 hex digits, found {0}")]
    Length(usize),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        let len = digits.chars().count();
        if len != 6 {
            return Err(ParseColorError::Length(len));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::Digits(value.to_string()));
        }

        // All ASCII from here, so byte ranges are char boundaries.
        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16)
                .map_err(|_| ParseColorError::Digits(value.to_string()))
        };

        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}
