//! RGB color type used throughout the animations.

use std::fmt;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
///
/// Channels are `u8`, so every interpolation result is clamped to `0..=255`
/// on construction instead of leaking out-of-range values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from floating point channels, rounding to the nearest
    /// integer and clamping to the valid range. NaN maps to 0.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Add `amount` to every channel, saturating at 255.
    pub fn saturating_add(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }

    /// Multiply each channel by its own factor, flooring the result.
    pub fn tinted(self, r_mult: f64, g_mult: f64, b_mult: f64) -> Self {
        let floor = |c: u8, m: f64| (c as f64 * m).floor().clamp(0.0, 255.0) as u8;
        Self::new(floor(self.r, r_mult), floor(self.g, g_mult), floor(self.b, b_mult))
    }

    /// Channels as `f64`, handy for blending.
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// CSS `rgb()` notation.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// CSS `rgba()` notation with the given alpha.
    pub fn css_alpha(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
