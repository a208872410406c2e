//! Linear interpolation for scalars, colors and multi-stop palettes.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Linear interpolation between `a` and `b`.
///
/// `t` is not constrained; values outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate each channel of two colors independently.
///
/// Channels are rounded to the nearest integer and clamped to `0..=255`,
/// so extrapolating `t` saturates instead of wrapping.
pub fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::from_f64(
        lerp(c1.r as f64, c2.r as f64, t),
        lerp(c1.g as f64, c2.g as f64, t),
        lerp(c1.b as f64, c2.b as f64, t),
    )
}

/// Sample a piecewise-linear gradient of equally spaced color stops.
///
/// `progress` is clamped to `[0, 1]`. An empty stop list is rejected.
pub fn color_from_stops(colors: &[Rgb], progress: f64) -> Result<Rgb> {
    if colors.is_empty() {
        return Err(Error::InvalidArgument(
            "color stop list must not be empty".into(),
        ));
    }
    Ok(sample(colors, progress))
}

fn sample(colors: &[Rgb], progress: f64) -> Rgb {
    let last = colors.len() - 1;
    let idx = progress.clamp(0.0, 1.0) * last as f64;
    let lo = (idx.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    lerp_color(colors[lo], colors[hi], idx - lo as f64)
}

/// A non-empty list of color stops spanning progress `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    stops: Vec<Rgb>,
}

impl Palette {
    /// Create a palette, rejecting an empty stop list.
    pub fn new(stops: Vec<Rgb>) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidArgument("palette must have at least one color".into()));
        }
        Ok(Self { stops })
    }

    /// A palette holding a single color.
    pub fn solid(color: Rgb) -> Self {
        Self { stops: vec![color] }
    }

    /// Color at `progress` along the palette.
    pub fn sample(&self, progress: f64) -> Rgb {
        sample(&self.stops, progress)
    }

    pub fn first(&self) -> Rgb {
        self.stops[0]
    }

    pub fn last(&self) -> Rgb {
        self.stops[self.stops.len() - 1]
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = Error;

    fn try_from(stops: Vec<Rgb>) -> Result<Self> {
        Palette::new(stops)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(p: Palette) -> Self {
        p.stops
    }
}
