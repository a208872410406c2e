//! Visual values of the breathing circle.
//!
//! The circle grows and shrinks with the breath. Its glow strength follows
//! the current scale relative to the maximum scale.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Amount added to each channel for the highlight tone of the ring.
const HIGHLIGHT_BOOST: u8 = 40;

/// Blur radius (px at full glow), alpha and inset flag of each shadow layer.
const SHADOW_LAYERS: [(f64, f64, bool); 4] = [
    (50.0, 0.7, false),
    (100.0, 0.5, false),
    (150.0, 0.3, false),
    (50.0, 0.3, true),
];

/// One layer of the glow shadow stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub blur_px: f64,
    pub alpha: f64,
    pub inset: bool,
}

/// Computed style of the breathing circle for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    /// Base color of the ring and glow.
    pub color: Rgb,
    /// Brighter tone the ring gradient fades to.
    pub highlight: Rgb,
    /// Uniform scale factor.
    pub scale: f64,
    /// `scale / max_scale`.
    pub glow: f64,
    /// Three outer glows followed by one inset glow.
    pub shadows: [Shadow; 4],
}

impl CircleStyle {
    /// Compute the style for `color` at `scale`.
    ///
    /// `max_scale` must be finite and non-zero.
    pub fn new(color: Rgb, scale: f64, max_scale: f64) -> Result<Self> {
        if max_scale == 0.0 || !max_scale.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "max_scale must be finite and non-zero, got {max_scale}"
            )));
        }
        let glow = scale / max_scale;
        let shadows = SHADOW_LAYERS.map(|(blur, alpha, inset)| Shadow {
            blur_px: blur * glow,
            alpha,
            inset,
        });

        Ok(Self {
            color,
            highlight: color.saturating_add(HIGHLIGHT_BOOST),
            scale,
            glow,
            shadows,
        })
    }

    /// Value of the CSS `transform` property.
    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// Value of the CSS `background` property: a dark translucent fill in
    /// the padding box over a 135 degree two-tone ring in the border box.
    pub fn background_css(&self) -> String {
        format!(
            "linear-gradient(rgba(0,0,0,0.1), rgba(0,0,0,0.1)) padding-box, \
             linear-gradient(135deg, {}, {}) border-box",
            self.color.css(),
            self.highlight.css()
        )
    }

    /// Value of the CSS `box-shadow` property.
    pub fn box_shadow_css(&self) -> String {
        self.shadows
            .iter()
            .map(|s| {
                let inset = if s.inset { "inset " } else { "" };
                format!("{inset}0 0 {}px {}", s.blur_px, self.color.css_alpha(s.alpha))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_glow_at_max_scale() {
        let style = CircleStyle::new(Rgb::new(14, 165, 233), 2.0, 2.0).unwrap();
        assert_eq!(style.glow, 1.0);
        let blurs: Vec<f64> = style.shadows.iter().map(|s| s.blur_px).collect();
        assert_eq!(blurs, vec![50.0, 100.0, 150.0, 50.0]);
        let alphas: Vec<f64> = style.shadows.iter().map(|s| s.alpha).collect();
        assert_eq!(alphas, vec![0.7, 0.5, 0.3, 0.3]);
        assert!(style.shadows[3].inset);
    }

    #[test]
    fn test_half_glow() {
        let style = CircleStyle::new(Rgb::new(0, 0, 0), 1.0, 2.0).unwrap();
        assert_eq!(style.glow, 0.5);
        assert_eq!(style.shadows[2].blur_px, 75.0);
    }

    #[test]
    fn test_highlight_clamps() {
        let style = CircleStyle::new(Rgb::new(239, 68, 220), 1.0, 1.0).unwrap();
        assert_eq!(style.highlight, Rgb::new(255, 108, 255));
    }

    #[test]
    fn test_zero_max_scale_rejected() {
        assert!(matches!(
            CircleStyle::new(Rgb::WHITE, 1.0, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(CircleStyle::new(Rgb::WHITE, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_css_output() {
        let style = CircleStyle::new(Rgb::new(10, 20, 30), 1.5, 1.5).unwrap();
        assert_eq!(style.transform_css(), "scale(1.5)");
        assert_eq!(
            style.background_css(),
            "linear-gradient(rgba(0,0,0,0.1), rgba(0,0,0,0.1)) padding-box, \
             linear-gradient(135deg, rgb(10, 20, 30), rgb(50, 60, 70)) border-box"
        );
        assert_eq!(
            style.box_shadow_css(),
            "0 0 50px rgba(10, 20, 30, 0.7), 0 0 100px rgba(10, 20, 30, 0.5), \
             0 0 150px rgba(10, 20, 30, 0.3), inset 0 0 50px rgba(10, 20, 30, 0.3)"
        );
    }
}
