//! Exercise visuals drawn over the backdrop.

use std::f64::consts::{SQRT_2, TAU};

use calma_core::{CircleStyle, Rgb, WaveFrame, lerp_color};

use crate::canvas::Canvas;

/// Opacity of the dark fill inside the circle.
const INNER_FILL_ALPHA: f64 = 0.1;

/// Ring thickness relative to the circle radius.
const RING_RATIO: f64 = 0.08;

/// Soft falloff used to approximate a blurred shadow edge.
fn falloff(distance: f64, blur: f64) -> f64 {
    if blur <= 0.0 || distance >= blur {
        return 0.0;
    }
    let t = 1.0 - distance / blur;
    t * t
}

impl Canvas {
    /// Rasterize the breathing circle.
    ///
    /// `base_radius` is the unscaled radius in canvas pixels and `px_per_css`
    /// converts the style's CSS pixel blur radii to canvas pixels.
    pub fn draw_breathing_circle(
        &mut self,
        style: &CircleStyle,
        center: (f64, f64),
        base_radius: f64,
        px_per_css: f64,
    ) {
        let radius = base_radius * style.scale;
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let ring = (radius * RING_RATIO).max(1.0);
        let outer_reach = style
            .shadows
            .iter()
            .filter(|s| !s.inset)
            .map(|s| s.blur_px * px_per_css)
            .fold(0.0, f64::max);

        let reach = radius + outer_reach;
        let x0 = (center.0 - reach).floor().max(0.0) as u32;
        let y0 = (center.1 - reach).floor().max(0.0) as u32;
        let x1 = ((center.0 + reach).ceil().max(0.0) as u32).min(self.width());
        let y1 = ((center.1 + reach).ceil().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - center.0;
                let dy = y as f64 + 0.5 - center.1;
                let d = (dx * dx + dy * dy).sqrt();

                if d > radius {
                    for shadow in style.shadows.iter().filter(|s| !s.inset) {
                        let a = falloff(d - radius, shadow.blur_px * px_per_css);
                        self.blend(x, y, style.color, shadow.alpha * a);
                    }
                } else if d > radius - ring {
                    // 135deg runs from the top-left corner to the bottom-right.
                    let t = (dx + dy) / (2.0 * SQRT_2 * radius) + 0.5;
                    self.blend(x, y, lerp_color(style.color, style.highlight, t), 1.0);
                } else {
                    self.blend(x, y, Rgb::BLACK, INNER_FILL_ALPHA);
                    for shadow in style.shadows.iter().filter(|s| s.inset) {
                        let a = falloff(radius - ring - d, shadow.blur_px * px_per_css);
                        self.blend(x, y, style.color, shadow.alpha * a);
                    }
                }
            }
        }
    }

    /// Draw the calming waves for one frame.
    ///
    /// `time_s` is seconds since the exercise started and `px_per_css`
    /// converts the frame's amplitude to canvas pixels.
    pub fn draw_waves(
        &mut self,
        frame: &WaveFrame<'_>,
        wave_count: u32,
        time_s: f64,
        px_per_css: f64,
    ) {
        let w = self.width() as f64;
        let h = self.height() as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let amplitude = frame.amplitude * px_per_css;

        for k in 0..wave_count {
            let kf = k as f64;
            let baseline = h * (kf + 1.0) / (wave_count as f64 + 1.0);
            let frequency = 1.5 + kf * 0.3;
            let phase_shift = time_s * frame.speed * (1.0 + kf * 0.2);
            let alpha = 0.7 - 0.4 * kf / wave_count.max(1) as f64;

            for x in 0..self.width() {
                let phase = x as f64 / w * TAU * frequency + phase_shift;
                // Chaos mixes in a faster, out-of-step ripple.
                let ripple = (phase * 3.7 + kf * 1.3 + time_s * frame.speed * 2.1).sin();
                let offset =
                    (phase.sin() + frame.chaos * 0.6 * ripple) / (1.0 + frame.chaos * 0.6);
                let y = baseline + amplitude * offset;
                if y < 0.0 {
                    continue;
                }
                let row = y.round() as u32;
                self.blend(x, row, frame.color, alpha);
                if let Some(above) = row.checked_sub(1) {
                    self.blend(x, above, frame.color, alpha * 0.35);
                }
                self.blend(x, row + 1, frame.color, alpha * 0.35);
            }
        }
    }
}
