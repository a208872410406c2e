//! Animated radial-gradient backdrop.
//!
//! A dim tinted fill with five soft orbs of light drifting on sinusoidal
//! orbits. Every call repaints the whole canvas from the current time; the
//! caller drives the frame loop.

use calma_core::{Clock, Rgb, SystemClock};

use crate::canvas::Canvas;
use crate::gradient::RadialGradient;

/// Number of orbs painted over the backdrop.
pub const ORB_COUNT: usize = 5;

/// Channel multipliers for the dim backdrop fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Tint {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.15)
    }
}

/// Orb centers in normalized `[0, 1]` canvas space at animation time `t`.
pub fn orbit_points(t: f64) -> [(f64, f64); ORB_COUNT] {
    [
        // Top left
        (0.2 + t.sin() * 0.08, 0.2 + (t * 0.8).cos() * 0.08),
        // Top right
        (0.8 + (t * 1.2).cos() * 0.08, 0.3 + t.sin() * 0.08),
        // Center
        (0.5 + (t * 0.7).sin() * 0.1, 0.5 + (t * 1.1).cos() * 0.1),
        // Bottom right
        (0.7 + (t * 0.9).cos() * 0.08, 0.8 + (t * 0.6).sin() * 0.08),
        // Bottom left
        (0.3 + (t * 1.3).sin() * 0.08, 0.7 + (t * 0.5).cos() * 0.08),
    ]
}

/// Pulsing center opacity of orb `index` at animation time `t`.
pub fn orb_alpha(t: f64, index: usize) -> f64 {
    0.35 + (t + index as f64).sin() * 0.1
}

/// Paint the animated backdrop for the instant reported by `clock`.
///
/// `speed` scales epoch milliseconds into animation time; typical values are
/// between `0.0003` and `0.001`.
pub fn draw_radial_gradient(
    canvas: &mut Canvas,
    color: Rgb,
    tint: Tint,
    speed: f64,
    clock: &impl Clock,
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    canvas.fill(color.tinted(tint.r, tint.g, tint.b));

    let time = clock.now_ms() as f64 * speed;
    for (i, (x, y)) in orbit_points(time).into_iter().enumerate() {
        let alpha = orb_alpha(time, i);
        let mut orb = RadialGradient::new(x * w, y * h, w * 0.5);
        orb.add_color_stop(0.0, color, alpha)
            .add_color_stop(0.4, color, alpha * 0.4)
            .add_transparent_stop(1.0);
        canvas.fill_radial_gradient(&orb);
    }
}

/// The backdrop settings bundled with a clock, for use in a frame loop.
#[derive(Debug, Clone)]
pub struct BackdropPainter<C = SystemClock> {
    pub tint: Tint,
    pub speed: f64,
    clock: C,
}

impl BackdropPainter<SystemClock> {
    pub fn new(tint: Tint, speed: f64) -> Self {
        Self::with_clock(tint, speed, SystemClock)
    }
}

impl<C: Clock> BackdropPainter<C> {
    pub fn with_clock(tint: Tint, speed: f64, clock: C) -> Self {
        Self { tint, speed, clock }
    }

    /// Repaint `canvas` with orbs of `color`.
    pub fn paint(&self, canvas: &mut Canvas, color: Rgb) {
        draw_radial_gradient(canvas, color, self.tint, self.speed, &self.clock);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
