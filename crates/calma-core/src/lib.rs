//! Core types and animation math shared by the calma crates.
//!
//! Everything in here is pure: colors and their interpolation, the cubic
//! easing curves, the breathing-circle style values, the clock abstraction
//! and the exercise timelines. Nothing holds animation state between calls;
//! callers pass the current time or progress on every frame.

mod circle;
mod clock;
mod color;
mod easing;
mod error;
mod exercise;
mod interpolate;

pub use circle::{CircleStyle, Shadow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use color::Rgb;
pub use easing::{Easing, ease_in_cubic, ease_in_out_cubic, ease_out_cubic};
pub use error::{Error, Result};
pub use exercise::{
    BreathingFrame, BreathingPattern, BreathingPhase, PhaseKind, ValueRange, WaveFrame,
    WavePattern,
};
pub use interpolate::{Palette, color_from_stops, lerp, lerp_color};
