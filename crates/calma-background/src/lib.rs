//! Canvas backgrounds for the calma relaxation app.
//!
//! This crate provides an RGB pixel canvas with a radial gradient
//! rasterizer, keeps the canvas sized to the terminal viewport, paints the
//! animated orb backdrop, draws the exercise visuals (breathing circle and
//! calming waves) on top, and blits the result to a ratatui frame.

mod canvas;
mod gradient;
mod painter;
mod shapes;
mod state;
mod viewport;

pub use canvas::Canvas;
pub use gradient::{ColorStop, RadialGradient};
pub use painter::{BackdropPainter, ORB_COUNT, Tint, draw_radial_gradient, orb_alpha, orbit_points};
pub use state::{BackgroundState, blit, viewport_size};
pub use viewport::{CanvasBinding, Size, Subscription, Viewport, setup_canvas};
