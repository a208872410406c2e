//! Background canvas state and terminal output.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use calma_core::{Clock, Rgb, SystemClock};
use ratatui::{Frame, buffer::Buffer, layout::Rect};

use crate::canvas::Canvas;
use crate::painter::{BackdropPainter, Tint};
use crate::viewport::{CanvasBinding, Size, Viewport, setup_canvas};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Canvas size for a terminal area. Each cell holds two stacked pixels.
pub fn viewport_size(area: Rect) -> Size {
    Size::new(area.width as u32, area.height as u32 * 2)
}

/// Copy the canvas into the buffer using half-block cells.
///
/// Pixels outside the canvas are left untouched.
pub fn blit(canvas: &Canvas, buf: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        for col in 0..area.width {
            let x = col as u32;
            let y = row as u32 * 2;
            let (Some(top), Some(bottom)) = (canvas.pixel(x, y), canvas.pixel(x, y + 1)) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(HALF_BLOCK)
                    .set_fg(top.into())
                    .set_bg(bottom.into());
            }
        }
    }
}

/// Background animation state: a canvas kept at viewport size and the
/// backdrop painter that fills it every frame.
#[derive(Debug)]
pub struct BackgroundState<C = SystemClock> {
    canvas: Rc<RefCell<Canvas>>,
    _binding: CanvasBinding,
    painter: BackdropPainter<C>,
}

impl BackgroundState<SystemClock> {
    /// Create a new background state bound to `viewport`.
    pub fn new(viewport: &Viewport, tint: Tint, speed: f64) -> Self {
        Self::with_painter(viewport, BackdropPainter::new(tint, speed))
    }
}

impl<C: Clock> BackgroundState<C> {
    pub fn with_painter(viewport: &Viewport, painter: BackdropPainter<C>) -> Self {
        let canvas = Rc::new(RefCell::new(Canvas::default()));
        let binding = setup_canvas(&canvas, viewport);
        Self {
            canvas,
            _binding: binding,
            painter,
        }
    }

    /// Repaint the backdrop with orbs of `color`.
    pub fn paint(&self, color: Rgb) {
        self.painter.paint(&mut self.canvas.borrow_mut(), color);
    }

    /// Mutable access for drawing on top of the backdrop.
    pub fn canvas_mut(&self) -> RefMut<'_, Canvas> {
        self.canvas.borrow_mut()
    }

    pub fn painter(&self) -> &BackdropPainter<C> {
        &self.painter
    }

    /// Render the canvas to the frame.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        blit(&self.canvas.borrow(), frame.buffer_mut(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calma_core::FixedClock;
    use ratatui::style::Color;

    #[test]
    fn test_viewport_size_doubles_rows() {
        assert_eq!(viewport_size(Rect::new(0, 0, 80, 24)), Size::new(80, 48));
    }

    #[test]
    fn test_blit_half_blocks() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blend(0, 0, Rgb::new(10, 20, 30), 1.0);
        canvas.blend(0, 1, Rgb::new(40, 50, 60), 1.0);

        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        blit(&canvas, &mut buf, area);

        assert_eq!(buf[(0, 0)].symbol(), HALF_BLOCK);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(10, 20, 30));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(40, 50, 60));
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0, 0, 0));
        // Third column is outside the canvas.
        assert_eq!(buf[(2, 0)].symbol(), " ");
    }

    #[test]
    fn test_state_follows_viewport() {
        let viewport = Viewport::new(Size::new(8, 6));
        let painter = BackdropPainter::with_clock(Tint::default(), 0.0005, FixedClock(0));
        let state = BackgroundState::with_painter(&viewport, painter);
        assert_eq!(state.canvas_mut().width(), 8);

        viewport.resize(Size::new(12, 10));
        state.paint(Rgb::new(167, 139, 250));
        let canvas = state.canvas_mut();
        assert_eq!((canvas.width(), canvas.height()), (12, 10));
        assert_ne!(canvas.pixel(0, 0), Some(Rgb::BLACK));
    }
}
