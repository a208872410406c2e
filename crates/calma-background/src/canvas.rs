//! An opaque RGB pixel canvas.

use calma_core::Rgb;

use crate::gradient::RadialGradient;

/// Row-major RGB pixel buffer.
///
/// The canvas is always opaque. Translucent paint is composited with
/// source-over and rounded back to 8 bits per channel after each operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    /// Change the drawable size. Like assigning an HTML canvas's width, this
    /// clears the canvas even when the size is unchanged.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Rgb::BLACK);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixels as packed RGB bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Paint the whole canvas with a solid color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Paint a gradient over the whole canvas with source-over compositing.
    /// Gradients with a non-finite center or radius paint nothing.
    pub fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let finite = [gradient.cx, gradient.cy, gradient.radius]
            .iter()
            .all(|v| v.is_finite());
        if !finite || gradient.radius <= 0.0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let (color, alpha) = gradient.sample_at(x as f64 + 0.5, y as f64 + 0.5);
                if alpha > 0.0 {
                    self.blend_premultiplied(x, y, color, alpha);
                }
            }
        }
    }

    /// Composite `color` at `alpha` over one pixel. Out-of-bounds is a no-op.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgb, alpha: f64) {
        let alpha = alpha.clamp(0.0, 1.0);
        let [r, g, b] = color.to_f64();
        self.blend_premultiplied(x, y, [r * alpha, g * alpha, b * alpha], alpha);
    }

    fn blend_premultiplied(&mut self, x: u32, y: u32, color: [f64; 3], alpha: f64) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let [dr, dg, db] = self.pixels[i].to_f64();
        let keep = 1.0 - alpha;
        self.pixels[i] = Rgb::from_f64(
            color[0] + dr * keep,
            color[1] + dg * keep,
            color[2] + db * keep,
        );
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let c = Canvas::new(3, 2);
        assert_eq!(c.pixels().len(), 6);
        assert!(c.pixels().iter().all(|p| *p == Rgb::BLACK));
        assert_eq!(c.as_bytes().len(), 18);
    }

    #[test]
    fn test_set_size_clears() {
        let mut c = Canvas::new(2, 2);
        c.fill(Rgb::WHITE);
        c.set_size(2, 2);
        assert_eq!(c.pixel(1, 1), Some(Rgb::BLACK));
        c.set_size(4, 1);
        assert_eq!((c.width(), c.height()), (4, 1));
        assert_eq!(c.pixel(0, 1), None);
    }

    #[test]
    fn test_blend_source_over() {
        let mut c = Canvas::new(1, 1);
        c.fill(Rgb::new(0, 0, 100));
        c.blend(0, 0, Rgb::new(200, 0, 0), 0.5);
        assert_eq!(c.pixel(0, 0), Some(Rgb::new(100, 0, 50)));
        c.blend(5, 5, Rgb::WHITE, 1.0);
    }

    #[test]
    fn test_gradient_brightest_at_center() {
        let mut c = Canvas::new(21, 21);
        let mut g = RadialGradient::new(10.5, 10.5, 10.0);
        g.add_color_stop(0.0, Rgb::WHITE, 1.0).add_transparent_stop(1.0);
        c.fill_radial_gradient(&g);

        let center = c.pixel(10, 10).unwrap();
        let edge = c.pixel(10, 0).unwrap();
        let corner = c.pixel(0, 0).unwrap();
        assert!(center.r > 240);
        assert!(edge.r < center.r);
        assert_eq!(corner, Rgb::BLACK);
    }

    #[test]
    fn test_zero_radius_paints_nothing() {
        let mut c = Canvas::new(4, 4);
        let mut g = RadialGradient::new(2.0, 2.0, 0.0);
        g.add_color_stop(0.0, Rgb::WHITE, 1.0);
        c.fill_radial_gradient(&g);
        assert!(c.pixels().iter().all(|p| *p == Rgb::BLACK));
    }

    #[test]
    fn test_non_finite_center_paints_nothing() {
        let mut c = Canvas::new(4, 4);
        let mut g = RadialGradient::new(f64::NAN, 2.0, 3.0);
        g.add_color_stop(0.0, Rgb::WHITE, 1.0);
        c.fill_radial_gradient(&g);
        assert!(c.pixels().iter().all(|p| *p == Rgb::BLACK));
    }
}
